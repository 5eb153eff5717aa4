// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for moving file references between storage and the working directory.

use std::fmt::{Display, Formatter};

use super::StructuredLog;

/// A reference was made available under the working directory.
///
/// # Log Level
/// `debug!` - Diagnostic detail
///
/// # Example
/// ```
/// use pipewrap::observability::messages::storage::ReferenceLocalized;
///
/// let msg = ReferenceLocalized {
///     reference: "hdfs://data/in.txt",
///     local_path: "hdfs/data/in.txt",
///     copied: true,
/// };
///
/// assert_eq!(
///     msg.to_string(),
///     "Localized 'hdfs://data/in.txt' as 'hdfs/data/in.txt' (copied)"
/// );
/// ```
pub struct ReferenceLocalized<'a> {
    pub reference: &'a str,
    pub local_path: &'a str,
    pub copied: bool,
}

impl Display for ReferenceLocalized<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Localized '{}' as '{}' ({})",
            self.reference,
            self.local_path,
            if self.copied { "copied" } else { "placeholder" }
        )
    }
}

impl StructuredLog for ReferenceLocalized<'_> {
    fn log(&self) {
        tracing::debug!(
            reference = self.reference,
            local_path = self.local_path,
            copied = self.copied,
            "{}", self
        );
    }
}

/// A local output was published to its declared destination.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct ReferenceDelocalized<'a> {
    pub local_path: &'a str,
    pub reference: &'a str,
    pub size_bytes: u64,
}

impl Display for ReferenceDelocalized<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Delocalized '{}' to '{}' ({} bytes)",
            self.local_path, self.reference, self.size_bytes
        )
    }
}

impl StructuredLog for ReferenceDelocalized<'_> {
    fn log(&self) {
        tracing::debug!(
            local_path = self.local_path,
            reference = self.reference,
            size_bytes = self.size_bytes,
            "{}", self
        );
    }
}
