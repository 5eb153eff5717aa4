// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for in-process entry point execution.

use std::fmt::{Display, Formatter};

use super::StructuredLog;

/// The backward scan found an entry point.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use pipewrap::observability::messages::in_process::EntryPointResolved;
///
/// let msg = EntryPointResolved {
///     entry_point: "builtin.Upper",
///     token: "tools/upper.jar",
///     arg_count: 2,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct EntryPointResolved<'a> {
    pub entry_point: &'a str,
    pub token: &'a str,
    pub arg_count: usize,
}

impl Display for EntryPointResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Resolved entry point '{}' from '{}' with {} argument(s)",
            self.entry_point, self.token, self.arg_count
        )
    }
}

impl StructuredLog for EntryPointResolved<'_> {
    fn log(&self) {
        tracing::info!(
            entry_point = self.entry_point,
            token = self.token,
            arg_count = self.arg_count,
            "{}", self
        );
    }
}

/// An archive token could not be inspected; the scan continues.
///
/// # Log Level
/// `warn!` - Potential issue or degraded behavior
pub struct ArchiveSkipped<'a> {
    pub archive: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ArchiveSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Skipping archive '{}': {}", self.archive, self.error)
    }
}

impl StructuredLog for ArchiveSkipped<'_> {
    fn log(&self) {
        tracing::warn!(archive = self.archive, error = %self.error, "{}", self);
    }
}

/// An entry point asked to terminate the process; converted to a stage status.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct TerminationTrapped<'a> {
    pub entry_point: &'a str,
    pub status: i32,
}

impl Display for TerminationTrapped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Entry point '{}' tried to exit with status {}; trapped",
            self.entry_point, self.status
        )
    }
}

impl StructuredLog for TerminationTrapped<'_> {
    fn log(&self) {
        tracing::debug!(
            entry_point = self.entry_point,
            status = self.status,
            "{}", self
        );
    }
}

/// An entry point returned an error.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct EntryPointFailed<'a> {
    pub entry_point: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for EntryPointFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Entry point '{}' failed: {}", self.entry_point, self.error)
    }
}

impl StructuredLog for EntryPointFailed<'_> {
    fn log(&self) {
        tracing::error!(
            entry_point = self.entry_point,
            error = %self.error,
            "{}", self
        );
    }
}
