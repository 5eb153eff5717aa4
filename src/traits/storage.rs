// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::Path;

use crate::errors::StorageError;

/// Access to file references that may live outside the working directory.
///
/// A reference is either local (a plain path or `file://` URL) or names a location in a
/// storage namespace (`<scheme>://<path>`). Implementations decide how to reach the latter.
pub trait Storage: Send + Sync {
    fn read(&self, reference: &str) -> Result<Vec<u8>, StorageError>;

    fn write(&self, reference: &str, bytes: &[u8]) -> Result<(), StorageError>;

    fn exists(&self, reference: &str) -> Result<bool, StorageError>;

    /// Make `reference` usable under `working_dir` and return the path a tool should use.
    ///
    /// With `copy` the content is fetched (input files); without, only the location is
    /// prepared (output files). The returned path is deterministic for a given reference.
    fn localize(
        &self,
        reference: &str,
        working_dir: &Path,
        copy: bool,
    ) -> Result<String, StorageError>;

    /// Publish the file a tool wrote at `local_path` to `reference`.
    fn delocalize(
        &self,
        local_path: &str,
        reference: &str,
        working_dir: &Path,
    ) -> Result<(), StorageError>;
}
