// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::StorageConfig;
use crate::errors::StorageError;
use crate::observability::messages::storage::{ReferenceDelocalized, ReferenceLocalized};
use crate::observability::messages::StructuredLog;
use crate::storage::FileRef;
use crate::traits::Storage;

/// Storage where each configured scheme is a directory on the local filesystem.
///
/// `hdfs://logs/a.txt` with `hdfs` rooted at `/data/hdfs` is `/data/hdfs/logs/a.txt`.
/// Localizing it under a working directory yields the relative path `hdfs/logs/a.txt`.
#[derive(Debug, Clone, Default)]
pub struct FsStorage {
    remotes: HashMap<String, PathBuf>,
}

impl FsStorage {
    pub fn new(remotes: HashMap<String, PathBuf>) -> Self {
        Self { remotes }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.remotes.clone())
    }

    /// Absolute location of a reference on this machine.
    pub fn resolve(&self, reference: &str) -> Result<PathBuf, StorageError> {
        match FileRef::parse(reference)? {
            FileRef::Local(path) => Ok(PathBuf::from(path)),
            FileRef::Remote { scheme, path } => self
                .remotes
                .get(scheme)
                .map(|root| root.join(path))
                .ok_or_else(|| StorageError::UnknownScheme {
                    scheme: scheme.to_string(),
                    reference: reference.to_string(),
                }),
        }
    }
}

fn create_parent(path: &Path, reference: &str) -> Result<(), StorageError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(reference, e))
        }
        _ => Ok(()),
    }
}

impl Storage for FsStorage {
    fn read(&self, reference: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(reference)?;
        fs::read(path).map_err(|e| StorageError::io(reference, e))
    }

    fn write(&self, reference: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.resolve(reference)?;
        create_parent(&path, reference)?;
        fs::write(path, bytes).map_err(|e| StorageError::io(reference, e))
    }

    fn exists(&self, reference: &str) -> Result<bool, StorageError> {
        Ok(self.resolve(reference)?.exists())
    }

    fn localize(
        &self,
        reference: &str,
        working_dir: &Path,
        copy: bool,
    ) -> Result<String, StorageError> {
        let (scheme, path) = match FileRef::parse(reference)? {
            FileRef::Local(path) => {
                // Joining an absolute path yields that path unchanged.
                if copy && !working_dir.join(path).exists() {
                    return Err(StorageError::NotFound(reference.to_string()));
                }
                return Ok(path.to_string());
            }
            FileRef::Remote { scheme, path } => (scheme, path),
        };

        let source = self.resolve(reference)?;
        let local = format!("{}/{}", scheme, path);
        let target = working_dir.join(&local);
        create_parent(&target, reference)?;

        if copy {
            fs::copy(&source, &target).map_err(|e| StorageError::io(reference, e))?;
        }

        ReferenceLocalized {
            reference,
            local_path: &local,
            copied: copy,
        }
        .log();
        Ok(local)
    }

    fn delocalize(
        &self,
        local_path: &str,
        reference: &str,
        working_dir: &Path,
    ) -> Result<(), StorageError> {
        if FileRef::parse(reference)?.is_local() {
            return Ok(());
        }

        let target = self.resolve(reference)?;
        create_parent(&target, reference)?;
        let size_bytes = fs::copy(working_dir.join(local_path), &target)
            .map_err(|e| StorageError::io(local_path, e))?;

        ReferenceDelocalized {
            local_path,
            reference,
            size_bytes,
        }
        .log();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Fixture {
        remote: TempDir,
        work: TempDir,
        storage: FsStorage,
    }

    fn fixture() -> Fixture {
        let remote = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let storage = FsStorage::new(HashMap::from([(
            "hdfs".to_string(),
            remote.path().to_path_buf(),
        )]));
        Fixture {
            remote,
            work,
            storage,
        }
    }

    #[test]
    fn test_localize_remote_input_copies_into_working_dir() {
        let f = fixture();
        fs::create_dir_all(f.remote.path().join("data")).unwrap();
        fs::write(f.remote.path().join("data/in.txt"), "payload").unwrap();

        let local = f.storage.localize("hdfs://data/in.txt", f.work.path(), true).unwrap();

        assert_eq!(local, "hdfs/data/in.txt");
        assert_eq!(
            fs::read_to_string(f.work.path().join(&local)).unwrap(),
            "payload"
        );
    }

    #[test]
    fn test_localize_is_idempotent_and_refreshes_copy() {
        let f = fixture();
        fs::write(f.remote.path().join("in.txt"), "v1").unwrap();
        let first = f.storage.localize("hdfs://in.txt", f.work.path(), true).unwrap();

        fs::write(f.remote.path().join("in.txt"), "v2").unwrap();
        let second = f.storage.localize("hdfs://in.txt", f.work.path(), true).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read_to_string(f.work.path().join(second)).unwrap(), "v2");
    }

    #[test]
    fn test_localize_output_only_prepares_location() {
        let f = fixture();
        let local = f.storage.localize("hdfs://out/deep/result.txt", f.work.path(), false).unwrap();

        assert_eq!(local, "hdfs/out/deep/result.txt");
        assert!(f.work.path().join("hdfs/out/deep").is_dir());
        assert!(!f.work.path().join(&local).exists());
    }

    #[test]
    fn test_localize_local_reference_is_unchanged() {
        let f = fixture();
        fs::write(f.work.path().join("local.txt"), "x").unwrap();

        assert_eq!(f.storage.localize("local.txt", f.work.path(), true).unwrap(), "local.txt");
        assert_eq!(
            f.storage.localize("new-output.txt", f.work.path(), false).unwrap(),
            "new-output.txt"
        );
    }

    #[test]
    fn test_localize_missing_input() {
        let f = fixture();
        assert!(matches!(
            f.storage.localize("hdfs://nope.txt", f.work.path(), true),
            Err(StorageError::NotFound(r)) if r == "hdfs://nope.txt"
        ));
        assert!(matches!(
            f.storage.localize("nope.txt", f.work.path(), true),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_unknown_scheme() {
        let f = fixture();
        assert!(matches!(
            f.storage.localize("gs://bucket/x", f.work.path(), true),
            Err(StorageError::UnknownScheme { scheme, .. }) if scheme == "gs"
        ));
    }

    #[test]
    fn test_delocalize_copies_to_remote() {
        let f = fixture();
        let local = f.storage.localize("hdfs://out/r.txt", f.work.path(), false).unwrap();
        fs::write(f.work.path().join(&local), "result").unwrap();

        f.storage.delocalize(&local, "hdfs://out/r.txt", f.work.path()).unwrap();

        assert_eq!(
            fs::read_to_string(f.remote.path().join("out/r.txt")).unwrap(),
            "result"
        );
        assert!(f.storage.exists("hdfs://out/r.txt").unwrap());
    }

    #[test]
    fn test_delocalize_local_reference_is_noop() {
        let f = fixture();
        f.storage.delocalize("missing.txt", "missing.txt", f.work.path()).unwrap();
    }

    #[test]
    fn test_read_and_write_round_trip_through_remote() {
        let f = fixture();
        f.storage.write("hdfs://a/b.txt", b"bytes").unwrap();
        assert_eq!(f.storage.read("hdfs://a/b.txt").unwrap(), b"bytes");
        assert!(matches!(
            f.storage.read("hdfs://a/missing.txt"),
            Err(StorageError::NotFound(_))
        ));
    }
}
