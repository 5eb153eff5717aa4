// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! File references, the filesystem-backed [`Storage`] and multi-valued (de)localization.

mod fs;
mod reference;

pub use self::fs::FsStorage;
pub use reference::FileRef;

use std::path::Path;

use crate::errors::StorageError;
use crate::traits::Storage;

/// Localize every reference of a possibly multi-valued parameter value.
///
/// The value is split on `separator`, empty fragments are dropped, each reference is
/// localized on its own and the local paths are joined again with `separator`.
pub fn localize_refs(
    storage: &dyn Storage,
    value: &str,
    working_dir: &Path,
    copy: bool,
    separator: &str,
) -> Result<String, StorageError> {
    let localized = split_refs(value, separator)
        .map(|reference| storage.localize(reference, working_dir, copy))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(localized.join(separator))
}

/// Delocalize a multi-valued parameter: pairs the `localized` value with the `declared`
/// value it was produced from, reference by reference.
pub fn delocalize_refs(
    storage: &dyn Storage,
    localized: &str,
    declared: &str,
    working_dir: &Path,
    separator: &str,
) -> Result<(), StorageError> {
    let locals: Vec<&str> = split_refs(localized, separator).collect();
    let remotes: Vec<&str> = split_refs(declared, separator).collect();
    if locals.len() != remotes.len() {
        return Err(StorageError::InvalidReference(declared.to_string()));
    }

    for (local, remote) in locals.into_iter().zip(remotes) {
        storage.delocalize(local, remote, working_dir)?;
    }
    Ok(())
}

/// Anchor a local reference to the working directory.
///
/// Relative local paths (plain or `file://`) are joined onto `working_dir`; absolute
/// paths and remote references are returned unchanged.
pub fn anchor_local(reference: &str, working_dir: &Path) -> Result<String, StorageError> {
    match FileRef::parse(reference)? {
        FileRef::Local(path) if Path::new(path).is_relative() => {
            Ok(working_dir.join(path).to_string_lossy().into_owned())
        }
        FileRef::Local(path) => Ok(path.to_string()),
        FileRef::Remote { .. } => Ok(reference.to_string()),
    }
}

fn split_refs<'a>(value: &'a str, separator: &'a str) -> impl Iterator<Item = &'a str> {
    value.split(separator).filter(|fragment| !fragment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn storage_with_remote() -> (TempDir, TempDir, FsStorage) {
        let remote = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let storage = FsStorage::new(HashMap::from([(
            "hdfs".to_string(),
            remote.path().to_path_buf(),
        )]));
        (remote, work, storage)
    }

    #[test]
    fn test_multi_valued_value_localizes_each_reference_in_order() {
        let (remote, work, storage) = storage_with_remote();
        for name in ["f1", "f2", "f3"] {
            fs::write(remote.path().join(name), name).unwrap();
        }

        let localized = localize_refs(
            &storage,
            "hdfs://f1 hdfs://f2 hdfs://f3",
            work.path(),
            true,
            " ",
        )
        .unwrap();

        assert_eq!(localized, "hdfs/f1 hdfs/f2 hdfs/f3");
        for name in ["f1", "f2", "f3"] {
            let copied = fs::read_to_string(work.path().join("hdfs").join(name)).unwrap();
            assert_eq!(copied, name);
        }
    }

    #[test]
    fn test_empty_fragments_are_dropped() {
        let (_remote, work, storage) = storage_with_remote();
        let localized =
            localize_refs(&storage, "  a.txt   b.txt ", work.path(), false, " ").unwrap();
        assert_eq!(localized, "a.txt b.txt");
    }

    #[test]
    fn test_custom_separator() {
        let (_remote, work, storage) = storage_with_remote();
        let localized =
            localize_refs(&storage, "hdfs://x,hdfs://y", work.path(), false, ",").unwrap();
        assert_eq!(localized, "hdfs/x,hdfs/y");
    }

    #[test]
    fn test_localize_fails_on_first_missing_reference() {
        let (_remote, work, storage) = storage_with_remote();
        assert!(matches!(
            localize_refs(&storage, "hdfs://missing", work.path(), true, " "),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_delocalize_pairs_references() {
        let (remote, work, storage) = storage_with_remote();
        let localized =
            localize_refs(&storage, "hdfs://o/a hdfs://o/b", work.path(), false, " ").unwrap();
        fs::write(work.path().join("hdfs/o/a"), "A").unwrap();
        fs::write(work.path().join("hdfs/o/b"), "B").unwrap();

        delocalize_refs(&storage, &localized, "hdfs://o/a hdfs://o/b", work.path(), " ").unwrap();

        assert_eq!(fs::read_to_string(remote.path().join("o/a")).unwrap(), "A");
        assert_eq!(fs::read_to_string(remote.path().join("o/b")).unwrap(), "B");
    }

    #[test]
    fn test_anchor_local_joins_relative_paths_onto_working_dir() {
        let work = Path::new("/srv/work");
        assert_eq!(anchor_local("in.txt", work).unwrap(), "/srv/work/in.txt");
        assert_eq!(anchor_local("file://d/in.txt", work).unwrap(), "/srv/work/d/in.txt");
        assert_eq!(anchor_local("/tmp/in.txt", work).unwrap(), "/tmp/in.txt");
        assert_eq!(anchor_local("hdfs://in.txt", work).unwrap(), "hdfs://in.txt");
        assert!(matches!(
            anchor_local("", work),
            Err(StorageError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_delocalize_rejects_count_mismatch() {
        let (_remote, work, storage) = storage_with_remote();
        assert!(matches!(
            delocalize_refs(&storage, "hdfs/a", "hdfs://a hdfs://b", work.path(), " "),
            Err(StorageError::InvalidReference(_))
        ));
    }
}
