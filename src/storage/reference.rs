// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::{Component, Path};

use crate::errors::StorageError;

const SCHEME_SEPARATOR: &str = "://";
const LOCAL_SCHEME: &str = "file";

/// A single file reference, split into where it lives and its path there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRef<'a> {
    /// A path on the local filesystem (plain path or `file://` URL).
    Local(&'a str),
    /// A path inside a named storage namespace.
    Remote { scheme: &'a str, path: &'a str },
}

impl<'a> FileRef<'a> {
    /// Classify a raw reference.
    ///
    /// ```
    /// use pipewrap::storage::FileRef;
    ///
    /// assert_eq!(FileRef::parse("data/in.txt")?, FileRef::Local("data/in.txt"));
    /// assert_eq!(FileRef::parse("file:///tmp/x")?, FileRef::Local("/tmp/x"));
    /// assert_eq!(
    ///     FileRef::parse("hdfs://logs/day1.txt")?,
    ///     FileRef::Remote { scheme: "hdfs", path: "logs/day1.txt" }
    /// );
    /// # Ok::<(), pipewrap::errors::StorageError>(())
    /// ```
    pub fn parse(reference: &'a str) -> Result<Self, StorageError> {
        let invalid = || StorageError::InvalidReference(reference.to_string());

        let Some((scheme, rest)) = reference.split_once(SCHEME_SEPARATOR) else {
            if reference.is_empty() {
                return Err(invalid());
            }
            return Ok(FileRef::Local(reference));
        };

        if scheme.is_empty()
            || !scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '.' || c == '_')
        {
            return Err(invalid());
        }

        if scheme == LOCAL_SCHEME {
            if rest.is_empty() {
                return Err(invalid());
            }
            return Ok(FileRef::Local(rest));
        }

        let path = rest.trim_start_matches('/');
        let escapes = Path::new(path)
            .components()
            .any(|c| matches!(c, Component::ParentDir));
        if path.is_empty() || escapes {
            return Err(invalid());
        }

        Ok(FileRef::Remote { scheme, path })
    }

    pub fn is_local(&self) -> bool {
        matches!(self, FileRef::Local(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_references() {
        let cases = vec![
            ("in.txt", FileRef::Local("in.txt")),
            ("/abs/in.txt", FileRef::Local("/abs/in.txt")),
            ("file:///abs/in.txt", FileRef::Local("/abs/in.txt")),
            (
                "hdfs://data/in.txt",
                FileRef::Remote {
                    scheme: "hdfs",
                    path: "data/in.txt",
                },
            ),
            (
                "s3:///bucket/key",
                FileRef::Remote {
                    scheme: "s3",
                    path: "bucket/key",
                },
            ),
        ];

        for (reference, expected) in cases {
            assert_eq!(FileRef::parse(reference).unwrap(), expected, "{}", reference);
        }
    }

    #[test]
    fn test_invalid_references() {
        for reference in ["", "://x", "hdfs://", "hdfs:///", "file://", "hdfs://a/../../etc", "bad scheme://x"] {
            assert!(
                matches!(FileRef::parse(reference), Err(StorageError::InvalidReference(_))),
                "{:?}",
                reference
            );
        }
    }
}
