// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors from reading, writing, localizing and delocalizing file references.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("file reference '{0}' does not exist")]
    NotFound(String),

    #[error("storage scheme '{scheme}' is not configured (reference '{reference}')")]
    UnknownScheme { scheme: String, reference: String },

    #[error("invalid file reference '{0}'")]
    InvalidReference(String),

    #[error("I/O error on '{reference}': {source}")]
    Io {
        reference: String,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    pub(crate) fn io(reference: impl Into<String>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound(reference.into())
        } else {
            StorageError::Io {
                reference: reference.into(),
                source,
            }
        }
    }
}
