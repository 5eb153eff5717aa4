// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration errors: the wrapper's own YAML config and operation structure.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("configuration validation failed: {0}")]
    Invalid(String),

    #[error("operation '{operation}' has an empty command template")]
    EmptyCommand { operation: String },

    #[error("operation '{operation}' declares parameter '{parameter}' more than once")]
    DuplicateParameter { operation: String, parameter: String },

    #[error("operation '{operation}' uses undeclared placeholder '{placeholder}'")]
    UndeclaredPlaceholder {
        operation: String,
        placeholder: String,
    },

    #[error("operation '{operation}' requires parameter '{parameter}'")]
    MissingParameter { operation: String, parameter: String },
}
