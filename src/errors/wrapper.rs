// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The error taxonomy surfaced at the invocation boundary.

use thiserror::Error;

use super::{ConfigError, ParseError, ResolutionError, StorageError};

/// Everything `ToolWrapper::wrap` can fail with.
///
/// Syntax, resolution, localization and configuration errors abort before any stage runs.
/// `Execution` means a stage reported a non-zero status; it carries the output captured up
/// to the failing stage so callers can surface it as diagnostics.
#[derive(Error, Debug)]
pub enum WrapperError {
    #[error(transparent)]
    Syntax(#[from] ParseError),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Localization(#[from] StorageError),

    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error("pipeline failed with status {status}: {output}")]
    Execution { status: i32, output: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WrapperError {
    /// Captured output of a failed pipeline, if this is an execution failure.
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            WrapperError::Execution { output, .. } => Some(output),
            _ => None,
        }
    }

    /// Exit status of the failing stage, if this is an execution failure.
    pub fn status(&self) -> Option<i32> {
        match self {
            WrapperError::Execution { status, .. } => Some(*status),
            _ => None,
        }
    }
}
