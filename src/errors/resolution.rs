// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors resolving tools, operations and in-process entry points.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// No tool specification exists under this name.
    #[error("tool '{tool}' not found in repository")]
    ToolNotFound { tool: String },

    /// The tool exists but declares no such action.
    #[error("operation '{action}' not found for tool '{tool}'")]
    OperationNotFound { tool: String, action: String },

    /// A tool specification file exists but cannot be used.
    #[error("invalid tool specification '{path}': {reason}")]
    InvalidToolSpec { path: String, reason: String },

    /// Backward scan of an in-process command found nothing loadable.
    #[error("no loadable entry point found in command '{command}'")]
    EntryPointNotFound { command: String },

    /// An archive named in an in-process command could not be inspected.
    #[error("cannot read archive '{archive}': {reason}")]
    ArchiveUnreadable { archive: String, reason: String },
}
