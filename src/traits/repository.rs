// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ResolutionError;
use crate::repo::Operation;

/// Maps a tool and action to the operation that implements it.
pub trait ToolRepository: Send + Sync {
    /// Fails with [`ResolutionError::ToolNotFound`] or [`ResolutionError::OperationNotFound`].
    fn resolve(&self, tool: &str, action: &str) -> Result<Operation, ResolutionError>;
}
