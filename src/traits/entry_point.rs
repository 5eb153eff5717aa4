// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::backends::in_process::EntryPoint;

/// Resolves an in-process entry point by name.
pub trait EntryPointLookup: Send + Sync {
    fn resolve(&self, name: &str) -> Option<EntryPoint>;
}
