// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::backends::in_process::builtins;
use crate::traits::EntryPointLookup;

/// Error returned by an entry point that failed without requesting termination.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EntryPointError {
    message: String,
}

impl EntryPointError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for EntryPointError {
    fn from(e: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", e))
    }
}

impl From<serde_json::Error> for EntryPointError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("serialization error: {}", e))
    }
}

/// An invocable entry point. Receives the arguments that followed it on the command line.
pub type EntryPoint = Arc<dyn Fn(&[String]) -> Result<(), EntryPointError> + Send + Sync>;

/// Name to entry point table.
#[derive(Clone, Default)]
pub struct EntryPointRegistry {
    entries: HashMap<String, EntryPoint>,
}

impl EntryPointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the `builtin.*` text tools.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtins::register(&mut registry);
        registry
    }

    pub fn register<F>(&mut self, name: impl Into<String>, entry_point: F)
    where
        F: Fn(&[String]) -> Result<(), EntryPointError> + Send + Sync + 'static,
    {
        self.entries.insert(name.into(), Arc::new(entry_point));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl EntryPointLookup for EntryPointRegistry {
    fn resolve(&self, name: &str) -> Option<EntryPoint> {
        self.entries.get(name).cloned()
    }
}

impl fmt::Debug for EntryPointRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPointRegistry")
            .field("entry_points", &self.names())
            .finish()
    }
}
