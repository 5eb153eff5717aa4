// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;

use crate::repo::{Operation, Runtime};

/// One tool and its operations, as stored in `<tool>.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    #[serde(default)]
    pub runtime: Runtime,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            runtime: Runtime::default(),
            operations: Vec::new(),
        }
    }

    pub fn with_runtime(mut self, runtime: Runtime) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// The named operation with its runtime resolved against the tool's.
    pub fn find_operation(&self, action: &str) -> Option<Operation> {
        self.operations
            .iter()
            .find(|op| op.name == action)
            .map(|op| {
                let mut op = op.clone();
                op.runtime.get_or_insert(self.runtime);
                op
            })
    }
}
