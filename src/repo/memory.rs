// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::errors::ResolutionError;
use crate::repo::{Operation, ToolSpec};
use crate::traits::ToolRepository;

/// Tool repository held entirely in memory, for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryToolRepository {
    tools: HashMap<String, ToolSpec>,
}

impl InMemoryToolRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tool(mut self, spec: ToolSpec) -> Self {
        self.insert(spec);
        self
    }

    /// Add or replace a tool.
    pub fn insert(&mut self, spec: ToolSpec) {
        self.tools.insert(spec.name.clone(), spec);
    }
}

impl ToolRepository for InMemoryToolRepository {
    fn resolve(&self, tool: &str, action: &str) -> Result<Operation, ResolutionError> {
        let spec = self
            .tools
            .get(tool)
            .ok_or_else(|| ResolutionError::ToolNotFound {
                tool: tool.to_string(),
            })?;

        spec.find_operation(action)
            .ok_or_else(|| ResolutionError::OperationNotFound {
                tool: tool.to_string(),
                action: action.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repository() -> InMemoryToolRepository {
        InMemoryToolRepository::new()
            .with_tool(ToolSpec::new("text").with_operation(Operation::new("cat", "cat")))
    }

    #[test]
    fn test_resolve_known_operation() {
        let op = repository().resolve("text", "cat").unwrap();
        assert_eq!(op.command, "cat");
    }

    #[test]
    fn test_resolve_failures() {
        let repo = repository();
        assert_eq!(
            repo.resolve("nope", "cat"),
            Err(ResolutionError::ToolNotFound {
                tool: "nope".to_string()
            })
        );
        assert_eq!(
            repo.resolve("text", "nope"),
            Err(ResolutionError::OperationNotFound {
                tool: "text".to_string(),
                action: "nope".to_string()
            })
        );
    }

    #[test]
    fn test_insert_replaces_tool() {
        let mut repo = repository();
        repo.insert(ToolSpec::new("text").with_operation(Operation::new("cat", "cat -n")));
        assert_eq!(repo.resolve("text", "cat").unwrap().command, "cat -n");
    }
}
