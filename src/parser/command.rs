// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::utils::ParameterMap;

/// One parsed pipeline stage: a tool, one of its actions, and `-key=value` pairs.
///
/// Tool and action are never empty; the parser rejects empty names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    tool: String,
    action: String,
    pairs: ParameterMap,
}

impl Command {
    pub fn new(tool: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            action: action.into(),
            pairs: ParameterMap::new(),
        }
    }

    pub fn add_pair(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.insert(key, value);
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn pairs(&self) -> &ParameterMap {
        &self.pairs
    }
}
