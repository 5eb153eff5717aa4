// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::collections::HashSet;

use crate::errors::ConfigError;
use crate::utils::template::placeholders;

/// How a tool stage runs its command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Runtime {
    /// `sh -c <command>` in the working directory.
    #[default]
    Process,
    /// Entry point resolved from the command and invoked inside the host process.
    InProcess,
}

/// Which of an operation's parameter lists a name was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterRole {
    InputFile,
    OutputFile,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: Option<String>,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            default: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// The resolved template and parameter roles of one tool action.
///
/// # Example
/// ```
/// use pipewrap::repo::{Operation, ParameterRole, ParameterSpec};
///
/// let op = Operation::new("sort", "sort ${flags} ${input} > ${output}")
///     .with_input(ParameterSpec::new("input").required())
///     .with_output(ParameterSpec::new("output"))
///     .with_parameter(ParameterSpec::new("flags").with_default("-u"));
///
/// assert_eq!(op.role_of("input"), Some(ParameterRole::InputFile));
/// assert_eq!(op.role_of("flags"), Some(ParameterRole::Other));
/// assert!(op.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Operation {
    pub name: String,
    pub command: String,
    /// Unset means "inherit from the tool".
    #[serde(default)]
    pub runtime: Option<Runtime>,
    #[serde(default)]
    pub inputs: Vec<ParameterSpec>,
    #[serde(default)]
    pub outputs: Vec<ParameterSpec>,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
}

impl Operation {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            runtime: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
            parameters: Vec::new(),
        }
    }

    pub fn with_runtime(mut self, runtime: Runtime) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn with_input(mut self, spec: ParameterSpec) -> Self {
        self.inputs.push(spec);
        self
    }

    pub fn with_output(mut self, spec: ParameterSpec) -> Self {
        self.outputs.push(spec);
        self
    }

    pub fn with_parameter(mut self, spec: ParameterSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    pub fn runtime(&self) -> Runtime {
        self.runtime.unwrap_or_default()
    }

    /// Every declared parameter with its role, inputs first, then outputs, then others.
    pub fn declared(&self) -> impl Iterator<Item = (&ParameterSpec, ParameterRole)> {
        let inputs = self.inputs.iter().map(|p| (p, ParameterRole::InputFile));
        let outputs = self.outputs.iter().map(|p| (p, ParameterRole::OutputFile));
        let others = self.parameters.iter().map(|p| (p, ParameterRole::Other));
        inputs.chain(outputs).chain(others)
    }

    pub fn role_of(&self, name: &str) -> Option<ParameterRole> {
        self.declared()
            .find(|(spec, _)| spec.name == name)
            .map(|(_, role)| role)
    }

    /// Structural checks run when a stage is initialized.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.command.trim().is_empty() {
            return Err(ConfigError::EmptyCommand {
                operation: self.name.clone(),
            });
        }

        let mut seen = HashSet::new();
        for (spec, _) in self.declared() {
            if !seen.insert(spec.name.as_str()) {
                return Err(ConfigError::DuplicateParameter {
                    operation: self.name.clone(),
                    parameter: spec.name.clone(),
                });
            }
        }

        for placeholder in placeholders(&self.command) {
            if !seen.contains(placeholder) {
                return Err(ConfigError::UndeclaredPlaceholder {
                    operation: self.name.clone(),
                    placeholder: placeholder.to_string(),
                });
            }
        }

        Ok(())
    }
}
