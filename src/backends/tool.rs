// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::{ConfigError, WrapperError};
use crate::observability::messages::chain::{CommandSubstituted, UndeclaredParameter};
use crate::observability::messages::StructuredLog;
use crate::repo::{Operation, ParameterRole};
use crate::traits::{Processor, StageOutput, ToolExecutor};
use crate::utils::template::substitute;
use crate::utils::ParameterMap;

/// A chain stage running one resolved tool operation.
///
/// Parameters are split by the role the operation declares for them. File parameters are
/// replaced with their localized values before execution; the command template is then
/// substituted with input-file, output-file and other parameters, in that order.
pub struct ToolProcessor {
    label: String,
    operation: Operation,
    executor: Arc<dyn ToolExecutor>,
    input_files: ParameterMap,
    output_files: ParameterMap,
    others: ParameterMap,
    working_dir: PathBuf,
    status: Option<i32>,
}

impl ToolProcessor {
    pub fn new(
        tool: &str,
        action: &str,
        operation: Operation,
        executor: Arc<dyn ToolExecutor>,
    ) -> Self {
        Self {
            label: format!("{}:{}", tool, action),
            operation,
            executor,
            input_files: ParameterMap::new(),
            output_files: ParameterMap::new(),
            others: ParameterMap::new(),
            working_dir: PathBuf::from("."),
            status: None,
        }
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn executor_kind(&self) -> &'static str {
        self.executor.kind()
    }

    /// Assign the control-line pairs, then fill in declared defaults.
    ///
    /// Pairs the operation does not declare are kept as other parameters.
    pub fn set_parameters(&mut self, pairs: &ParameterMap) -> Result<(), ConfigError> {
        self.input_files = ParameterMap::new();
        self.output_files = ParameterMap::new();
        self.others = ParameterMap::new();

        for (key, value) in pairs.iter() {
            match self.operation.role_of(key) {
                Some(role) => self.slot(role).insert(key, value),
                None => {
                    UndeclaredParameter {
                        operation: &self.label,
                        parameter: key,
                    }
                    .log();
                    self.others.insert(key, value);
                }
            }
        }

        let declared: Vec<(String, Option<String>, bool, ParameterRole)> = self
            .operation
            .declared()
            .map(|(spec, role)| (spec.name.clone(), spec.default.clone(), spec.required, role))
            .collect();

        for (name, default, required, role) in declared {
            if pairs.contains_key(&name) {
                continue;
            }
            match default {
                Some(value) => self.slot(role).insert(name, value),
                None if required => {
                    return Err(ConfigError::MissingParameter {
                        operation: self.label.clone(),
                        parameter: name,
                    })
                }
                None => {}
            }
        }
        Ok(())
    }

    fn slot(&mut self, role: ParameterRole) -> &mut ParameterMap {
        match role {
            ParameterRole::InputFile => &mut self.input_files,
            ParameterRole::OutputFile => &mut self.output_files,
            ParameterRole::Other => &mut self.others,
        }
    }

    pub fn set_working_dir(&mut self, working_dir: impl AsRef<Path>) {
        self.working_dir = working_dir.as_ref().to_path_buf();
    }

    pub fn input_file_parameters(&self) -> &ParameterMap {
        &self.input_files
    }

    pub fn output_file_parameters(&self) -> &ParameterMap {
        &self.output_files
    }

    pub fn other_parameters(&self) -> &ParameterMap {
        &self.others
    }

    pub fn set_input_file_parameters(&mut self, params: ParameterMap) {
        self.input_files = params;
    }

    pub fn set_output_file_parameters(&mut self, params: ParameterMap) {
        self.output_files = params;
    }

    /// The command template with every parameter substituted.
    ///
    /// Optional parameters without a value or default substitute as empty strings.
    pub fn command_line(&self) -> String {
        let layers = [&self.input_files, &self.output_files, &self.others];
        let unset: ParameterMap = self
            .operation
            .declared()
            .map(|(spec, _)| spec.name.as_str())
            .filter(|name| !layers.iter().any(|layer| layer.contains_key(name)))
            .map(|name| (name, ""))
            .collect();

        substitute(
            &self.operation.command,
            &[layers[0], layers[1], layers[2], &unset],
        )
    }
}

#[async_trait]
impl Processor for ToolProcessor {
    fn name(&self) -> &str {
        &self.label
    }

    fn initialize(&mut self) -> Result<(), WrapperError> {
        self.operation.validate()?;
        Ok(())
    }

    async fn execute(&mut self, stdin: Vec<u8>) -> Result<StageOutput, WrapperError> {
        let command_line = self.command_line();
        CommandSubstituted {
            stage: &self.label,
            command_line: &command_line,
        }
        .log();

        let output = self
            .executor
            .run(&command_line, &self.working_dir, stdin)
            .await?;
        self.status = Some(output.status);
        Ok(output)
    }

    fn wait_for(&self) -> Option<i32> {
        self.status
    }

    fn is_tool(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::RecordingExecutor;
    use crate::repo::ParameterSpec;

    fn operation() -> Operation {
        Operation::new("merge", "merge ${in} -o ${out} --mode ${mode} ${tag}")
            .with_input(ParameterSpec::new("in").required())
            .with_output(ParameterSpec::new("out"))
            .with_parameter(ParameterSpec::new("mode").with_default("fast"))
            .with_parameter(ParameterSpec::new("tag"))
    }

    fn stage(executor: Arc<RecordingExecutor>) -> ToolProcessor {
        ToolProcessor::new("tool", "merge", operation(), executor)
    }

    fn pairs(items: &[(&str, &str)]) -> ParameterMap {
        items.iter().copied().collect()
    }

    #[test]
    fn test_parameters_are_split_by_role() {
        let mut stage = stage(Arc::new(RecordingExecutor::default()));
        stage
            .set_parameters(&pairs(&[("out", "o.txt"), ("in", "a b"), ("extra", "1")]))
            .unwrap();

        assert_eq!(stage.input_file_parameters(), &pairs(&[("in", "a b")]));
        assert_eq!(stage.output_file_parameters(), &pairs(&[("out", "o.txt")]));
        assert_eq!(
            stage.other_parameters(),
            &pairs(&[("extra", "1"), ("mode", "fast")])
        );
    }

    #[test]
    fn test_control_line_overrides_default() {
        let mut stage = stage(Arc::new(RecordingExecutor::default()));
        stage
            .set_parameters(&pairs(&[("in", "a"), ("mode", "slow")]))
            .unwrap();
        assert_eq!(stage.other_parameters().get("mode"), Some("slow"));
    }

    #[test]
    fn test_missing_required_parameter() {
        let mut stage = stage(Arc::new(RecordingExecutor::default()));
        assert!(matches!(
            stage.set_parameters(&pairs(&[("out", "o")])),
            Err(ConfigError::MissingParameter { parameter, .. }) if parameter == "in"
        ));
    }

    #[test]
    fn test_command_line_uses_localized_values() {
        let mut stage = stage(Arc::new(RecordingExecutor::default()));
        stage
            .set_parameters(&pairs(&[("in", "hdfs://a"), ("out", "hdfs://b")]))
            .unwrap();
        stage.set_input_file_parameters(pairs(&[("in", "hdfs/a")]));
        stage.set_output_file_parameters(pairs(&[("out", "hdfs/b")]));

        assert_eq!(stage.command_line(), "merge hdfs/a -o hdfs/b --mode fast ");
    }

    #[test]
    fn test_placeholder_text_inside_a_value_is_kept() {
        let mut stage = stage(Arc::new(RecordingExecutor::default()));
        stage
            .set_parameters(&pairs(&[("in", "a"), ("mode", "'${tag}'")]))
            .unwrap();

        assert_eq!(stage.command_line(), "merge a -o  --mode '${tag}' ");
    }

    #[tokio::test]
    async fn test_execute_runs_substituted_command_in_working_dir() {
        let executor = Arc::new(RecordingExecutor::default());
        let mut stage = stage(Arc::clone(&executor));
        stage.set_working_dir("/work");
        stage
            .set_parameters(&pairs(&[("in", "x"), ("out", "y"), ("tag", "t")]))
            .unwrap();
        stage.initialize().unwrap();
        assert_eq!(stage.wait_for(), None);

        let output = stage.execute(b"piped".to_vec()).await.unwrap();

        assert_eq!(output.stdout, b"piped");
        assert_eq!(stage.wait_for(), Some(0));
        assert_eq!(
            executor.calls(),
            vec![(
                "merge x -o y --mode fast t".to_string(),
                PathBuf::from("/work"),
                b"piped".to_vec()
            )]
        );
    }

    #[test]
    fn test_initialize_rejects_invalid_operation() {
        let mut stage = ToolProcessor::new(
            "tool",
            "bad",
            Operation::new("bad", "run ${nope}"),
            Arc::new(RecordingExecutor::default()),
        );
        assert!(matches!(
            stage.initialize(),
            Err(WrapperError::Configuration(ConfigError::UndeclaredPlaceholder { .. }))
        ));
    }
}
