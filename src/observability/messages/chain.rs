// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for processor chain construction and stage execution.
//!
//! This module contains message types for logging events related to:
//! * Pipeline lifecycle (start, completion, failure)
//! * Individual stage execution
//! * Parameter handling while building tool stages
//! * Delocalization decisions after the chain ran

use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

use super::StructuredLog;

/// Pipeline execution started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use pipewrap::observability::messages::chain::PipelineStarted;
///
/// let msg = PipelineStarted {
///     stage_count: 4,
///     tool_count: 2,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct PipelineStarted {
    pub stage_count: usize,
    pub tool_count: usize,
}

impl Display for PipelineStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting pipeline: {} stages ({} tool stages)",
            self.stage_count, self.tool_count
        )
    }
}

impl StructuredLog for PipelineStarted {
    fn log(&self) {
        tracing::info!(
            stage_count = self.stage_count,
            tool_count = self.tool_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline",
            span_name = name,
            stage_count = self.stage_count,
            tool_count = self.tool_count,
        )
    }
}

/// Pipeline finished with every stage reporting status 0.
///
/// # Log Level
/// `info!` - Important operational event
pub struct PipelineCompleted {
    pub stage_count: usize,
    pub output_size: usize,
    pub duration: Duration,
}

impl Display for PipelineCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline completed: {} stages, output={} bytes, duration={:?}",
            self.stage_count, self.output_size, self.duration
        )
    }
}

impl StructuredLog for PipelineCompleted {
    fn log(&self) {
        tracing::info!(
            stage_count = self.stage_count,
            output_size = self.output_size,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }
}

/// Stage execution started.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct StageStarted<'a> {
    pub stage: &'a str,
    pub position: usize,
    pub input_size: usize,
}

impl Display for StageStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stage {} '{}' started: input_size={} bytes",
            self.position, self.stage, self.input_size
        )
    }
}

impl StructuredLog for StageStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            stage = self.stage,
            position = self.position,
            input_size = self.input_size,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "stage",
            span_name = name,
            stage = self.stage,
            position = self.position,
        )
    }
}

/// Stage finished with status 0.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct StageCompleted<'a> {
    pub stage: &'a str,
    pub position: usize,
    pub output_size: usize,
    pub duration: Duration,
}

impl Display for StageCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stage {} '{}' completed: output={} bytes, duration={:?}",
            self.position, self.stage, self.output_size, self.duration
        )
    }
}

impl StructuredLog for StageCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            stage = self.stage,
            position = self.position,
            output_size = self.output_size,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }
}

/// Stage reported a non-zero status; the rest of the chain is not executed.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct StageFailed<'a> {
    pub stage: &'a str,
    pub position: usize,
    pub status: i32,
}

impl Display for StageFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Stage {} '{}' failed with status {}",
            self.position, self.stage, self.status
        )
    }
}

impl StructuredLog for StageFailed<'_> {
    fn log(&self) {
        tracing::error!(
            stage = self.stage,
            position = self.position,
            status = self.status,
            "{}", self
        );
    }
}

/// A tool stage was configured from a resolved operation.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ToolStageConfigured<'a> {
    pub tool: &'a str,
    pub action: &'a str,
    pub executor: &'a str,
    pub input_files: usize,
    pub output_files: usize,
}

impl Display for ToolStageConfigured<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Configured {} stage '{}:{}' with {} input file(s) and {} output file(s)",
            self.executor, self.tool, self.action, self.input_files, self.output_files
        )
    }
}

impl StructuredLog for ToolStageConfigured<'_> {
    fn log(&self) {
        tracing::info!(
            tool = self.tool,
            action = self.action,
            executor = self.executor,
            input_files = self.input_files,
            output_files = self.output_files,
            "{}", self
        );
    }
}

/// The substituted command line of a tool stage.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct CommandSubstituted<'a> {
    pub stage: &'a str,
    pub command_line: &'a str,
}

impl Display for CommandSubstituted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Stage '{}' command: {}", self.stage, self.command_line)
    }
}

impl StructuredLog for CommandSubstituted<'_> {
    fn log(&self) {
        tracing::debug!(
            stage = self.stage,
            command_line = self.command_line,
            "{}", self
        );
    }
}

/// A control-line parameter is not declared by the operation; passed through as-is.
///
/// # Log Level
/// `warn!` - Potential issue or degraded behavior
pub struct UndeclaredParameter<'a> {
    pub operation: &'a str,
    pub parameter: &'a str,
}

impl Display for UndeclaredParameter<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Parameter '{}' is not declared by operation '{}', passing it through",
            self.parameter, self.operation
        )
    }
}

impl StructuredLog for UndeclaredParameter<'_> {
    fn log(&self) {
        tracing::warn!(
            operation = self.operation,
            parameter = self.parameter,
            "{}", self
        );
    }
}

/// Output files were not published because the pipeline failed.
///
/// # Log Level
/// `warn!` - Potential issue or degraded behavior
pub struct DelocalizationSkipped {
    pub status: i32,
    pub pending_outputs: usize,
}

impl Display for DelocalizationSkipped {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline failed with status {}: skipping delocalization of {} output parameter(s)",
            self.status, self.pending_outputs
        )
    }
}

impl StructuredLog for DelocalizationSkipped {
    fn log(&self) {
        tracing::warn!(
            status = self.status,
            pending_outputs = self.pending_outputs,
            "{}", self
        );
    }
}
