// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::time::Instant;
use tracing::Instrument;

use crate::errors::WrapperError;
use crate::observability::messages::chain::{
    PipelineCompleted, PipelineStarted, StageCompleted, StageFailed, StageStarted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::Processor;

/// Result of running a chain to completion or to its first failing stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainOutcome {
    /// 0, or the status of the stage that failed.
    pub status: i32,
    /// Output of the last stage that ran.
    pub stdout: Vec<u8>,
    /// Standard error of every stage that ran, in order.
    pub stderr: Vec<u8>,
    pub failed_stage: Option<String>,
}

impl ChainOutcome {
    pub fn is_success(&self) -> bool {
        self.status == 0
    }

    /// Captured stdout followed by captured stderr, as text.
    pub fn captured_text(&self) -> String {
        let mut text = String::from_utf8_lossy(&self.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&self.stderr));
        text
    }
}

/// An ordered list of stages run front to back.
///
/// Stage *i* runs to completion before stage *i + 1* starts, and its complete standard
/// output is the next stage's standard input. The first non-zero status stops the chain.
#[derive(Default)]
pub struct ProcessorChain {
    stages: Vec<Box<dyn Processor>>,
}

impl ProcessorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage after the current tail.
    pub fn push(&mut self, stage: Box<dyn Processor>) {
        self.stages.push(stage);
    }

    /// Insert a stage before the current head.
    pub fn prepend(&mut self, stage: Box<dyn Processor>) {
        self.stages.insert(0, stage);
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    pub async fn execute(&mut self) -> Result<ChainOutcome, WrapperError> {
        let started = PipelineStarted {
            stage_count: self.stages.len(),
            tool_count: self.stages.iter().filter(|stage| stage.is_tool()).count(),
        };
        let span = started.span("chain_execution");
        started.log();

        self.run_stages().instrument(span).await
    }

    async fn run_stages(&mut self) -> Result<ChainOutcome, WrapperError> {
        let pipeline_start = Instant::now();
        let stage_count = self.stages.len();
        let mut data = Vec::new();
        let mut stderr = Vec::new();

        for (cursor, stage) in self.stages.iter_mut().enumerate() {
            let position = cursor + 1;
            let start_msg = StageStarted {
                stage: stage.name(),
                position,
                input_size: data.len(),
            };
            let span = start_msg.span("stage_execution");
            start_msg.log();
            let stage_start = Instant::now();

            let output = stage
                .execute(std::mem::take(&mut data))
                .instrument(span)
                .await?;
            let status = stage.wait_for().unwrap_or(output.status);
            stderr.extend_from_slice(&output.stderr);

            if status != 0 {
                StageFailed {
                    stage: stage.name(),
                    position,
                    status,
                }
                .log();
                return Ok(ChainOutcome {
                    status,
                    stdout: output.stdout,
                    stderr,
                    failed_stage: Some(stage.name().to_string()),
                });
            }

            StageCompleted {
                stage: stage.name(),
                position,
                output_size: output.stdout.len(),
                duration: stage_start.elapsed(),
            }
            .log();
            data = output.stdout;
        }

        PipelineCompleted {
            stage_count,
            output_size: data.len(),
            duration: pipeline_start.elapsed(),
        }
        .log();

        Ok(ChainOutcome {
            status: 0,
            stdout: data,
            stderr,
            failed_stage: None,
        })
    }
}
