// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::WrapperError;

/// What a stage produced: its status plus captured standard output and error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageOutput {
    pub status: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl StageOutput {
    pub fn success(stdout: Vec<u8>) -> Self {
        Self {
            status: 0,
            stdout,
            stderr: Vec::new(),
        }
    }

    pub fn failure(status: i32, stdout: Vec<u8>, stderr: Vec<u8>) -> Self {
        Self {
            status,
            stdout,
            stderr,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

/// One stage of a processor chain.
///
/// Stages are executed strictly in order. Each receives the complete standard output of
/// the previous stage as its standard input; the first stage receives nothing.
#[async_trait]
pub trait Processor: Send + Sync {
    /// Label used in logs and failure reports.
    fn name(&self) -> &str;

    /// Check the stage is usable before anything is executed.
    fn initialize(&mut self) -> Result<(), WrapperError> {
        Ok(())
    }

    /// Run the stage to completion.
    ///
    /// A non-zero `status` in the returned output is a pipeline failure, not an `Err`.
    /// `Err` is reserved for failures to run the stage at all.
    async fn execute(&mut self, stdin: Vec<u8>) -> Result<StageOutput, WrapperError>;

    /// Status of the last completed execution, `None` if the stage has not run.
    fn wait_for(&self) -> Option<i32>;

    /// Whether this stage runs a resolved tool operation (as opposed to a stream stage).
    fn is_tool(&self) -> bool {
        false
    }
}
