// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Test doubles for chain and stage tests.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::errors::WrapperError;
use crate::traits::{Processor, StageOutput, ToolExecutor};

/// A stage that appends a suffix to its input, or fails with a fixed status.
pub struct StubProcessor {
    pub id: String,
    suffix: Vec<u8>,
    status: i32,
    executions: Arc<AtomicUsize>,
    last_status: Option<i32>,
}

impl StubProcessor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            suffix: Vec::new(),
            status: 0,
            executions: Arc::new(AtomicUsize::new(0)),
            last_status: None,
        }
    }

    pub fn appending(mut self, suffix: &str) -> Self {
        self.suffix = suffix.as_bytes().to_vec();
        self
    }

    pub fn failing(mut self, status: i32) -> Self {
        self.status = status;
        self
    }

    /// Counter shared with the stage, readable after the stage moved into a chain.
    pub fn executions(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.executions)
    }
}

#[async_trait]
impl Processor for StubProcessor {
    fn name(&self) -> &str {
        &self.id
    }

    async fn execute(&mut self, mut stdin: Vec<u8>) -> Result<StageOutput, WrapperError> {
        self.executions.fetch_add(1, Ordering::SeqCst);
        stdin.extend_from_slice(&self.suffix);
        self.last_status = Some(self.status);
        if self.status == 0 {
            Ok(StageOutput::success(stdin))
        } else {
            Ok(StageOutput::failure(
                self.status,
                stdin,
                format!("{} failed\n", self.id).into_bytes(),
            ))
        }
    }

    fn wait_for(&self) -> Option<i32> {
        self.last_status
    }

    fn is_tool(&self) -> bool {
        true
    }
}

/// An executor that records each call and echoes stdin back as stdout.
#[derive(Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<(String, PathBuf, Vec<u8>)>>,
}

impl RecordingExecutor {
    pub fn calls(&self) -> Vec<(String, PathBuf, Vec<u8>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolExecutor for RecordingExecutor {
    async fn run(
        &self,
        command_line: &str,
        working_dir: &Path,
        stdin: Vec<u8>,
    ) -> Result<StageOutput, WrapperError> {
        self.calls.lock().unwrap().push((
            command_line.to_string(),
            working_dir.to_path_buf(),
            stdin.clone(),
        ));
        Ok(StageOutput::success(stdin))
    }

    fn kind(&self) -> &'static str {
        "recording"
    }
}
