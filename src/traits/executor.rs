// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::path::Path;

use crate::errors::WrapperError;
use crate::traits::StageOutput;

/// Runs the substituted command line of a tool stage.
///
/// Implementations: [`ProcessExecutor`](crate::backends::ProcessExecutor) spawns a shell,
/// [`InProcessExecutor`](crate::backends::in_process::InProcessExecutor) invokes a
/// registered entry point inside the host process.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn run(
        &self,
        command_line: &str,
        working_dir: &Path,
        stdin: Vec<u8>,
    ) -> Result<StageOutput, WrapperError>;

    /// Short label for logs, e.g. `"process"`.
    fn kind(&self) -> &'static str;
}
