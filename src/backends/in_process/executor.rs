// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

use crate::backends::in_process::ambient::{StreamRedirect, TerminationRequest};
use crate::backends::in_process::resolver::resolve_entry_point;
use crate::backends::in_process::{EntryPoint, EntryPointError};
use crate::config::consts::ENTRY_POINT_FAILURE_STATUS;
use crate::errors::WrapperError;
use crate::observability::messages::in_process::{EntryPointFailed, TerminationTrapped};
use crate::observability::messages::StructuredLog;
use crate::traits::{EntryPointLookup, StageOutput, ToolExecutor};

/// How an in-process invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// The entry point returned normally.
    Returned,
    /// The entry point asked to terminate the process with this status.
    Terminated(i32),
    /// The entry point returned an error.
    Failed(EntryPointError),
}

impl InvocationOutcome {
    pub fn status(&self) -> i32 {
        match self {
            InvocationOutcome::Returned => 0,
            InvocationOutcome::Terminated(status) => *status,
            InvocationOutcome::Failed(_) => ENTRY_POINT_FAILURE_STATUS,
        }
    }
}

#[derive(Debug)]
pub struct Invocation {
    pub outcome: InvocationOutcome,
    pub stdout: Vec<u8>,
}

/// Invoke `entry_point` with the ambient streams redirected and termination trapped.
///
/// Streams and the panic hook are restored before this returns. A panic other than a
/// termination request is resumed after restoration.
pub fn invoke(
    name: &str,
    entry_point: &EntryPoint,
    args: &[String],
    stdin: Vec<u8>,
    working_dir: &Path,
) -> Invocation {
    let redirect = StreamRedirect::install(stdin, working_dir);
    let result = panic::catch_unwind(AssertUnwindSafe(|| (**entry_point)(args)));
    let stdout = redirect.restore();

    let outcome = match result {
        Ok(Ok(())) => InvocationOutcome::Returned,
        Ok(Err(error)) => {
            EntryPointFailed {
                entry_point: name,
                error: &error,
            }
            .log();
            InvocationOutcome::Failed(error)
        }
        Err(payload) => match TerminationRequest::from_payload(payload.as_ref()) {
            Some(request) => {
                TerminationTrapped {
                    entry_point: name,
                    status: request.status,
                }
                .log();
                InvocationOutcome::Terminated(request.status)
            }
            None => panic::resume_unwind(payload),
        },
    };

    Invocation { outcome, stdout }
}

/// Runs tool stages by invoking a registered entry point inside the host process.
pub struct InProcessExecutor {
    lookup: Arc<dyn EntryPointLookup>,
}

impl InProcessExecutor {
    pub fn new(lookup: Arc<dyn EntryPointLookup>) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl ToolExecutor for InProcessExecutor {
    async fn run(
        &self,
        command_line: &str,
        working_dir: &Path,
        stdin: Vec<u8>,
    ) -> Result<StageOutput, WrapperError> {
        let resolved = resolve_entry_point(command_line, working_dir, self.lookup.as_ref())?;
        let invocation = invoke(
            &resolved.name,
            &resolved.entry_point,
            &resolved.args,
            stdin,
            working_dir,
        );

        let status = invocation.outcome.status();
        let stderr = match &invocation.outcome {
            InvocationOutcome::Failed(error) => {
                format!("{}: {}\n", resolved.name, error).into_bytes()
            }
            _ => Vec::new(),
        };
        Ok(StageOutput::failure(status, invocation.stdout, stderr))
    }

    fn kind(&self) -> &'static str {
        "in_process"
    }
}
