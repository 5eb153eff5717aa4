// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Stage implementations for the processor chain.
//!
//! # Available Backends
//!
//! ## Tool stages
//! [`ToolProcessor`] runs one resolved operation through a [`ToolExecutor`](crate::traits::ToolExecutor):
//! - **[`ProcessExecutor`]**: `sh -c` child process in the working directory
//! - **[`in_process::InProcessExecutor`]**: entry point invoked inside the host process,
//!   with ambient streams redirected and termination trapped
//!
//! ## Stream stages
//! [`StreamSource`] feeds a stdin file into the chain head; [`StreamSink`] captures the
//! chain tail into a buffer or a stdout file.
//!
//! ## Stub Backend (Test-Only)
//! - **StubProcessor**: appends a suffix or fails with a fixed status
//! - **RecordingExecutor**: records substituted command lines
//!
//! # Example
//! ```rust
//! use pipewrap::backends::{ProcessExecutor, ToolProcessor};
//! use pipewrap::repo::{Operation, ParameterSpec};
//! use pipewrap::utils::ParameterMap;
//! use std::sync::Arc;
//!
//! let op = Operation::new("head", "head -n ${lines} ${input}")
//!     .with_input(ParameterSpec::new("input").required())
//!     .with_parameter(ParameterSpec::new("lines").with_default("10"));
//!
//! let mut stage = ToolProcessor::new("text", "head", op, Arc::new(ProcessExecutor::default()));
//! let pairs: ParameterMap = [("input", "log.txt")].into_iter().collect();
//! stage.set_parameters(&pairs)?;
//!
//! assert_eq!(stage.command_line(), "head -n 10 log.txt");
//! # Ok::<(), pipewrap::errors::ConfigError>(())
//! ```

pub mod in_process;
mod process;
mod stream;
#[cfg(test)]
pub mod stub;
mod tool;

pub use process::ProcessExecutor;
pub use stream::{SinkTarget, StreamSink, StreamSource};
pub use tool::ToolProcessor;
