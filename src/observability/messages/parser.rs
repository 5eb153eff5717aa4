// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for control line parsing.

use std::fmt::{Display, Formatter};

use super::StructuredLog;

/// A control line was parsed successfully.
///
/// # Log Level
/// `debug!` - Diagnostic detail
///
/// # Example
/// ```
/// use pipewrap::observability::messages::parser::ControlLineParsed;
///
/// let msg = ControlLineParsed {
///     control_line: "in.txt > file identify",
///     command_count: 1,
///     stdin_file: Some("in.txt"),
///     stdout_file: None,
/// };
///
/// assert!(msg.to_string().contains("1 command"));
/// ```
pub struct ControlLineParsed<'a> {
    pub control_line: &'a str,
    pub command_count: usize,
    pub stdin_file: Option<&'a str>,
    pub stdout_file: Option<&'a str>,
}

impl Display for ControlLineParsed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Parsed control line into {} command(s): stdin={}, stdout={}",
            self.command_count,
            self.stdin_file.unwrap_or("-"),
            self.stdout_file.unwrap_or("-")
        )
    }
}

impl StructuredLog for ControlLineParsed<'_> {
    fn log(&self) {
        tracing::debug!(
            control_line = self.control_line,
            command_count = self.command_count,
            stdin_file = self.stdin_file,
            stdout_file = self.stdout_file,
            "{}", self
        );
    }
}

/// A control line was rejected by the parser.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ControlLineRejected<'a> {
    pub control_line: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ControlLineRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Rejected control line '{}': {}", self.control_line, self.error)
    }
}

impl StructuredLog for ControlLineRejected<'_> {
    fn log(&self) {
        tracing::error!(
            control_line = self.control_line,
            error = %self.error,
            "{}", self
        );
    }
}
