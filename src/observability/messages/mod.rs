// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Messages are organized by subsystem:
//!
//! * `parser` - control line parsing
//! * `chain` - processor chain construction and stage lifecycle
//! * `storage` - localization and delocalization of file references
//! * `in_process` - entry point resolution, stream redirection and trapped terminations

use tracing::Span;

pub mod chain;
pub mod in_process;
pub mod parser;
pub mod storage;

/// Emits a message at its documented level with structured fields.
pub trait StructuredLog {
    fn log(&self);

    /// A span for the unit of work this message starts. Messages that do not start
    /// anything use the current span.
    fn span(&self, _name: &str) -> Span {
        Span::current()
    }
}
