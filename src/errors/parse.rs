// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Syntax errors raised while parsing a control line.

use thiserror::Error;

/// A control line violated the pipeline grammar.
///
/// Parsing is all-or-nothing: any of these aborts the whole line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The token at `position` (1-based) was not what the grammar allows there.
    #[error("syntax error at token {position}: expected {expected}, found {found}")]
    UnexpectedToken {
        position: usize,
        expected: &'static str,
        found: String,
    },

    /// A quoted literal was opened at byte `offset` and never closed.
    #[error("syntax error at offset {offset}: unterminated {quote} quote")]
    UnterminatedQuote { offset: usize, quote: char },
}
