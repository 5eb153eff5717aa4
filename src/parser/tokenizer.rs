// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Lazy tokenizer for control lines with one token of push-back.

use std::fmt;

use crate::errors::ParseError;

/// A control-line token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A bare word or a quoted string (quotes stripped).
    Literal { text: String, quoted: bool },
    /// `>`
    Redirect,
    /// `|`
    Pipe,
    /// `-`
    Dash,
    /// `=`
    Equals,
    End,
}

impl Token {
    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Literal { .. })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal { text, quoted: true } => write!(f, "quoted literal \"{}\"", text),
            Token::Literal { text, quoted: false } => write!(f, "literal '{}'", text),
            Token::Redirect => write!(f, "'>'"),
            Token::Pipe => write!(f, "'|'"),
            Token::Dash => write!(f, "'-'"),
            Token::Equals => write!(f, "'='"),
            Token::End => write!(f, "end of input"),
        }
    }
}

fn is_operator(c: char) -> bool {
    matches!(c, '>' | '|' | '-' | '=')
}

pub struct Tokenizer<'a> {
    input: &'a str,
    offset: usize,
    consumed: usize,
    current: Token,
    pushed_back: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            consumed: 0,
            current: Token::End,
            pushed_back: false,
        }
    }

    /// Advance and return the new current token.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        if self.pushed_back {
            self.pushed_back = false;
            return Ok(self.current.clone());
        }
        self.current = self.scan()?;
        self.consumed += 1;
        Ok(self.current.clone())
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Make the next call to [`next_token`](Self::next_token) return the current token again.
    pub fn push_back(&mut self) {
        self.pushed_back = true;
    }

    /// 1-based index of the current token.
    pub fn position(&self) -> usize {
        if self.pushed_back {
            self.consumed.saturating_sub(1)
        } else {
            self.consumed
        }
    }

    fn scan(&mut self) -> Result<Token, ParseError> {
        let input = self.input;
        let rest = &input[self.offset..];
        let trimmed = rest.trim_start();
        self.offset += rest.len() - trimmed.len();

        let Some(first) = trimmed.chars().next() else {
            return Ok(Token::End);
        };

        let token = match first {
            '>' => Token::Redirect,
            '|' => Token::Pipe,
            '-' => Token::Dash,
            '=' => Token::Equals,
            '"' | '\'' => {
                let body = &trimmed[1..];
                let end = body.find(first).ok_or(ParseError::UnterminatedQuote {
                    offset: self.offset,
                    quote: first,
                })?;
                self.offset += end + 2;
                return Ok(Token::Literal {
                    text: body[..end].to_string(),
                    quoted: true,
                });
            }
            _ => {
                let end = trimmed
                    .find(|c: char| c.is_whitespace() || is_operator(c))
                    .unwrap_or(trimmed.len());
                self.offset += end;
                return Ok(Token::Literal {
                    text: trimmed[..end].to_string(),
                    quoted: false,
                });
            }
        };

        self.offset += first.len_utf8();
        Ok(token)
    }
}
