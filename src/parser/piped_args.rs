// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Recursive-descent parser for piped control lines.
//!
//! # Grammar
//!
//! ```text
//! S       = literal R
//! R       = '>' literal R2        first literal is the stdin file, second the first tool
//!         | R2                    first literal is the first tool
//! R2      = literal PAIR* ('|' COMMAND)* ('>' literal)?
//! PAIR    = '-' literal '=' literal
//! COMMAND = literal literal PAIR*
//! ```
//!
//! `R` is the only place that needs lookahead: after the first literal one more token is
//! read, and if it is not `'>'` it is pushed back and the literal becomes the tool name.
//! Every other production is chosen by the current token alone.

use crate::errors::ParseError;
use crate::observability::messages::{parser::ControlLineParsed, StructuredLog};
use crate::parser::tokenizer::{Token, Tokenizer};
use crate::parser::Command;

/// Result of parsing one control line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipedArgs {
    stdin_file: String,
    stdout_file: String,
    commands: Vec<Command>,
}

impl PipedArgs {
    /// File named before the first `>`; `None` when absent or empty.
    pub fn stdin_file(&self) -> Option<&str> {
        non_empty(&self.stdin_file)
    }

    /// File named after the last `>`; `None` when absent or empty.
    pub fn stdout_file(&self) -> Option<&str> {
        non_empty(&self.stdout_file)
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Parse a control line into stdin/stdout references and the ordered commands.
///
/// # Examples
/// ```
/// use pipewrap::parser::parse;
///
/// let args = parse(r#"in.txt > fits validate -level="strict mode" | report json > out.txt"#)?;
///
/// assert_eq!(args.stdin_file(), Some("in.txt"));
/// assert_eq!(args.stdout_file(), Some("out.txt"));
/// assert_eq!(args.commands().len(), 2);
/// assert_eq!(args.commands()[0].pairs().get("level"), Some("strict mode"));
/// # Ok::<(), pipewrap::errors::ParseError>(())
/// ```
pub fn parse(control_line: &str) -> Result<PipedArgs, ParseError> {
    let args = PipedArgsParser::new(control_line).parse()?;
    ControlLineParsed {
        control_line,
        command_count: args.commands.len(),
        stdin_file: args.stdin_file(),
        stdout_file: args.stdout_file(),
    }
    .log();
    Ok(args)
}

pub struct PipedArgsParser<'a> {
    tokenizer: Tokenizer<'a>,
}

impl<'a> PipedArgsParser<'a> {
    pub fn new(control_line: &'a str) -> Self {
        Self {
            tokenizer: Tokenizer::new(control_line),
        }
    }

    pub fn parse(mut self) -> Result<PipedArgs, ParseError> {
        self.s()
    }

    fn s(&mut self) -> Result<PipedArgs, ParseError> {
        let first = self.expect_literal("a stdin file or tool name")?;
        self.r(first)
    }

    fn r(&mut self, first: String) -> Result<PipedArgs, ParseError> {
        if self.tokenizer.next_token()? == Token::Redirect {
            let tool = self.expect_name("a tool name after '>'")?;
            let mut args = self.r2(tool)?;
            args.stdin_file = first;
            return Ok(args);
        }
        self.tokenizer.push_back();

        // An empty stdin file is just absent, but an empty tool name is an error.
        if first.is_empty() {
            return Err(ParseError::UnexpectedToken {
                position: 1,
                expected: "a stdin file or tool name",
                found: Token::Literal {
                    text: first,
                    quoted: true,
                }
                .to_string(),
            });
        }
        self.r2(first)
    }

    fn r2(&mut self, tool: String) -> Result<PipedArgs, ParseError> {
        let action = self.expect_name("an action name after the tool name")?;
        let mut command = Command::new(tool, action);

        self.tokenizer.next_token()?;
        while *self.tokenizer.current() == Token::Dash {
            let (key, value) = self.pair()?;
            command.add_pair(key, value);
            self.tokenizer.next_token()?;
        }

        let mut commands = vec![command];
        while *self.tokenizer.current() == Token::Pipe {
            commands.push(self.command()?);
        }

        let mut stdout_file = String::new();
        if *self.tokenizer.current() == Token::Redirect {
            stdout_file = self.expect_literal("a stdout file after '>'")?;
            self.tokenizer.next_token()?;
        }

        if *self.tokenizer.current() != Token::End {
            return Err(self.unexpected("'-', '|', '>' or end of input"));
        }

        Ok(PipedArgs {
            stdin_file: String::new(),
            stdout_file,
            commands,
        })
    }

    /// Called with the current token on `'-'`; leaves the value as current token.
    fn pair(&mut self) -> Result<(String, String), ParseError> {
        let key = match self.tokenizer.next_token()? {
            Token::Literal {
                text,
                quoted: false,
            } if !text.is_empty() => text,
            _ => return Err(self.unexpected("a parameter name after '-'")),
        };

        if self.tokenizer.next_token()? != Token::Equals {
            return Err(self.unexpected("'=' after the parameter name"));
        }

        let value = self.expect_literal("a parameter value after '='")?;
        Ok((key, value))
    }

    /// Called with the current token on `'|'`; leaves the token after the command current.
    fn command(&mut self) -> Result<Command, ParseError> {
        let tool = self.expect_name("a tool name after '|'")?;
        let action = self.expect_name("an action name after the tool name")?;
        let mut command = Command::new(tool, action);

        while self.tokenizer.next_token()? == Token::Dash {
            let (key, value) = self.pair()?;
            command.add_pair(key, value);
        }
        Ok(command)
    }

    fn expect_literal(&mut self, expected: &'static str) -> Result<String, ParseError> {
        match self.tokenizer.next_token()? {
            Token::Literal { text, .. } => Ok(text),
            _ => Err(self.unexpected(expected)),
        }
    }

    fn expect_name(&mut self, expected: &'static str) -> Result<String, ParseError> {
        let name = self.expect_literal(expected)?;
        if name.is_empty() {
            return Err(self.unexpected(expected));
        }
        Ok(name)
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            position: self.tokenizer.position(),
            expected,
            found: self.tokenizer.current().to_string(),
        }
    }
}
