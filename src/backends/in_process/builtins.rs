// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Text tools available to in-process operations under `builtin.*` names.
//!
//! Each reads the ambient standard input, unless arguments are given, in which case the
//! arguments joined by spaces are the input (`builtin.Cat` reads them as file paths).

use serde::Serialize;
use std::fs;
use std::io::Write;

use crate::backends::in_process::ambient;
use crate::backends::in_process::{EntryPointError, EntryPointRegistry};

pub(crate) fn register(registry: &mut EntryPointRegistry) {
    registry.register("builtin.Cat", cat);
    registry.register("builtin.Upper", |args| change_case(args, Case::Upper));
    registry.register("builtin.Lower", |args| change_case(args, Case::Lower));
    registry.register("builtin.Reverse", reverse);
    registry.register("builtin.WordCount", word_count);
    registry.register("builtin.Exit", exit);
}

fn input_text(args: &[String]) -> Result<String, EntryPointError> {
    if args.is_empty() {
        Ok(ambient::read_stdin_to_string()?)
    } else {
        Ok(args.join(" "))
    }
}

fn emit(text: &str) -> Result<(), EntryPointError> {
    let mut out = ambient::stdout();
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn cat(args: &[String]) -> Result<(), EntryPointError> {
    if args.is_empty() {
        return emit(&ambient::read_stdin_to_string()?);
    }
    for path in args {
        let content = fs::read(ambient::resolve_path(path))
            .map_err(|e| EntryPointError::new(format!("{}: {}", path, e)))?;
        ambient::stdout().write_all(&content)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Case {
    Upper,
    Lower,
}

fn change_case(args: &[String], case: Case) -> Result<(), EntryPointError> {
    let input = input_text(args)?;
    let result = match case {
        Case::Upper => input.to_uppercase(),
        Case::Lower => input.to_lowercase(),
    };
    emit(&result)
}

/// Reverses characters, keeping a trailing newline in place.
fn reverse(args: &[String]) -> Result<(), EntryPointError> {
    let input = input_text(args)?;
    let (body, newline) = match input.strip_suffix('\n') {
        Some(body) => (body, "\n"),
        None => (input.as_str(), ""),
    };
    let reversed: String = body.chars().rev().collect();
    emit(&format!("{}{}", reversed, newline))
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct TokenCount {
    char_count: usize,
    word_count: usize,
    line_count: usize,
}

fn count(input: &str) -> TokenCount {
    TokenCount {
        char_count: input.chars().count(),
        word_count: input.split_whitespace().count(),
        line_count: input.lines().count().max(1),
    }
}

fn word_count(args: &[String]) -> Result<(), EntryPointError> {
    let input = input_text(args)?;
    let json = serde_json::to_string(&count(&input))?;
    emit(&json)
}

/// Passes stdin through, then terminates with the status in the first argument (default 0).
fn exit(args: &[String]) -> Result<(), EntryPointError> {
    let status = match args.first() {
        Some(raw) => raw
            .parse::<i32>()
            .map_err(|_| EntryPointError::new(format!("invalid exit status '{}'", raw)))?,
        None => 0,
    };
    emit(&ambient::read_stdin_to_string()?)?;
    ambient::exit(status)
}
