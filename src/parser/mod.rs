// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Control-line parsing: `[stdin >] tool action (-key=value)* (| tool action ...)* [> stdout]`.

mod command;
mod piped_args;
mod tokenizer;

pub use command::Command;
pub use piped_args::{parse, PipedArgs, PipedArgsParser};
pub use tokenizer::{Token, Tokenizer};
