// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Tool specifications and the repositories that resolve them.
//!
//! A tool specification is a YAML document naming the tool and its operations:
//!
//! ```yaml
//! name: text
//! runtime: process
//! operations:
//!   - name: upper
//!     command: "tr a-z A-Z < ${input} > ${output}"
//!     inputs:
//!       - name: input
//!         required: true
//!     outputs:
//!       - name: output
//!   - name: shout
//!     runtime: in_process
//!     command: "builtin.Upper ${word}"
//!     parameters:
//!       - name: word
//!         default: hello
//! ```

mod memory;
mod operation;
mod tool_spec;
mod yaml;

pub use memory::InMemoryToolRepository;
pub use operation::{Operation, ParameterRole, ParameterSpec, Runtime};
pub use tool_spec::ToolSpec;
pub use yaml::YamlToolRepository;
