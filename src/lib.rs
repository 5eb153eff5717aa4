// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // chain stages and tool executors
pub mod config;     // wrapper configuration
pub mod engine;     // processor chain + invocation boundary
pub mod errors;     // error handling
pub mod observability;
pub mod parser;     // control line grammar
pub mod repo;       // tool specifications
pub mod storage;    // file references and localization
pub mod traits;     // unified abstractions
pub mod utils;

pub use engine::ToolWrapper;
