// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod chain;
mod wrapper;

pub use chain::{ChainOutcome, ProcessorChain};
pub use wrapper::ToolWrapper;
