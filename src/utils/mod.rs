// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod args;
mod params;
pub mod template;

pub use args::split_command_line;
pub use params::ParameterMap;
