// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod parse;
mod resolution;
mod storage;
mod wrapper;

pub use config::ConfigError;
pub use parse::ParseError;
pub use resolution::ResolutionError;
pub use storage::StorageError;
pub use wrapper::WrapperError;
