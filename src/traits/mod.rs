// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Seams between the pipeline engine and its collaborators.
//!
//! * [`Processor`] - one executable stage of a processor chain
//! * [`ToolExecutor`] - how a tool stage runs its substituted command
//! * [`ToolRepository`] - maps a tool/action pair to an [`Operation`](crate::repo::Operation)
//! * [`Storage`] - reads, writes and (de)localizes file references
//! * [`EntryPointLookup`] - resolves in-process entry points by name

pub mod entry_point;
pub mod executor;
pub mod processor;
pub mod repository;
pub mod storage;

pub use entry_point::EntryPointLookup;
pub use executor::ToolExecutor;
pub use processor::{Processor, StageOutput};
pub use repository::ToolRepository;
pub use storage::Storage;
