// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-process execution of tool entry points.
//!
//! The substituted command is scanned backward for an entry point ([`resolver`]), which is
//! then invoked on the current thread with the ambient streams bound to private buffers
//! and process termination trapped ([`ambient`]). Entry points are looked up through
//! [`EntryPointLookup`](crate::traits::EntryPointLookup); [`EntryPointRegistry`] is the
//! table implementation and comes with the `builtin.*` text tools.

pub mod ambient;
mod builtins;
mod executor;
mod registry;
pub mod resolver;

pub use executor::{invoke, InProcessExecutor, Invocation, InvocationOutcome};
pub use registry::{EntryPoint, EntryPointError, EntryPointRegistry};
pub use resolver::{resolve_entry_point, ResolvedEntryPoint};
