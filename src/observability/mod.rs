// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! All diagnostic output goes through message types in [`messages`]. Each message is a
//! struct with a `Display` implementation and a [`messages::StructuredLog`] implementation
//! that emits it at its documented level with structured fields. This keeps log text in one
//! place instead of scattered format strings.
//!
//! # Usage
//!
//! ```rust
//! use pipewrap::observability::messages::chain::StageFailed;
//! use pipewrap::observability::messages::StructuredLog;
//!
//! StageFailed {
//!     stage: "fits:validate",
//!     position: 1,
//!     status: 2,
//! }
//! .log();
//! ```

pub mod messages;
