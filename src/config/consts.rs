// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Separator between references in a multi-valued file parameter
pub const DEFAULT_SEPARATOR: &str = " ";
/// Opening delimiter of a command template placeholder
pub const PLACEHOLDER_OPEN: &str = "${";
/// Closing delimiter of a command template placeholder
pub const PLACEHOLDER_CLOSE: &str = "}";
/// Shell used to run substituted commands of spawned stages
pub const SHELL: &str = "sh";
/// Archive member declaring the entry point as a `Main-Class:` attribute
pub const ARCHIVE_MANIFEST: &str = "META-INF/MANIFEST.MF";
/// Archive member declaring the entry point as `entry_point = "..."`
pub const ARCHIVE_MANIFEST_TOML: &str = "manifest.toml";
/// File extensions treated as loadable archives by the in-process resolver
pub const ARCHIVE_EXTENSIONS: &[&str] = &["jar", "zip"];
/// Exit status reported for an in-process entry point that returned an error
pub const ENTRY_POINT_FAILURE_STATUS: i32 = 1;
