// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Backward scan of a substituted command for an invocable entry point.

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::backends::in_process::EntryPoint;
use crate::config::consts::{ARCHIVE_EXTENSIONS, ARCHIVE_MANIFEST, ARCHIVE_MANIFEST_TOML};
use crate::errors::ResolutionError;
use crate::observability::messages::in_process::{ArchiveSkipped, EntryPointResolved};
use crate::observability::messages::StructuredLog;
use crate::traits::EntryPointLookup;
use crate::utils::split_command_line;

const MAIN_CLASS_ATTRIBUTE: &str = "Main-Class:";

/// An entry point found in a command, with the arguments that followed it.
pub struct ResolvedEntryPoint {
    pub name: String,
    pub token: String,
    pub entry_point: EntryPoint,
    pub args: Vec<String>,
}

/// Find the last token of `command_line` that names an entry point.
///
/// Tokens are tried from the end toward the start. An archive token (`.jar`, `.zip`) is
/// resolved through the entry point its manifest declares, falling back to the token's own
/// name; any other token is looked up by name. Everything after the winning token becomes
/// its argument vector.
pub fn resolve_entry_point(
    command_line: &str,
    working_dir: &Path,
    lookup: &dyn EntryPointLookup,
) -> Result<ResolvedEntryPoint, ResolutionError> {
    let tokens = split_command_line(command_line);

    for (index, token) in tokens.iter().enumerate().rev() {
        let declared = if is_archive(token) {
            match declared_entry_point(&working_dir.join(token)) {
                Ok(declared) => declared,
                Err(error) => {
                    ArchiveSkipped {
                        archive: token,
                        error: &error,
                    }
                    .log();
                    None
                }
            }
        } else {
            None
        };

        // An archive's declared entry point first, then the token itself.
        let candidates = declared.into_iter().chain(std::iter::once(token.clone()));
        for name in candidates {
            if let Some(entry_point) = lookup.resolve(&name) {
                let args = tokens[index + 1..].to_vec();
                EntryPointResolved {
                    entry_point: &name,
                    token,
                    arg_count: args.len(),
                }
                .log();
                return Ok(ResolvedEntryPoint {
                    name,
                    token: token.clone(),
                    entry_point,
                    args,
                });
            }
        }
    }

    Err(ResolutionError::EntryPointNotFound {
        command: command_line.to_string(),
    })
}

fn is_archive(token: &str) -> bool {
    Path::new(token)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ARCHIVE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

#[derive(Deserialize)]
struct ArchiveManifest {
    entry_point: Option<String>,
}

/// Entry point declared by an archive, from `META-INF/MANIFEST.MF` or `manifest.toml`.
pub fn declared_entry_point(archive: &Path) -> Result<Option<String>, ResolutionError> {
    let unreadable = |reason: String| ResolutionError::ArchiveUnreadable {
        archive: archive.display().to_string(),
        reason,
    };

    let file = File::open(archive).map_err(|e| unreadable(e.to_string()))?;
    let mut zip = ZipArchive::new(file).map_err(|e| unreadable(e.to_string()))?;

    if let Some(manifest) = read_member(&mut zip, ARCHIVE_MANIFEST).map_err(&unreadable)? {
        if let Some(main_class) = main_class(&manifest) {
            return Ok(Some(main_class));
        }
    }

    match read_member(&mut zip, ARCHIVE_MANIFEST_TOML).map_err(&unreadable)? {
        Some(text) => {
            let manifest: ArchiveManifest =
                toml::from_str(&text).map_err(|e| unreadable(e.to_string()))?;
            Ok(manifest
                .entry_point
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()))
        }
        None => Ok(None),
    }
}

fn read_member(zip: &mut ZipArchive<File>, name: &str) -> Result<Option<String>, String> {
    let mut member = match zip.by_name(name) {
        Ok(member) => member,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.to_string()),
    };
    let mut text = String::new();
    member
        .read_to_string(&mut text)
        .map_err(|e| format!("{}: {}", name, e))?;
    Ok(Some(text))
}

/// `Main-Class:` value of a JAR-style manifest. Lines starting with a single space continue
/// the previous line.
fn main_class(manifest: &str) -> Option<String> {
    let mut logical: Vec<String> = Vec::new();
    for line in manifest.lines().map(|l| l.trim_end_matches('\r')) {
        match (line.strip_prefix(' '), logical.last_mut()) {
            (Some(continuation), Some(previous)) => previous.push_str(continuation),
            _ => logical.push(line.to_string()),
        }
    }

    logical.iter().find_map(|line| {
        line.strip_prefix(MAIN_CLASS_ATTRIBUTE)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
