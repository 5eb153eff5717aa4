// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::consts::DEFAULT_SEPARATOR;
use crate::errors::ConfigError;

/// Configuration of the tool wrapper.
///
/// # Fields
/// * `repository` - Directory holding one `<tool>.yaml` specification per tool
/// * `working_dir` - Where tools run and files are localized (optional, defaults to `.`)
/// * `storage` - Storage namespaces available to file references
/// * `log_level` - Default log filter when `RUST_LOG` is unset (optional)
/// * `separator` - Separator of multi-valued file parameters (optional, defaults to a space)
///
/// # Example
/// ```yaml
/// repository: tools
/// working_dir: /tmp/pipewrap
/// log_level: info
/// storage:
///   remotes:
///     hdfs: /data/hdfs
///     s3: /data/s3
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct WrapperConfig {
    pub repository: PathBuf,
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub log_level: Option<String>,
    #[serde(default)]
    pub separator: Option<String>,
}

impl WrapperConfig {
    pub fn working_dir(&self) -> PathBuf {
        self.working_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn separator(&self) -> &str {
        self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR)
    }

    /// Resolve relative paths against `base`, normally the config file's directory.
    fn rebase(&mut self, base: &Path) {
        let rebase = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        rebase(&mut self.repository);
        if let Some(working_dir) = self.working_dir.as_mut() {
            rebase(working_dir);
        }
        for root in self.storage.remotes.values_mut() {
            rebase(root);
        }
    }
}

/// Storage namespaces: each scheme maps to a root directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub remotes: HashMap<String, PathBuf>,
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<WrapperConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate a config from a YAML file
///
/// Relative paths are resolved against the directory containing the file. The repository
/// must be an existing directory; the working directory is created when missing.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<WrapperConfig, ConfigError> {
    let path = path.as_ref();
    let mut cfg = load_config(path)?;
    if let Some(base) = path.parent() {
        cfg.rebase(base);
    }

    let mut errors = Vec::new();
    if !cfg.repository.is_dir() {
        errors.push(format!(
            "tool repository '{}' is not a directory",
            cfg.repository.display()
        ));
    }
    if cfg.separator().is_empty() {
        errors.push("separator must not be empty".to_string());
    }
    for scheme in cfg.storage.remotes.keys() {
        if scheme.is_empty() || scheme == "file" || !scheme.chars().all(|c| c.is_ascii_alphanumeric()) {
            errors.push(format!("invalid storage scheme '{}'", scheme));
        }
    }
    let working_dir = cfg.working_dir();
    if let Err(e) = fs::create_dir_all(&working_dir) {
        errors.push(format!(
            "cannot create working directory '{}': {}",
            working_dir.display(),
            e
        ));
    }

    if !errors.is_empty() {
        errors.sort();
        return Err(ConfigError::Invalid(errors.join("; ")));
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, yaml: &str) -> PathBuf {
        let path = dir.join("pipewrap.yaml");
        fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
repository: tools
storage:
  remotes:
    hdfs: /data/hdfs
"#;
        let cfg: WrapperConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.repository, PathBuf::from("tools"));
        assert_eq!(cfg.storage.remotes["hdfs"], PathBuf::from("/data/hdfs"));
        assert_eq!(cfg.separator(), " ");
        assert_eq!(cfg.working_dir(), PathBuf::from("."));
        assert!(cfg.log_level.is_none());
    }

    #[test]
    fn test_load_and_validate_resolves_relative_paths() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("tools")).unwrap();
        let path = write_config(
            dir.path(),
            r#"
repository: tools
working_dir: work/area
separator: ","
storage:
  remotes:
    hdfs: remote
"#,
        );

        let cfg = load_and_validate_config(&path).unwrap();

        assert_eq!(cfg.repository, dir.path().join("tools"));
        assert_eq!(cfg.working_dir(), dir.path().join("work/area"));
        assert!(dir.path().join("work/area").is_dir());
        assert_eq!(cfg.storage.remotes["hdfs"], dir.path().join("remote"));
        assert_eq!(cfg.separator(), ",");
    }

    #[test]
    fn test_load_and_validate_reports_every_problem() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            dir.path(),
            r#"
repository: missing
separator: ""
storage:
  remotes:
    file: /x
"#,
        );

        match load_and_validate_config(&path) {
            Err(ConfigError::Invalid(message)) => {
                assert!(message.contains("is not a directory"));
                assert!(message.contains("separator must not be empty"));
                assert!(message.contains("invalid storage scheme 'file'"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_and_bad_yaml() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_config(dir.path().join("nope.yaml")),
            Err(ConfigError::Read { .. })
        ));

        let path = write_config(dir.path(), "repository: [unclosed");
        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
    }
}
