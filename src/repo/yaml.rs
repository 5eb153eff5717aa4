// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::errors::ResolutionError;
use crate::repo::{Operation, ToolSpec};
use crate::traits::ToolRepository;

/// Tool repository backed by a directory holding one `<tool>.yaml` per tool.
///
/// Specifications are read on first use and cached for the lifetime of the repository.
pub struct YamlToolRepository {
    root: PathBuf,
    cache: Mutex<HashMap<String, Arc<ToolSpec>>>,
}

impl YamlToolRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn load(&self, tool: &str) -> Result<Arc<ToolSpec>, ResolutionError> {
        if let Some(spec) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(tool)
        {
            return Ok(Arc::clone(spec));
        }

        let not_found = || ResolutionError::ToolNotFound {
            tool: tool.to_string(),
        };

        // Tool names come straight from the control line.
        if tool.is_empty() || tool.contains(['/', '\\']) || tool == ".." || tool == "." {
            return Err(not_found());
        }

        let path = self.root.join(format!("{}.yaml", tool));
        if !path.is_file() {
            return Err(not_found());
        }

        let invalid = |reason: String| ResolutionError::InvalidToolSpec {
            path: path.display().to_string(),
            reason,
        };
        let content = fs::read_to_string(&path).map_err(|e| invalid(e.to_string()))?;
        let spec: ToolSpec = serde_yaml::from_str(&content).map_err(|e| invalid(e.to_string()))?;
        if spec.name != tool {
            return Err(invalid(format!(
                "declares tool '{}' but is stored as '{}'",
                spec.name, tool
            )));
        }

        let spec = Arc::new(spec);
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(tool.to_string(), Arc::clone(&spec));
        Ok(spec)
    }
}

impl ToolRepository for YamlToolRepository {
    fn resolve(&self, tool: &str, action: &str) -> Result<Operation, ResolutionError> {
        self.load(tool)?
            .find_operation(action)
            .ok_or_else(|| ResolutionError::OperationNotFound {
                tool: tool.to_string(),
                action: action.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::Runtime;
    use tempfile::TempDir;

    const TEXT_TOOL: &str = r#"
name: text
operations:
  - name: upper
    command: "tr a-z A-Z < ${input}"
    inputs:
      - name: input
        required: true
  - name: shout
    runtime: in_process
    command: "builtin.Upper ${word}"
    parameters:
      - name: word
        default: hello
"#;

    fn repository_with(files: &[(&str, &str)]) -> (TempDir, YamlToolRepository) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let repo = YamlToolRepository::new(dir.path());
        (dir, repo)
    }

    #[test]
    fn test_resolve_from_yaml() {
        let (_dir, repo) = repository_with(&[("text.yaml", TEXT_TOOL)]);

        let upper = repo.resolve("text", "upper").unwrap();
        assert_eq!(upper.command, "tr a-z A-Z < ${input}");
        assert_eq!(upper.runtime(), Runtime::Process);

        let shout = repo.resolve("text", "shout").unwrap();
        assert_eq!(shout.runtime(), Runtime::InProcess);
        assert_eq!(shout.parameters[0].default.as_deref(), Some("hello"));
    }

    #[test]
    fn test_unknown_tool_and_action() {
        let (_dir, repo) = repository_with(&[("text.yaml", TEXT_TOOL)]);

        assert!(matches!(
            repo.resolve("missing", "upper"),
            Err(ResolutionError::ToolNotFound { .. })
        ));
        assert!(matches!(
            repo.resolve("text", "missing"),
            Err(ResolutionError::OperationNotFound { .. })
        ));
    }

    #[test]
    fn test_tool_names_cannot_escape_root() {
        let (_dir, repo) = repository_with(&[("text.yaml", TEXT_TOOL)]);
        for tool in ["../text", "a/b", "..", ""] {
            assert!(
                matches!(repo.resolve(tool, "upper"), Err(ResolutionError::ToolNotFound { .. })),
                "tool: {:?}",
                tool
            );
        }
    }

    #[test]
    fn test_invalid_spec_is_reported() {
        let (_dir, repo) = repository_with(&[
            ("broken.yaml", "name: [unclosed"),
            ("renamed.yaml", "name: other\n"),
        ]);

        assert!(matches!(
            repo.resolve("broken", "x"),
            Err(ResolutionError::InvalidToolSpec { .. })
        ));
        match repo.resolve("renamed", "x") {
            Err(ResolutionError::InvalidToolSpec { reason, .. }) => {
                assert!(reason.contains("declares tool 'other'"))
            }
            other => panic!("expected invalid spec, got {:?}", other),
        }
    }

    #[test]
    fn test_specs_are_cached() {
        let (dir, repo) = repository_with(&[("text.yaml", TEXT_TOOL)]);
        assert!(repo.resolve("text", "upper").is_ok());

        fs::remove_file(dir.path().join("text.yaml")).unwrap();
        assert!(repo.resolve("text", "upper").is_ok());
    }
}
