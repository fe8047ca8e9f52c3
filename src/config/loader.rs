/// Configuration loading from pyproject.toml
use crate::config::types::{Result, ScriptConfig, ScriptEntry, UvsError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the project descriptor file consulted for configuration
pub const PROJECT_FILE: &str = "pyproject.toml";

/// `[tool.uvs]` table as written in pyproject.toml
#[derive(Debug, Default, Deserialize)]
struct UvsSection {
    /// Editable source paths, relative to the project root
    #[serde(default)]
    editable: Vec<String>,
    /// Script name -> command string
    #[serde(default)]
    scripts: toml::Table,
}

#[derive(Debug, Default, Deserialize)]
struct ToolSection {
    #[serde(default)]
    uvs: Option<UvsSection>,
}

#[derive(Debug, Default, Deserialize)]
struct PyProject {
    #[serde(default)]
    tool: Option<ToolSection>,
}

/// Walk upward from `start` to the nearest directory containing pyproject.toml
pub fn discover_project_root(start: &Path) -> Result<PathBuf> {
    for dir in start.ancestors() {
        if dir.join(PROJECT_FILE).is_file() {
            return Ok(dir.to_path_buf());
        }
    }

    Err(UvsError::Config(format!(
        "no {} found in {} or any parent directory",
        PROJECT_FILE,
        start.display()
    )))
}

/// Load the `[tool.uvs]` configuration for the project rooted at `root`.
///
/// A pyproject.toml without a `[tool.uvs]` table yields an empty record:
/// listing reports no scripts and every run request fails as an unknown
/// script, not as a configuration error.
pub fn load_project_config(root: &Path) -> Result<ScriptConfig> {
    let path = root.join(PROJECT_FILE);
    let raw = std::fs::read_to_string(&path).map_err(|e| {
        UvsError::Config(format!("failed to read {}: {}", path.display(), e))
    })?;

    let parsed: PyProject = toml::from_str(&raw).map_err(|e| {
        UvsError::Config(format!("failed to parse {}: {}", path.display(), e))
    })?;

    let section = parsed
        .tool
        .and_then(|tool| tool.uvs)
        .unwrap_or_default();

    // Relative declarations are anchored at the project root. Order is
    // preserved and duplicates are left for the record boundary to reject.
    let editable_paths: Vec<PathBuf> = section
        .editable
        .iter()
        .map(|decl| {
            let declared = Path::new(decl);
            if declared.is_absolute() {
                declared.to_path_buf()
            } else {
                root.join(declared)
            }
        })
        .collect();

    let mut scripts = Vec::with_capacity(section.scripts.len());
    for (name, value) in section.scripts.iter() {
        let command = value.as_str().ok_or_else(|| {
            UvsError::Config(format!(
                "script '{}' in {} must be a string command",
                name,
                path.display()
            ))
        })?;
        scripts.push(ScriptEntry {
            name: name.clone(),
            command: command.to_string(),
        });
    }

    ScriptConfig::new(root.to_path_buf(), editable_paths, scripts)
}
