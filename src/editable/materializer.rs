/// Materialization of declared editable sources
use crate::config::loader::PROJECT_FILE;
use crate::config::types::{Result, UvsError};
use crate::editable::workspace::EphemeralWorkspace;
use std::fs;
use std::path::{Path, PathBuf};

/// How a declared editable path is turned into something the manager accepts
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MaterializeMode {
    /// Reference the source tree in place; no copying. The manager accepts
    /// direct editable references, so this is the default.
    #[default]
    InPlace,
    /// Stage a copy of the source tree inside the ephemeral workspace.
    Staged,
}

/// A declared editable path paired with its materialized location.
///
/// One handle per declared path, in declaration order. The invocation
/// builder only reads `location`; `source` is kept for diagnostics.
#[derive(Clone, Debug)]
pub struct EditableArtifact {
    source: PathBuf,
    location: PathBuf,
}

impl EditableArtifact {
    /// Declared source path
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Location to hand to the manager's override flag
    pub fn location(&self) -> &Path {
        &self.location
    }
}

/// Turns declared editable paths into artifact handles inside one workspace
#[derive(Clone, Copy, Debug, Default)]
pub struct Materializer {
    mode: MaterializeMode,
}

impl Materializer {
    pub fn new(mode: MaterializeMode) -> Self {
        Self { mode }
    }

    /// Materialize the whole batch of declared paths.
    ///
    /// One workspace is allocated per batch regardless of mode, so the
    /// engine's release guarantee is identical for both strategies. Any
    /// failure aborts the batch; the workspace is released by its RAII
    /// backstop when the error propagates.
    pub fn materialize(
        &self,
        paths: &[PathBuf],
    ) -> Result<(EphemeralWorkspace, Vec<EditableArtifact>)> {
        for path in paths {
            validate_editable_source(path)?;
        }

        let workspace = EphemeralWorkspace::create()?;
        let mut artifacts = Vec::with_capacity(paths.len());

        for (index, path) in paths.iter().enumerate() {
            let location = match self.mode {
                MaterializeMode::InPlace => path.clone(),
                MaterializeMode::Staged => stage_source(&workspace, index, path)?,
            };
            artifacts.push(EditableArtifact {
                source: path.clone(),
                location,
            });
        }

        Ok((workspace, artifacts))
    }
}

/// Reject paths that cannot serve as an editable source
fn validate_editable_source(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(UvsError::Config(format!(
            "editable path does not exist: {}",
            path.display()
        )));
    }
    if !path.is_dir() {
        return Err(UvsError::Config(format!(
            "editable path is not a directory: {}",
            path.display()
        )));
    }
    if !path.join(PROJECT_FILE).is_file() {
        return Err(UvsError::Config(format!(
            "editable path has no {}: {}",
            PROJECT_FILE,
            path.display()
        )));
    }
    Ok(())
}

/// Copy one source tree into the workspace, never touching the original
fn stage_source(workspace: &EphemeralWorkspace, index: usize, path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "editable".to_string());
    // Index prefix keeps same-named packages from distinct parents apart.
    let dest = workspace.root().join(format!("{index}-{name}"));

    log::debug!("staging {} -> {}", path.display(), dest.display());
    copy_tree(path, &dest).map_err(|e| UvsError::Build {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(dest)
}

fn copy_tree(from: &Path, to: &Path) -> std::io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
