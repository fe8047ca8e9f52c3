/// Ephemeral workspace for invocation-scoped artifacts
use crate::config::types::{Result, UvsError};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Uniquely-named temporary directory scoped to a single invocation.
///
/// Created by the materializer, released by the execution engine once the
/// manager invocation finishes. `Drop` is only the backstop for early-error
/// paths; the engine's explicit cleanup is the normal release point, so the
/// directory is gone before control returns to the caller on every path.
pub struct EphemeralWorkspace {
    root: PathBuf,
    cleaned: bool,
}

impl EphemeralWorkspace {
    /// Allocate a fresh workspace under the platform temp directory.
    ///
    /// Names embed a UUIDv4 so concurrent invocations from the same process
    /// never share a workspace.
    pub fn create() -> Result<Self> {
        let root = std::env::temp_dir().join(format!("uvs-{}", Uuid::new_v4()));
        fs::create_dir_all(&root).map_err(|e| {
            UvsError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to create workspace {}: {}", root.display(), e),
            ))
        })?;

        Ok(Self {
            root,
            cleaned: false,
        })
    }

    /// Workspace root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Remove the workspace tree (idempotent)
    pub fn cleanup(&mut self) -> Result<()> {
        if self.cleaned {
            return Ok(());
        }

        if self.root.exists() {
            fs::remove_dir_all(&self.root).map_err(|e| {
                UvsError::Io(std::io::Error::new(
                    e.kind(),
                    format!("failed to remove workspace {}: {}", self.root.display(), e),
                ))
            })?;
        }

        self.cleaned = true;
        Ok(())
    }
}

impl Drop for EphemeralWorkspace {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            log::warn!("workspace cleanup on drop failed: {}", e);
        }
    }
}
