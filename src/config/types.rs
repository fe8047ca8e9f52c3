/// Core types for the uvs script runner
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Declared project configuration for one invocation.
///
/// Editable paths keep their declaration order: the override flags handed to
/// the package manager are emitted in exactly this order, and the manager's
/// duplicate-override semantics (first-wins or last-wins) depend on it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Root directory of the consuming project (where pyproject.toml lives)
    project_root: PathBuf,
    /// Editable source paths, in declaration order
    editable_paths: Vec<PathBuf>,
    /// Named scripts, in declaration order
    scripts: Vec<ScriptEntry>,
}

/// One named script from the configuration file
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScriptEntry {
    /// Script name, unique within a record
    pub name: String,
    /// Command string handed to the manager verbatim
    pub command: String,
}

impl ScriptConfig {
    /// Construct a validated record.
    ///
    /// This is the construction boundary: records with duplicate editable
    /// paths or colliding script names are rejected here, before any
    /// materialization or subprocess work can happen.
    pub fn new(
        project_root: PathBuf,
        editable_paths: Vec<PathBuf>,
        scripts: Vec<ScriptEntry>,
    ) -> Result<Self> {
        for (i, path) in editable_paths.iter().enumerate() {
            if editable_paths[..i].contains(path) {
                return Err(UvsError::Config(format!(
                    "duplicate editable path declared: {}",
                    path.display()
                )));
            }
        }

        for (i, script) in scripts.iter().enumerate() {
            if scripts[..i].iter().any(|s| s.name == script.name) {
                return Err(UvsError::Config(format!(
                    "duplicate script name declared: {}",
                    script.name
                )));
            }
        }

        Ok(Self {
            project_root,
            editable_paths,
            scripts,
        })
    }

    /// Project root directory
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Declared editable paths, in declaration order
    pub fn editable_paths(&self) -> &[PathBuf] {
        &self.editable_paths
    }

    /// Declared scripts, in declaration order
    pub fn scripts(&self) -> &[ScriptEntry] {
        &self.scripts
    }

    /// Look up a script's command string by name
    pub fn script(&self, name: &str) -> Option<&str> {
        self.scripts
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.command.as_str())
    }
}

/// Result of running the package manager invocation
#[derive(Default, Clone, Debug, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Exit code of the manager process (None when killed by a signal)
    pub exit_code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Signal that terminated the process (if any)
    pub signal: Option<i32>,
    /// Whether the process exited with status zero
    pub success: bool,
}

impl ExecutionResult {
    /// Exit status to mirror to our own caller.
    ///
    /// Signal deaths map to the conventional 128+signal shell encoding.
    pub fn mirrored_exit_code(&self) -> i32 {
        match (self.exit_code, self.signal) {
            (Some(code), _) => code,
            (None, Some(sig)) => 128 + sig,
            (None, None) => 1,
        }
    }
}

impl From<std::process::Output> for ExecutionResult {
    fn from(output: std::process::Output) -> Self {
        Self {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            signal: {
                #[cfg(unix)]
                {
                    use std::os::unix::process::ExitStatusExt;
                    output.status.signal()
                }
                #[cfg(not(unix))]
                {
                    None
                }
            },
            success: output.status.success(),
        }
    }
}

/// Custom error types for uvs.
///
/// A nonzero exit code from the manager (e.g. a resolution failure) is not
/// represented here: it is a normal `ExecutionResult`, passed through with
/// the manager's own diagnostics intact.
#[derive(Error, Debug)]
pub enum UvsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to materialize editable source {path}: {message}")]
    Build { path: PathBuf, message: String },

    #[error("Unknown script '{0}'")]
    UnknownScript(String),

    #[error("Failed to launch '{program}': {message}")]
    Launch { program: String, message: String },
}

/// Convert internal errors to distinct process exit codes
impl From<&UvsError> for i32 {
    fn from(err: &UvsError) -> i32 {
        match err {
            UvsError::Io(_) => 74,           // EX_IOERR
            UvsError::Config(_) => 78,       // EX_CONFIG
            UvsError::Build { .. } => 70,    // EX_SOFTWARE
            UvsError::UnknownScript(_) => 2, // Usage error
            UvsError::Launch { .. } => 127,  // Command-not-found convention
        }
    }
}

/// Result type alias for uvs operations
pub type Result<T> = std::result::Result<T, UvsError>;
