/// Invocation construction for the external package manager
use crate::config::types::{Result, ScriptConfig, UvsError};
use crate::editable::materializer::EditableArtifact;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Run-mode subcommand of the manager
const RUN_MODE: &str = "run";

/// Flag that substitutes a live source tree for a resolved package
const EDITABLE_FLAG: &str = "--with-editable";

/// Fully resolved manager invocation: program, ordered arguments, working
/// directory, and extra environment. Constructed fresh per run and never
/// persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvocationSpec {
    /// Manager executable to invoke
    pub program: String,
    /// Ordered argument sequence
    pub args: Vec<String>,
    /// Working directory for the child (the project root)
    pub working_dir: PathBuf,
    /// Extra environment applied on top of the inherited one
    pub env: Vec<(String, String)>,
}

/// Build the invocation for `script_name` over the materialized handles.
///
/// Shape: `run` mode, then one override flag per handle in declaration
/// order, then the script's command string as the final positional payload.
/// The payload is opaque: it is never parsed, split, or validated here.
///
/// Override flags are additive and orthogonal to index configuration — no
/// `--no-index` or equivalent is ever emitted, so resolution of the rest of
/// the dependency graph proceeds normally. If an overridden package is a
/// declared dependency that no configured index can resolve, the manager
/// fails at resolution time and that failure is passed through untouched.
pub fn build_invocation(
    config: &ScriptConfig,
    manager: &str,
    handles: &[EditableArtifact],
    script_name: &str,
) -> Result<InvocationSpec> {
    let command = config
        .script(script_name)
        .ok_or_else(|| UvsError::UnknownScript(script_name.to_string()))?;

    let mut args = Vec::with_capacity(2 + handles.len() * 2);
    args.push(RUN_MODE.to_string());
    for handle in handles {
        args.push(EDITABLE_FLAG.to_string());
        args.push(handle.location().to_string_lossy().to_string());
    }
    args.push(command.to_string());

    log::debug!("built invocation: {} {:?}", manager, args);

    Ok(InvocationSpec {
        program: manager.to_string(),
        args,
        working_dir: config.project_root().to_path_buf(),
        env: Vec::new(),
    })
}
