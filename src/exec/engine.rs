/// Execution of the constructed invocation with guaranteed workspace release
use crate::config::types::{ExecutionResult, Result, ScriptConfig, UvsError};
use crate::editable::materializer::Materializer;
use crate::editable::workspace::EphemeralWorkspace;
use crate::exec::runner::{ManagerRunner, ProcessRunner};
use crate::invoke::builder::{build_invocation, InvocationSpec};

/// Runs invocations and owns the workspace lifetime for each call.
pub struct ExecutionEngine<R: ManagerRunner = ProcessRunner> {
    runner: R,
}

impl ExecutionEngine<ProcessRunner> {
    pub fn new() -> Self {
        Self {
            runner: ProcessRunner,
        }
    }
}

impl Default for ExecutionEngine<ProcessRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ManagerRunner> ExecutionEngine<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    /// Run the invocation and release the workspace on every exit path:
    /// normal return, nonzero exit code, or a launch failure. A cleanup
    /// failure is logged, never allowed to shadow the invocation outcome
    /// (the `Drop` backstop retries removal if anything was left behind).
    pub fn execute(
        &self,
        spec: &InvocationSpec,
        mut workspace: EphemeralWorkspace,
    ) -> Result<ExecutionResult> {
        let outcome = self.runner.resolve_and_run(spec);

        let root = workspace.root().to_path_buf();
        if let Err(e) = workspace.cleanup() {
            log::warn!("failed to release workspace {}: {}", root.display(), e);
        }

        outcome
    }
}

/// Run one named script: materialize the declared editables, build the
/// invocation, execute it.
///
/// The script name is checked before anything else so an unknown script
/// never allocates a workspace and never reaches the manager.
pub fn run_script<R: ManagerRunner>(
    config: &ScriptConfig,
    script_name: &str,
    manager: &str,
    materializer: Materializer,
    engine: &ExecutionEngine<R>,
) -> Result<ExecutionResult> {
    if config.script(script_name).is_none() {
        return Err(UvsError::UnknownScript(script_name.to_string()));
    }

    let (workspace, handles) = materializer.materialize(config.editable_paths())?;
    let spec = build_invocation(config, manager, &handles, script_name)?;
    engine.execute(&spec, workspace)
}
