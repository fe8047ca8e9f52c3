/// Manager invocation behind a capability trait
use crate::config::types::{ExecutionResult, Result, UvsError};
use crate::invoke::builder::InvocationSpec;
use std::process::Command;

/// Capability interface over the external package manager.
///
/// The manager's resolver and installer are a black box: this trait is the
/// only place the crate crosses the subprocess boundary, so tests can swap
/// in a double that records arguments without performing real resolution.
pub trait ManagerRunner {
    fn resolve_and_run(&self, spec: &InvocationSpec) -> Result<ExecutionResult>;
}

/// Production runner: spawns the manager as a child process.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl ManagerRunner for ProcessRunner {
    /// Run the invocation, capturing output and exit status.
    ///
    /// A nonzero exit (resolution failures included) is a normal result.
    /// Only a failure to start the child at all is an error, and it is kept
    /// distinct from every nonzero-exit outcome.
    fn resolve_and_run(&self, spec: &InvocationSpec) -> Result<ExecutionResult> {
        log::debug!(
            "spawning {} {:?} in {}",
            spec.program,
            spec.args,
            spec.working_dir.display()
        );

        let output = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.working_dir)
            .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .output()
            .map_err(|e| UvsError::Launch {
                program: spec.program.clone(),
                message: e.to_string(),
            })?;

        Ok(ExecutionResult::from(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn spec(program: &str, args: &[&str], dir: &std::path::Path) -> InvocationSpec {
        InvocationSpec {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            working_dir: dir.to_path_buf(),
            env: Vec::new(),
        }
    }

    #[test]
    fn captures_stdout_and_exit_status() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProcessRunner
            .resolve_and_run(&spec("sh", &["-c", "echo hello"], dir.path()))
            .unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.stdout, "hello\n");
    }

    #[test]
    fn nonzero_exit_is_a_normal_result_with_stderr_intact() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProcessRunner
            .resolve_and_run(&spec("sh", &["-c", "echo broken >&2; exit 7"], dir.path()))
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(7));
        assert_eq!(result.stderr, "broken\n");
    }

    #[test]
    fn extra_env_is_applied_to_the_child() {
        let dir = tempfile::tempdir().unwrap();
        let mut invocation = spec("sh", &["-c", "printf '%s' \"$UVS_PROBE\""], dir.path());
        invocation.env.push(("UVS_PROBE".to_string(), "42".to_string()));

        let result = ProcessRunner.resolve_and_run(&invocation).unwrap();
        assert_eq!(result.stdout, "42");
    }

    #[test]
    fn missing_executable_is_a_launch_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-manager");
        let result = ProcessRunner.resolve_and_run(&spec(
            &missing.to_string_lossy(),
            &["run"],
            dir.path(),
        ));

        match result {
            Err(UvsError::Launch { program, .. }) => {
                assert_eq!(program, missing.to_string_lossy())
            }
            other => panic!("expected Launch error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn child_runs_in_the_spec_working_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProcessRunner
            .resolve_and_run(&spec("sh", &["-c", "pwd"], dir.path()))
            .unwrap();

        let reported = PathBuf::from(result.stdout.trim_end());
        // Compare canonicalized: the temp dir may be behind a symlink.
        assert_eq!(
            reported.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }
}
