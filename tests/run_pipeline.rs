//! Cross-module tests for the run pipeline
//!
//! These drive config loading, materialization, invocation building, and
//! execution together against a stub manager binary that records its argv,
//! so the end-to-end ordering and cleanup contracts are verified without a
//! real package manager on PATH.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use uvs::config::loader;
use uvs::editable::materializer::{MaterializeMode, Materializer};
use uvs::exec::engine::{run_script, ExecutionEngine};
use uvs::UvsError;

/// Write a stub manager that appends its argv (one per line) to `record`
fn write_stub_manager(dir: &Path, record: &Path, exit_code: i32, stderr: &str) -> PathBuf {
    let stub = dir.join("stub-manager");
    let script = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$@\" >> {record}\nprintf '%s' '{stderr}' >&2\nexit {exit_code}\n",
        record = record.display(),
    );
    fs::write(&stub, script).unwrap();
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();
    stub
}

fn make_package(parent: &Path, name: &str) -> PathBuf {
    let dir = parent.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("pyproject.toml"),
        format!("[project]\nname = \"{name}\"\nversion = \"0.1.0\"\n"),
    )
    .unwrap();
    dir
}

/// Project with two editable packages and one script, loaded via the real
/// config loader
fn make_project(root: &Path) -> uvs::ScriptConfig {
    make_package(&root.join("pkgs"), "pkg-z");
    make_package(&root.join("pkgs"), "pkg-a");
    fs::write(
        root.join("pyproject.toml"),
        r#"
[project]
name = "demo"
version = "0.1.0"

[tool.uvs]
editable = ["pkgs/pkg-z", "pkgs/pkg-a"]

[tool.uvs.scripts]
check = "pytest -q"
"#,
    )
    .unwrap();
    loader::load_project_config(root).unwrap()
}

#[test]
fn pipeline_records_override_flags_in_declared_order() {
    let scratch = tempfile::tempdir().unwrap();
    let config = make_project(scratch.path());
    let record = scratch.path().join("argv.log");
    let stub = write_stub_manager(scratch.path(), &record, 0, "");

    let engine = ExecutionEngine::new();
    let result = run_script(
        &config,
        "check",
        &stub.to_string_lossy(),
        Materializer::default(),
        &engine,
    )
    .unwrap();
    assert!(result.success);

    let argv: Vec<String> = fs::read_to_string(&record)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();
    assert_eq!(
        argv,
        vec![
            "run".to_string(),
            "--with-editable".to_string(),
            scratch.path().join("pkgs/pkg-z").to_string_lossy().to_string(),
            "--with-editable".to_string(),
            scratch.path().join("pkgs/pkg-a").to_string_lossy().to_string(),
            "pytest -q".to_string(),
        ]
    );
}

#[test]
fn nonzero_exit_passes_through_with_diagnostics_intact() {
    let scratch = tempfile::tempdir().unwrap();
    let config = make_project(scratch.path());
    let record = scratch.path().join("argv.log");
    let stub = write_stub_manager(
        scratch.path(),
        &record,
        1,
        "pkg-z was not found in the package registry",
    );

    let engine = ExecutionEngine::new();
    let result = run_script(
        &config,
        "check",
        &stub.to_string_lossy(),
        Materializer::default(),
        &engine,
    )
    .unwrap();

    assert!(!result.success);
    assert_eq!(result.exit_code, Some(1));
    assert!(result
        .stderr
        .contains("was not found in the package registry"));
}

#[test]
fn staged_workspace_is_gone_after_the_run() {
    let scratch = tempfile::tempdir().unwrap();
    let config = make_project(scratch.path());
    let record = scratch.path().join("argv.log");
    let stub = write_stub_manager(scratch.path(), &record, 0, "");

    let engine = ExecutionEngine::new();
    run_script(
        &config,
        "check",
        &stub.to_string_lossy(),
        Materializer::new(MaterializeMode::Staged),
        &engine,
    )
    .unwrap();

    // The recorded override locations pointed into the workspace; after the
    // run the whole workspace must be gone while sources remain untouched.
    let recorded = fs::read_to_string(&record).unwrap();
    let staged: Vec<&str> = recorded
        .lines()
        .filter(|l| l.contains("uvs-"))
        .collect();
    assert_eq!(staged.len(), 2);
    for location in staged {
        assert!(
            !Path::new(location).exists(),
            "staged location survived the run: {location}"
        );
    }
    assert!(scratch.path().join("pkgs/pkg-z/pyproject.toml").exists());
    assert!(scratch.path().join("pkgs/pkg-a/pyproject.toml").exists());
}

#[test]
fn missing_manager_is_a_launch_error() {
    let scratch = tempfile::tempdir().unwrap();
    let config = make_project(scratch.path());
    let missing = scratch.path().join("absent-manager");

    let engine = ExecutionEngine::new();
    let result = run_script(
        &config,
        "check",
        &missing.to_string_lossy(),
        Materializer::default(),
        &engine,
    );

    assert!(matches!(result, Err(UvsError::Launch { .. })));
}

#[test]
fn unknown_script_never_spawns_the_manager() {
    let scratch = tempfile::tempdir().unwrap();
    let config = make_project(scratch.path());
    let record = scratch.path().join("argv.log");
    let stub = write_stub_manager(scratch.path(), &record, 0, "");

    let engine = ExecutionEngine::new();
    let result = run_script(
        &config,
        "deploy",
        &stub.to_string_lossy(),
        Materializer::default(),
        &engine,
    );

    assert!(matches!(result, Err(UvsError::UnknownScript(_))));
    assert!(!record.exists(), "stub manager was invoked");
}
