use crate::config::loader;
use crate::config::types::{ScriptConfig, UvsError};
use crate::editable::materializer::{MaterializeMode, Materializer};
use crate::exec::engine::{run_script, ExecutionEngine};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "uvs", author, version, about = "Run project scripts through uv with editable source overrides", long_about = None)]
struct Cli {
    /// Project directory (defaults to discovery upward from the current directory)
    #[arg(long)]
    project: Option<PathBuf>,

    /// Package manager executable to invoke
    #[arg(long, default_value = "uv")]
    manager: String,

    /// Stage editable sources into the ephemeral workspace instead of
    /// referencing them in place
    #[arg(long)]
    staged: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a named script with editable overrides applied
    Run {
        /// Script name as declared in [tool.uvs.scripts]
        script: String,

        /// Emit the execution result as JSON instead of raw output
        #[arg(long)]
        json: bool,
    },
    /// List scripts declared in the project configuration
    List,
}

/// Print an internal error and exit with its distinct status code
fn fail(err: &UvsError) -> ! {
    eprintln!("uvs: {}", err);
    std::process::exit(err.into());
}

fn load_config(project: Option<&PathBuf>) -> ScriptConfig {
    let root = match project {
        Some(dir) => dir.clone(),
        None => {
            let cwd = match std::env::current_dir() {
                Ok(cwd) => cwd,
                Err(e) => fail(&UvsError::Io(e)),
            };
            match loader::discover_project_root(&cwd) {
                Ok(root) => root,
                Err(e) => fail(&e),
            }
        }
    };

    match loader::load_project_config(&root) {
        Ok(config) => config,
        Err(e) => fail(&e),
    }
}

pub fn run() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(cli.project.as_ref());

    match cli.command {
        Commands::Run { script, json } => {
            let mode = if cli.staged {
                MaterializeMode::Staged
            } else {
                MaterializeMode::InPlace
            };
            let engine = ExecutionEngine::new();

            let result = match run_script(
                &config,
                &script,
                &cli.manager,
                Materializer::new(mode),
                &engine,
            ) {
                Ok(result) => result,
                Err(UvsError::UnknownScript(name)) => {
                    eprintln!("uvs: unknown script '{}'", name);
                    if !config.scripts().is_empty() {
                        eprintln!("Declared scripts:");
                        for entry in config.scripts() {
                            eprintln!("  {}", entry.name);
                        }
                    }
                    std::process::exit((&UvsError::UnknownScript(name)).into());
                }
                Err(e) => fail(&e),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                // The manager's output and diagnostics pass through verbatim.
                print!("{}", result.stdout);
                eprint!("{}", result.stderr);
            }

            // process::exit skips buffered-writer teardown.
            let _ = std::io::stdout().flush();
            let _ = std::io::stderr().flush();
            std::process::exit(result.mirrored_exit_code());
        }
        Commands::List => {
            if config.scripts().is_empty() {
                println!("No scripts declared in [tool.uvs.scripts]");
            } else {
                for entry in config.scripts() {
                    println!("{:<20} {}", entry.name, entry.command);
                }
            }
            Ok(())
        }
    }
}
