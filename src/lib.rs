//! uvs: a configuration-driven script runner for uv projects
//!
//! Reads `[tool.uvs]` from a project's pyproject.toml and runs named scripts
//! through `uv run` with the declared editable source trees substituted for
//! whatever the configured indexes would otherwise resolve.
//!
//! # Architecture
//!
//! ## Configuration ([`config`])
//! - [`config::loader`]: pyproject.toml discovery and `[tool.uvs]` extraction
//! - [`config::types`]: configuration record, error taxonomy, execution result
//!
//! ## Editable Sources ([`editable`])
//! - [`editable::workspace`]: invocation-scoped ephemeral workspace
//! - [`editable::materializer`]: declared paths -> artifact handles
//!   (in-place or staged)
//!
//! ## Invocation ([`invoke`])
//! - [`invoke::builder`]: ordered `uv run --with-editable ...` construction
//!
//! ## Execution ([`exec`])
//! - [`exec::runner`]: manager subprocess behind a capability trait
//! - [`exec::engine`]: invocation execution with guaranteed workspace release
//!
//! # Design Principles
//!
//! 1. **Order is contract** - override flags reach the manager in declaration
//!    order; nothing reorders or deduplicates along the way
//! 2. **Override never disables resolution** - editable substitution composes
//!    with index resolution instead of replacing it; unresolvable declared
//!    dependencies still fail with the manager's own diagnostics
//! 3. **Scoped workspaces** - every invocation gets a uniquely-named
//!    workspace, released on every exit path
//! 4. **Subprocess as capability** - the manager sits behind a trait so the
//!    ordering contract is testable without a live tool

// Configuration
pub mod config;

// Editable Sources
pub mod editable;

// Invocation
pub mod invoke;

// Execution
pub mod exec;

// CLI entrypoint wiring for the uvs binary.
pub mod cli;

// Re-export commonly used types for convenience
pub use config::types::*;
pub use exec::engine::run_script;
