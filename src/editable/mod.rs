//! Editable sources
//!
//! Materialization of declared editable paths into artifact handles inside a
//! run-scoped ephemeral workspace.

pub mod materializer;
pub mod workspace;
