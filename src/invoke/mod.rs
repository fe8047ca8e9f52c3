//! Invocation
//!
//! Pure construction of the manager argument sequence from a configuration
//! record and materialized editable handles.

pub mod builder;
