//! Demonstrations of resource lifecycle behavior.

pub mod exit_cleanup;
