//! Error types shared by the benchmark harness.

use thiserror::Error;

use crate::dispatch::expr_visitor::VisitError;

/// Errors surfaced by the registry, the runner and the CLI.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("algorithm '{name}' not found (available: {available})")]
    UnknownAlgorithm { name: String, available: String },

    #[error("variant '{variant}' of '{algorithm}' failed verification: {detail}")]
    Verification {
        algorithm: &'static str,
        variant: &'static str,
        detail: String,
    },

    #[error("invalid parameter range {lo}..{hi} with multiplier {multiplier}")]
    InvalidRange {
        lo: usize,
        hi: usize,
        multiplier: usize,
    },

    #[error("size {size} is out of range for '{algorithm}'")]
    SizeOutOfRange { algorithm: &'static str, size: usize },

    #[error(transparent)]
    Visit(#[from] VisitError),

    #[error("failed to export CSV: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = BenchError> = std::result::Result<T, E>;
