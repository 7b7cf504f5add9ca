//! # Dispatch-Bench
//!
//! Micro-benchmarks comparing compile-time and run-time polymorphic dispatch,
//! plus a demonstration that abrupt process exit skips scoped cleanup.

pub mod dispatch;
pub mod error;
pub mod lifecycle;
pub mod registry;
pub mod utils;

pub use error::{BenchError, Result};

/// Re-export tui from utils
pub use utils::tui;

/// Re-export commonly used items
pub mod prelude {
    pub use crate::dispatch::expr_visitor;
    pub use crate::error::{BenchError, Result};
    pub use crate::registry::{build_registry, AlgorithmRegistry, AlgorithmRunner};
    pub use crate::utils::{geometric_range, TimingConfig};
}
