//! Benchmarks comparing static and dynamic dispatch.

pub mod expr_visitor;
pub mod method_call;
