//! Expression tree representations and their evaluators.
//!
//! Each variant builds the same chain (see [`builder::build_chain`]) in its
//! own representation and walks it with its own dispatch mechanism.

pub mod arena;
pub mod builder;
pub mod c_impl;
pub mod dynamic;
pub mod tagged;

use thiserror::Error;

use crate::utils::VariantInfo;

pub use builder::{build_chain, expected_leaves, expected_sum, ExprBuilder};
pub use c_impl::C_IMPL_AVAILABLE;

/// Deepest chain the benchmark will build.
///
/// Evaluation and printing recurse once per sum, so this bounds their stack
/// use well inside a default main thread.
pub const MAX_TREE_LEN: u32 = 1 << 14;

/// Failures while walking an expression tree
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VisitError {
    #[error("integer overflow adding {lhs} + {rhs}")]
    Overflow { lhs: i64, rhs: i64 },

    #[error("failed to write expression")]
    Format(#[from] std::fmt::Error),

    #[error("native allocation failed building a tree of {len} sums")]
    Allocation { len: u32 },
}

#[inline(always)]
pub(crate) fn checked_sum(lhs: i64, rhs: i64) -> Result<i64, VisitError> {
    lhs.checked_add(rhs).ok_or(VisitError::Overflow { lhs, rhs })
}

/// A built tree, ready to be evaluated repeatedly.
///
/// This is the boundary the benchmark calls through; the walk behind it uses
/// the variant's own dispatch.
pub trait PreparedExpr {
    fn evaluate(&self) -> Result<i64, VisitError>;

    /// Printed form, for variants that support printing
    fn render(&self) -> Option<Result<String, VisitError>> {
        None
    }
}

/// Builds a tree with the given number of sums
pub type BuildFn = fn(u32) -> Result<Box<dyn PreparedExpr>, VisitError>;

fn build_tagged(len: u32) -> Result<Box<dyn PreparedExpr>, VisitError> {
    Ok(Box::new(tagged::build(len)))
}

fn build_dynamic(len: u32) -> Result<Box<dyn PreparedExpr>, VisitError> {
    Ok(Box::new(dynamic::DynamicTree::build(len)))
}

fn build_arena(len: u32) -> Result<Box<dyn PreparedExpr>, VisitError> {
    Ok(Box::new(arena::ArenaTree::build(len)))
}

#[cfg(c_implementation_active)]
fn build_c_switch(len: u32) -> Result<Box<dyn PreparedExpr>, VisitError> {
    Ok(Box::new(c_impl::CExprTree::build(len, c_impl::CDispatch::Switch)?))
}

#[cfg(c_implementation_active)]
fn build_c_fnptr(len: u32) -> Result<Box<dyn PreparedExpr>, VisitError> {
    Ok(Box::new(c_impl::CExprTree::build(len, c_impl::CDispatch::FnPtr)?))
}

/// Get all available variants. The first one is the reference.
pub fn available_variants() -> Vec<VariantInfo<BuildFn>> {
    #[allow(unused_mut)]
    let mut variants: Vec<VariantInfo<BuildFn>> = vec![
        VariantInfo {
            name: "static-match",
            description: "Tagged enum, generic visitor (compile-time dispatch)",
            function: build_tagged,
        },
        VariantInfo {
            name: "dynamic-vtable",
            description: "Boxed dyn nodes, dyn visitor (double vtable dispatch)",
            function: build_dynamic,
        },
        VariantInfo {
            name: "arena-index",
            description: "Index-linked nodes in one Vec, tag match",
            function: build_arena,
        },
    ];

    #[cfg(c_implementation_active)]
    {
        variants.push(VariantInfo {
            name: "c-switch",
            description: "C tagged struct, switch on kind",
            function: build_c_switch,
        });
        variants.push(VariantInfo {
            name: "c-fnptr",
            description: "C tagged struct, per-node function pointer",
            function: build_c_fnptr,
        });
    }

    variants
}
