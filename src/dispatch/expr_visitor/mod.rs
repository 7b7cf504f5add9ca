//! # Expression Visitor: Static vs Dynamic Dispatch
//!
//! Evaluates a left-deep sum tree `((1 + 0) + 1) + 2 ...` with one visitor per
//! dispatch strategy:
//!
//! - **static-match**: closed `enum`, exhaustive `match`, visitor resolved by
//!   generics. Handlers inline into the walk.
//! - **dynamic-vtable**: `Box<dyn Expr>` nodes accepting a `&mut dyn Visitor`.
//!   Two indirect calls per node.
//! - **arena-index**: the static walk over index-linked nodes stored in one
//!   `Vec`. Better locality, no per-node allocation.
//! - **c-switch / c-fnptr**: native C baselines, when a C compiler is available.
//!
//! The size parameter is the number of `Sum` nodes. Trees are built once per
//! size, outside the measured region, then evaluated repeatedly. Sizes above
//! [`code::MAX_TREE_LEN`] are rejected.

pub mod code;
pub mod test;

pub use code::*;

use crate::error::{BenchError, Result};
use crate::registry::{AlgorithmRunner, VariantClosure};
use std::hint::black_box;

pub struct ExprVisitorRunner;

impl AlgorithmRunner for ExprVisitorRunner {
    fn name(&self) -> &'static str {
        "expr_visitor"
    }

    fn description(&self) -> &'static str {
        "Expression tree evaluation through static vs dynamic visitor dispatch"
    }

    fn category(&self) -> &'static str {
        "dispatch"
    }

    fn size_label(&self) -> &'static str {
        "Sum nodes"
    }

    fn available_variants(&self) -> Vec<&'static str> {
        code::available_variants().iter().map(|v| v.name).collect()
    }

    fn get_variant_closures(&self, size: usize) -> Result<Vec<VariantClosure<'_>>> {
        let len = u32::try_from(size)
            .ok()
            .filter(|&len| len <= code::MAX_TREE_LEN)
            .ok_or(BenchError::SizeOutOfRange {
                algorithm: self.name(),
                size,
            })?;

        let mut closures = Vec::new();
        for v in code::available_variants() {
            let tree = (v.function)(len)?;
            tracing::trace!(variant = v.name, len, "built expression tree");

            let name = v.name;
            closures.push(VariantClosure {
                name,
                description: v.description,
                run: Box::new(move || {
                    let (elapsed, value) = crate::measure!(black_box(tree.evaluate()));
                    let sample = match value {
                        Ok(value) => Some(value as f64),
                        Err(err) => {
                            tracing::warn!(variant = name, len, %err, "evaluation failed");
                            None
                        }
                    };
                    (elapsed, sample)
                }),
            });
        }
        Ok(closures)
    }

    fn verify(&self) -> Result<()> {
        test::verify_all()
    }
}
