//! # Method Call: Static vs Virtual
//!
//! Calls a method returning 0 through a provided trait method on a generic
//! receiver (compile-time dispatch) and through a `dyn` trait object (vtable
//! dispatch). The `-spin` variants give the method a 100-iteration body so
//! the call overhead can be compared against real work.
//!
//! The size parameter is the number of calls per sample.

pub mod code;
pub mod test;

use crate::error::Result;
use crate::registry::{AlgorithmRunner, VariantClosure};
use std::hint::black_box;

pub struct MethodCallRunner;

impl AlgorithmRunner for MethodCallRunner {
    fn name(&self) -> &'static str {
        "method_call"
    }

    fn description(&self) -> &'static str {
        "Trivial method called through static vs vtable dispatch"
    }

    fn category(&self) -> &'static str {
        "dispatch"
    }

    fn size_label(&self) -> &'static str {
        "Calls"
    }

    fn available_variants(&self) -> Vec<&'static str> {
        code::available_variants().iter().map(|v| v.name).collect()
    }

    fn get_variant_closures(&self, size: usize) -> Result<Vec<VariantClosure<'_>>> {
        Ok(code::available_variants()
            .into_iter()
            .map(|v| {
                let func = v.function;
                VariantClosure {
                    name: v.name,
                    description: v.description,
                    run: Box::new(move || {
                        let (elapsed, total) = crate::measure!(func(black_box(size)));
                        (elapsed, Some(total as f64))
                    }),
                }
            })
            .collect())
    }

    fn verify(&self) -> Result<()> {
        test::verify_all()
    }
}
