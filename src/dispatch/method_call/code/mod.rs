//! Implementation variants for the method call comparison

pub mod static_call;
pub mod virtual_call;

use std::hint::black_box;

use crate::utils::VariantInfo;

/// Performs `calls` calls of `interface()` and returns the sum of the results
pub type CallLoopFn = fn(usize) -> i64;

/// Iterations of the opaque empty loop in [`Spinning`]
pub const SPIN_ITERATIONS: u32 = 100;

/// Payload whose method returns 0 immediately
#[derive(Clone, Copy, Debug, Default)]
pub struct Trivial;

/// Payload whose method spins through an empty, optimization-opaque loop
/// before returning 0
#[derive(Clone, Copy, Debug, Default)]
pub struct Spinning;

#[inline(always)]
fn trivial_body() -> i32 {
    0
}

#[inline(always)]
fn spinning_body() -> i32 {
    for i in 0..SPIN_ITERATIONS {
        black_box(i);
    }
    0
}

/// Get all available variants. The first one is the reference.
pub fn available_variants() -> Vec<VariantInfo<CallLoopFn>> {
    vec![
        VariantInfo {
            name: "static",
            description: "Provided trait method over a generic receiver (monomorphized)",
            function: static_call::run_trivial,
        },
        VariantInfo {
            name: "dynamic",
            description: "Trait object call through the vtable",
            function: virtual_call::run_trivial,
        },
        VariantInfo {
            name: "static-spin",
            description: "Static call, 100-iteration opaque body",
            function: static_call::run_spinning,
        },
        VariantInfo {
            name: "dynamic-spin",
            description: "Vtable call, 100-iteration opaque body",
            function: virtual_call::run_spinning,
        },
    ]
}
