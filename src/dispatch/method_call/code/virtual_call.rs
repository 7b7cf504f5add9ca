//! Run-time dispatch through a trait object.

use std::hint::black_box;

use super::{spinning_body, trivial_body, Spinning, Trivial};

pub trait VirtualBase {
    fn interface(&self) -> i32;
}

impl VirtualBase for Trivial {
    fn interface(&self) -> i32 {
        trivial_body()
    }
}

impl VirtualBase for Spinning {
    fn interface(&self) -> i32 {
        spinning_body()
    }
}

#[inline(never)]
pub fn call_loop(obj: &dyn VirtualBase, calls: usize) -> i64 {
    let mut total = 0i64;
    for _ in 0..calls {
        total += i64::from(black_box(black_box(obj).interface()));
    }
    total
}

/// Hide the concrete type so the call cannot be devirtualized
fn opaque(obj: Box<dyn VirtualBase>) -> Box<dyn VirtualBase> {
    black_box(obj)
}

pub fn run_trivial(calls: usize) -> i64 {
    let obj = opaque(Box::new(Trivial));
    call_loop(obj.as_ref(), calls)
}

pub fn run_spinning(calls: usize) -> i64 {
    let obj = opaque(Box::new(Spinning));
    call_loop(obj.as_ref(), calls)
}
