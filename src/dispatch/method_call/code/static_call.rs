//! Compile-time dispatch.
//!
//! `StaticBase::interface` is a provided method forwarding to the
//! implementor's `implementation`. Call sites are generic over the receiver,
//! so the compiler sees the concrete type and can inline the whole chain.

use std::hint::black_box;

use super::{spinning_body, trivial_body, Spinning, Trivial};

pub trait StaticBase {
    fn implementation(&self) -> i32;

    #[inline]
    fn interface(&self) -> i32 {
        self.implementation()
    }
}

impl StaticBase for Trivial {
    fn implementation(&self) -> i32 {
        trivial_body()
    }
}

impl StaticBase for Spinning {
    fn implementation(&self) -> i32 {
        spinning_body()
    }
}

#[inline(never)]
pub fn call_loop<T: StaticBase>(obj: &T, calls: usize) -> i64 {
    let mut total = 0i64;
    for _ in 0..calls {
        total += i64::from(black_box(black_box(obj).interface()));
    }
    total
}

pub fn run_trivial(calls: usize) -> i64 {
    call_loop(&Trivial, calls)
}

pub fn run_spinning(calls: usize) -> i64 {
    call_loop(&Spinning, calls)
}
