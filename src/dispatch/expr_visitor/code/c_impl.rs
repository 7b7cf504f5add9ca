//! FFI bindings for the native C expression tree.

#[cfg(c_implementation_active)]
mod ffi {
    /// Opaque `struct expr` owned by the C side
    #[repr(C)]
    pub struct CExpr {
        _private: [u8; 0],
    }

    extern "C" {
        pub fn expr_c_build(len: u32) -> *mut CExpr;
        pub fn expr_c_eval_switch(expr: *const CExpr) -> i64;
        pub fn expr_c_eval_fnptr(expr: *const CExpr) -> i64;
        pub fn expr_c_free(expr: *mut CExpr);
    }
}

#[cfg(c_implementation_active)]
pub use tree::{CDispatch, CExprTree};

#[cfg(c_implementation_active)]
mod tree {
    use std::ptr::NonNull;

    use super::super::{PreparedExpr, VisitError};
    use super::ffi;

    /// How the C walk dispatches on node kinds
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum CDispatch {
        /// `switch` on the kind tag
        Switch,
        /// Call through the function pointer stored in each node
        FnPtr,
    }

    /// Owning handle to a tree allocated by `expr_c_build`.
    ///
    /// The C evaluators wrap on overflow instead of reporting it.
    pub struct CExprTree {
        root: NonNull<ffi::CExpr>,
        dispatch: CDispatch,
    }

    impl CExprTree {
        pub fn build(len: u32, dispatch: CDispatch) -> Result<Self, VisitError> {
            // SAFETY: expr_c_build has no preconditions; null means OOM.
            let raw = unsafe { ffi::expr_c_build(len) };
            let root = NonNull::new(raw).ok_or(VisitError::Allocation { len })?;
            Ok(Self { root, dispatch })
        }

        pub fn evaluate(&self) -> i64 {
            let root = self.root.as_ptr() as *const ffi::CExpr;
            // SAFETY: root is a live tree owned by self until drop.
            unsafe {
                match self.dispatch {
                    CDispatch::Switch => ffi::expr_c_eval_switch(root),
                    CDispatch::FnPtr => ffi::expr_c_eval_fnptr(root),
                }
            }
        }
    }

    impl Drop for CExprTree {
        fn drop(&mut self) {
            // SAFETY: the tree came from expr_c_build and is freed exactly once.
            unsafe { ffi::expr_c_free(self.root.as_ptr()) }
        }
    }

    impl PreparedExpr for CExprTree {
        #[inline(never)]
        fn evaluate(&self) -> Result<i64, VisitError> {
            Ok(CExprTree::evaluate(self))
        }
    }
}

/// Check if C implementations are available
#[cfg(c_implementation_active)]
pub const C_IMPL_AVAILABLE: bool = true;

#[cfg(not(c_implementation_active))]
pub const C_IMPL_AVAILABLE: bool = false;

#[cfg(all(test, c_implementation_active))]
mod tests {
    use super::*;

    #[test]
    fn test_both_dispatch_modes() {
        for dispatch in [CDispatch::Switch, CDispatch::FnPtr] {
            assert_eq!(CExprTree::build(0, dispatch).unwrap().evaluate(), 1);
            assert_eq!(CExprTree::build(3, dispatch).unwrap().evaluate(), 4);
            assert_eq!(CExprTree::build(4096, dispatch).unwrap().evaluate(), 1 + 4096 * 4095 / 2);
        }
    }
}
