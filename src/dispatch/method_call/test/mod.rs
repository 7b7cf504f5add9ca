//! Tests for the method call variants

use super::code::available_variants;
use crate::error::{BenchError, Result};

/// Verify all variants return the same totals as the reference
pub fn verify_all() -> Result<()> {
    let variants = available_variants();
    let Some((reference, others)) = variants.split_first() else {
        return Ok(());
    };

    for calls in [0usize, 1, 7, 1000] {
        let expected = (reference.function)(calls);
        for variant in others {
            let actual = (variant.function)(calls);
            if actual != expected {
                return Err(BenchError::Verification {
                    algorithm: "method_call",
                    variant: variant.name,
                    detail: format!("{} calls: expected {}, got {}", calls, expected, actual),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::method_call::code::static_call::StaticBase;
    use crate::dispatch::method_call::code::virtual_call::VirtualBase;
    use crate::dispatch::method_call::code::{static_call, virtual_call, Spinning, Trivial};

    #[test]
    fn test_all_variants() {
        verify_all().expect("All variants should produce correct results");
    }

    #[test]
    fn test_interface_returns_zero() {
        assert_eq!(StaticBase::interface(&Trivial), 0);
        assert_eq!(StaticBase::interface(&Spinning), 0);
        assert_eq!(VirtualBase::interface(&Trivial), 0);
        assert_eq!(VirtualBase::interface(&Spinning), 0);
    }

    #[test]
    fn test_provided_method_forwards_to_implementation() {
        struct Seven;
        impl StaticBase for Seven {
            fn implementation(&self) -> i32 {
                7
            }
        }

        assert_eq!(Seven.interface(), 7);
        assert_eq!(static_call::call_loop(&Seven, 3), 21);
    }

    #[test]
    fn test_virtual_loop_uses_receiver() {
        struct Two;
        impl VirtualBase for Two {
            fn interface(&self) -> i32 {
                2
            }
        }

        let objects: Vec<Box<dyn VirtualBase>> = vec![Box::new(Trivial), Box::new(Two)];
        let totals: Vec<i64> = objects.iter().map(|o| virtual_call::call_loop(o.as_ref(), 5)).collect();
        assert_eq!(totals, vec![0, 10]);
    }

    #[test]
    fn test_every_variant_totals_zero() {
        for variant in available_variants() {
            assert_eq!((variant.function)(250), 0, "{}", variant.name);
        }
    }
}
