//! Tests for the expression visitor variants

use super::code::{available_variants, expected_sum};
use crate::error::{BenchError, Result};

const ALGORITHM: &str = "expr_visitor";

/// Tree sizes checked by `verify_all`, kept shallow enough for test threads
const VERIFY_LENS: [u32; 8] = [0, 1, 2, 3, 16, 100, 255, 1024];

/// Verify every variant evaluates (and prints, where supported) exactly like
/// the reference variant and the closed form.
pub fn verify_all() -> Result<()> {
    let variants = available_variants();
    let Some((reference, others)) = variants.split_first() else {
        return Ok(());
    };

    for len in VERIFY_LENS {
        let expected = expected_sum(len);
        let reference_tree = (reference.function)(len)?;
        let reference_value = reference_tree.evaluate()?;
        if reference_value != expected {
            return Err(BenchError::Verification {
                algorithm: ALGORITHM,
                variant: reference.name,
                detail: format!("len {}: expected {}, got {}", len, expected, reference_value),
            });
        }
        let reference_text = reference_tree.render().transpose()?;

        for variant in others {
            let tree = (variant.function)(len)?;
            let actual = tree.evaluate()?;
            if actual != reference_value {
                return Err(BenchError::Verification {
                    algorithm: ALGORITHM,
                    variant: variant.name,
                    detail: format!("len {}: expected {}, got {}", len, reference_value, actual),
                });
            }

            if let (Some(text), Some(expected_text)) = (tree.render().transpose()?, &reference_text) {
                if &text != expected_text {
                    return Err(BenchError::Verification {
                        algorithm: ALGORITHM,
                        variant: variant.name,
                        detail: format!("len {}: printed form differs from reference", len),
                    });
                }
            }
        }
    }

    tracing::info!(variants = variants.len(), "expr_visitor variants verified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::expr_visitor::code::{arena, dynamic, expected_leaves, tagged, VisitError};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_all_variants() {
        verify_all().expect("All variants should produce correct results");
    }

    #[test]
    fn test_known_values() {
        for variant in available_variants() {
            for (len, expected) in [(0, 1), (1, 1), (3, 4), (10, 46)] {
                let tree = (variant.function)(len).unwrap();
                assert_eq!(tree.evaluate().unwrap(), expected, "{}: len {}", variant.name, len);
            }
        }
    }

    #[test]
    fn test_print_matches_leaf_order() {
        for len in [0u32, 1, 3, 9] {
            let expected = expected_leaves(len)
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" + ");
            for variant in available_variants() {
                let tree = (variant.function)(len).unwrap();
                if let Some(text) = tree.render() {
                    assert_eq!(text.unwrap(), expected, "{}: len {}", variant.name, len);
                }
            }
        }
    }

    #[test]
    fn test_print_has_no_stray_separator() {
        let text = tagged::render(&tagged::build(5)).unwrap();
        assert!(!text.starts_with(" + ") && !text.ends_with(" + "));
        assert_eq!(text.matches(" + ").count(), 5);
    }

    #[test]
    fn test_overflow_is_reported() {
        let big = i64::MAX;

        let expr = tagged::Expr::plus(tagged::Expr::Const(big), tagged::Expr::Const(1));
        assert_eq!(tagged::evaluate(&expr), Err(VisitError::Overflow { lhs: big, rhs: 1 }));

        let node = dynamic::PlusExpr::new(
            Box::new(dynamic::ConstExpr::new(big)),
            Box::new(dynamic::ConstExpr::new(1)),
        );
        assert_eq!(dynamic::evaluate(&node), Err(VisitError::Overflow { lhs: big, rhs: 1 }));

        let mut nodes = arena::ExprArena::new();
        let root = arena_overflowing_sum(&mut nodes, big);
        let mut calc = arena::CalcVisitor::default();
        assert_eq!(
            arena::Visitor::visit(&mut calc, &nodes, root),
            Err(VisitError::Overflow { lhs: big, rhs: 1 })
        );
    }

    fn arena_overflowing_sum(nodes: &mut arena::ExprArena, big: i64) -> arena::NodeId {
        use crate::dispatch::expr_visitor::code::ExprBuilder;
        let lhs = nodes.constant(big);
        let rhs = nodes.constant(1);
        nodes.plus(lhs, rhs)
    }

    #[test]
    fn test_tree_teardown() {
        use std::rc::Rc;

        // Each leaf holds a clone; dropping the tree must release all of them.
        struct Tracked(#[allow(dead_code)] Rc<()>);
        impl dynamic::Expr for Tracked {
            fn accept(&self, _visitor: &mut dyn dynamic::Visitor) -> std::result::Result<(), VisitError> {
                Ok(())
            }
        }

        let token = Rc::new(());
        let mut root: Box<dyn dynamic::Expr> = Box::new(Tracked(Rc::clone(&token)));
        for _ in 0..64 {
            let leaf: Box<dyn dynamic::Expr> = Box::new(Tracked(Rc::clone(&token)));
            root = Box::new(dynamic::PlusExpr::new(root, leaf));
        }
        assert_eq!(Rc::strong_count(&token), 66);
        drop(root);
        assert_eq!(Rc::strong_count(&token), 1);
    }

    #[test]
    fn test_deep_tree_drops_without_recursion() {
        // Far deeper than a test thread could unwind through recursive drop glue.
        const DEEP: u32 = 1_000_000;
        for variant in available_variants() {
            let tree = (variant.function)(DEEP).unwrap();
            drop(tree);
        }
        drop(tagged::build(DEEP));
        drop(dynamic::DynamicTree::build(DEEP));
    }

    #[test]
    fn test_size_above_depth_limit_is_rejected() {
        use crate::dispatch::expr_visitor::{ExprVisitorRunner, MAX_TREE_LEN};
        use crate::registry::AlgorithmRunner;

        let runner = ExprVisitorRunner;
        let too_deep = MAX_TREE_LEN as usize + 1;
        assert!(matches!(
            runner.get_variant_closures(too_deep),
            Err(BenchError::SizeOutOfRange { algorithm: "expr_visitor", size }) if size == too_deep
        ));
        assert!(matches!(
            runner.get_variant_closures(usize::MAX),
            Err(BenchError::SizeOutOfRange { .. })
        ));

        let closures = runner.get_variant_closures(MAX_TREE_LEN as usize).unwrap();
        assert_eq!(closures.len(), available_variants().len());
    }

    proptest! {
        #[test]
        fn prop_closed_form(len in 0u32..512) {
            prop_assert_eq!(tagged::evaluate(&tagged::build(len)).unwrap(), expected_sum(len));
        }

        #[test]
        fn prop_static_and_dynamic_agree(len in 0u32..512) {
            let static_value = tagged::evaluate(&tagged::build(len)).unwrap();
            let dynamic_tree = dynamic::DynamicTree::build(len);
            let dynamic_value = dynamic::evaluate(dynamic_tree.root()).unwrap();
            prop_assert_eq!(static_value, dynamic_value);
            prop_assert_eq!(arena::ArenaTree::build(len).evaluate().unwrap(), static_value);
        }

        #[test]
        fn prop_static_and_dynamic_print_alike(len in 0u32..64) {
            let dynamic_tree = dynamic::DynamicTree::build(len);
            prop_assert_eq!(
                tagged::render(&tagged::build(len)).unwrap(),
                dynamic::render(dynamic_tree.root()).unwrap()
            );
        }
    }
}
