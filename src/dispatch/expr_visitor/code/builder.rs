//! Tree construction shared by every representation.

/// Node constructors for one expression tree representation.
pub trait ExprBuilder {
    type Node;

    fn constant(&mut self, value: i64) -> Self::Node;

    fn plus(&mut self, lhs: Self::Node, rhs: Self::Node) -> Self::Node;
}

/// Build the benchmark chain with `len` sums.
///
/// Starts from `Const(1)` and wraps the tree built so far as the left child
/// of a new sum whose right child is `Const(i)`, for `i` in `0..len`. The
/// leaves read `1, 0, 1, .., len - 1` from left to right.
pub fn build_chain<B: ExprBuilder>(builder: &mut B, len: u32) -> B::Node {
    let mut node = builder.constant(1);
    for i in 0..len {
        let leaf = builder.constant(i64::from(i));
        node = builder.plus(node, leaf);
    }
    node
}

/// Closed form of the chain's value: `1 + len * (len - 1) / 2`.
pub fn expected_sum(len: u32) -> i64 {
    let n = i64::from(len);
    // Halve the even factor first so the product stays in range for any u32.
    let half_product = if n % 2 == 0 { (n / 2) * (n - 1) } else { n * ((n - 1) / 2) };
    1 + half_product
}

/// Leaves of the chain in left-to-right order
pub fn expected_leaves(len: u32) -> Vec<i64> {
    std::iter::once(1).chain((0..len).map(i64::from)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_sum_small() {
        assert_eq!(expected_sum(0), 1);
        assert_eq!(expected_sum(1), 1);
        assert_eq!(expected_sum(4), 7);
        assert_eq!(expected_sum(5), 11);
    }

    #[test]
    fn test_expected_sum_full_u32_range() {
        let n = i128::from(u32::MAX);
        assert_eq!(i128::from(expected_sum(u32::MAX)), 1 + n * (n - 1) / 2);
        let n = i128::from(u32::MAX - 1);
        assert_eq!(i128::from(expected_sum(u32::MAX - 1)), 1 + n * (n - 1) / 2);
    }
}
