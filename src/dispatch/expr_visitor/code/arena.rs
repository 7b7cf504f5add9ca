//! Arena-allocated expression tree.
//!
//! Nodes live contiguously in one `Vec` and refer to their children by
//! index. Children are always pushed before their parent, so the tree cannot
//! contain cycles and the whole tree is released in one deallocation.

use std::fmt;

use super::builder::{build_chain, ExprBuilder};
use super::{checked_sum, PreparedExpr, VisitError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Node {
    Const(i64),
    Plus(NodeId, NodeId),
}

#[derive(Debug, Default)]
pub struct ExprArena {
    nodes: Vec<Node>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Node {
        // Ids are only minted by `push`, so they are always in bounds.
        self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ExprBuilder for ExprArena {
    type Node = NodeId;

    fn constant(&mut self, value: i64) -> NodeId {
        self.push(Node::Const(value))
    }

    fn plus(&mut self, lhs: NodeId, rhs: NodeId) -> NodeId {
        self.push(Node::Plus(lhs, rhs))
    }
}

pub trait Visitor {
    fn handle_const(&mut self, _arena: &ExprArena, _value: i64) -> Result<(), VisitError> {
        Ok(())
    }

    fn handle_plus(&mut self, _arena: &ExprArena, _lhs: NodeId, _rhs: NodeId) -> Result<(), VisitError> {
        Ok(())
    }

    #[inline]
    fn visit(&mut self, arena: &ExprArena, id: NodeId) -> Result<(), VisitError> {
        match arena.node(id) {
            Node::Const(value) => self.handle_const(arena, value),
            Node::Plus(lhs, rhs) => self.handle_plus(arena, lhs, rhs),
        }
    }
}

#[derive(Debug, Default)]
pub struct CalcVisitor {
    result: i64,
}

impl Visitor for CalcVisitor {
    fn handle_const(&mut self, _arena: &ExprArena, value: i64) -> Result<(), VisitError> {
        self.result = value;
        Ok(())
    }

    fn handle_plus(&mut self, arena: &ExprArena, lhs: NodeId, rhs: NodeId) -> Result<(), VisitError> {
        self.visit(arena, lhs)?;
        let left = self.result;
        self.visit(arena, rhs)?;
        self.result = checked_sum(left, self.result)?;
        Ok(())
    }
}

pub struct PrintVisitor<W> {
    out: W,
}

impl<W: fmt::Write> PrintVisitor<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: fmt::Write> Visitor for PrintVisitor<W> {
    fn handle_const(&mut self, _arena: &ExprArena, value: i64) -> Result<(), VisitError> {
        write!(self.out, "{}", value)?;
        Ok(())
    }

    fn handle_plus(&mut self, arena: &ExprArena, lhs: NodeId, rhs: NodeId) -> Result<(), VisitError> {
        self.visit(arena, lhs)?;
        self.out.write_str(" + ")?;
        self.visit(arena, rhs)
    }
}

/// An arena together with the id of its root
#[derive(Debug)]
pub struct ArenaTree {
    arena: ExprArena,
    root: NodeId,
}

impl ArenaTree {
    pub fn build(len: u32) -> Self {
        let mut arena = ExprArena::with_capacity(2 * len as usize + 1);
        let root = build_chain(&mut arena, len);
        Self { arena, root }
    }

    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn evaluate(&self) -> Result<i64, VisitError> {
        let mut calc = CalcVisitor::default();
        calc.visit(&self.arena, self.root)?;
        Ok(calc.result)
    }

    pub fn render(&self) -> Result<String, VisitError> {
        let mut printer = PrintVisitor::new(String::new());
        printer.visit(&self.arena, self.root)?;
        Ok(printer.into_inner())
    }
}

impl PreparedExpr for ArenaTree {
    #[inline(never)]
    fn evaluate(&self) -> Result<i64, VisitError> {
        ArenaTree::evaluate(self)
    }

    fn render(&self) -> Option<Result<String, VisitError>> {
        Some(ArenaTree::render(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_count() {
        for len in [0u32, 1, 7, 100] {
            let tree = ArenaTree::build(len);
            assert_eq!(tree.arena().len(), 2 * len as usize + 1);
        }
        assert!(ExprArena::new().is_empty());
    }

    #[test]
    fn test_children_precede_parents() {
        let tree = ArenaTree::build(32);
        assert_eq!(tree.root(), NodeId(tree.arena().len() - 1));
        for idx in 0..tree.arena().len() {
            if let Node::Plus(lhs, rhs) = tree.arena().node(NodeId(idx)) {
                assert!(lhs.0 < idx && rhs.0 < idx);
            }
        }
    }

    #[test]
    fn test_evaluate_and_render() {
        let tree = ArenaTree::build(3);
        assert_eq!(tree.evaluate().unwrap(), 4);
        assert_eq!(tree.render().unwrap(), "1 + 0 + 1 + 2");
    }
}
