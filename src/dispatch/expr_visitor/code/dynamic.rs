//! Dynamic dispatch over trait-object expression nodes.
//!
//! Every node is a `Box<dyn Expr>` and every visitor is reached through
//! `&mut dyn Visitor`, so each step of the walk goes through two vtables:
//! `accept` on the node, then the handler on the visitor.

use std::fmt;

use super::builder::{build_chain, ExprBuilder};
use super::{checked_sum, PreparedExpr, VisitError};

pub trait Expr {
    fn accept(&self, visitor: &mut dyn Visitor) -> Result<(), VisitError>;

    /// Move the left child out, leaving an empty placeholder behind.
    fn detach_lhs(&mut self) -> Option<Box<dyn Expr>> {
        None
    }
}

/// Zero-sized stand-in for a child that has been detached.
struct Detached;

impl Expr for Detached {
    fn accept(&self, _visitor: &mut dyn Visitor) -> Result<(), VisitError> {
        Ok(())
    }
}

pub trait Visitor {
    fn handle_const(&mut self, _expr: &ConstExpr) -> Result<(), VisitError> {
        Ok(())
    }

    fn handle_plus(&mut self, _expr: &PlusExpr) -> Result<(), VisitError> {
        Ok(())
    }
}

pub struct ConstExpr {
    value: i64,
}

impl ConstExpr {
    pub fn new(value: i64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

impl Expr for ConstExpr {
    fn accept(&self, visitor: &mut dyn Visitor) -> Result<(), VisitError> {
        visitor.handle_const(self)
    }
}

pub struct PlusExpr {
    lhs: Box<dyn Expr>,
    rhs: Box<dyn Expr>,
}

impl PlusExpr {
    pub fn new(lhs: Box<dyn Expr>, rhs: Box<dyn Expr>) -> Self {
        Self { lhs, rhs }
    }

    pub fn lhs(&self) -> &dyn Expr {
        self.lhs.as_ref()
    }

    pub fn rhs(&self) -> &dyn Expr {
        self.rhs.as_ref()
    }
}

impl Expr for PlusExpr {
    fn accept(&self, visitor: &mut dyn Visitor) -> Result<(), VisitError> {
        visitor.handle_plus(self)
    }

    fn detach_lhs(&mut self) -> Option<Box<dyn Expr>> {
        Some(std::mem::replace(&mut self.lhs, Box::new(Detached)))
    }
}

// Release the left spine iteratively; each detached node drops with a
// placeholder as its left child.
impl Drop for PlusExpr {
    fn drop(&mut self) {
        let mut next = self.detach_lhs();
        while let Some(mut node) = next {
            next = node.detach_lhs();
        }
    }
}

#[derive(Debug, Default)]
pub struct CalcVisitor {
    result: i64,
}

impl CalcVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(&self) -> i64 {
        self.result
    }
}

impl Visitor for CalcVisitor {
    fn handle_const(&mut self, expr: &ConstExpr) -> Result<(), VisitError> {
        self.result = expr.value();
        Ok(())
    }

    fn handle_plus(&mut self, expr: &PlusExpr) -> Result<(), VisitError> {
        expr.lhs().accept(self)?;
        let left = self.result;
        expr.rhs().accept(self)?;
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
    fn handle_const(&mut self, expr: &ConstExpr) -> Result<(), VisitError> {
        write!(self.out, "{}", expr.value())?;
        Ok(())
    }

    fn handle_plus(&mut self, expr: &PlusExpr) -> Result<(), VisitError> {
        expr.lhs().accept(self)?;
        self.out.write_str(" + ")?;
        expr.rhs().accept(self)
    }
}

pub fn evaluate(expr: &dyn Expr) -> Result<i64, VisitError> {
    let mut calc = CalcVisitor::new();
    expr.accept(&mut calc)?;
    Ok(calc.result())
}

pub fn render(expr: &dyn Expr) -> Result<String, VisitError> {
    let mut printer = PrintVisitor::new(String::new());
    expr.accept(&mut printer)?;
    Ok(printer.into_inner())
}

/// Builder for boxed trait-object trees
pub struct DynamicBuilder;

impl ExprBuilder for DynamicBuilder {
    type Node = Box<dyn Expr>;

    fn constant(&mut self, value: i64) -> Box<dyn Expr> {
        Box::new(ConstExpr::new(value))
    }

    fn plus(&mut self, lhs: Box<dyn Expr>, rhs: Box<dyn Expr>) -> Box<dyn Expr> {
        Box::new(PlusExpr::new(lhs, rhs))
    }
}

/// Owning handle to a boxed tree
pub struct DynamicTree {
    root: Box<dyn Expr>,
}

impl DynamicTree {
    pub fn build(len: u32) -> Self {
        Self {
            root: build_chain(&mut DynamicBuilder, len),
        }
    }

    pub fn root(&self) -> &dyn Expr {
        self.root.as_ref()
    }
}

impl PreparedExpr for DynamicTree {
    #[inline(never)]
    fn evaluate(&self) -> Result<i64, VisitError> {
        evaluate(self.root())
    }

    fn render(&self) -> Option<Result<String, VisitError>> {
        Some(render(self.root()))
    }
}
