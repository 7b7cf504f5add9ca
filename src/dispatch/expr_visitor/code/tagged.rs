//! Static dispatch over a tagged expression tree.
//!
//! `Expr` is a closed enum: the variant is the discriminant tag. The visitor's
//! `visit` method switches on it and calls the handler of the concrete visitor
//! type, so every call is resolved at compile time and can be inlined. This is
//! the Rust counterpart of a CRTP visitor.

use std::fmt;

use super::builder::{build_chain, ExprBuilder};
use super::{checked_sum, PreparedExpr, VisitError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Const(i64),
    Plus(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn constant(value: i64) -> Self {
        Expr::Const(value)
    }

    pub fn plus(lhs: Expr, rhs: Expr) -> Self {
        Expr::Plus(Box::new(lhs), Box::new(rhs))
    }
}

// Chains nest on the left, so release the left spine in a loop rather than
// through recursive drop glue.
impl Drop for Expr {
    fn drop(&mut self) {
        let Expr::Plus(lhs, _) = self else {
            return;
        };
        let mut next = std::mem::replace(lhs.as_mut(), Expr::Const(0));
        loop {
            let inner = match &mut next {
                Expr::Plus(lhs, _) => std::mem::replace(lhs.as_mut(), Expr::Const(0)),
                Expr::Const(_) => break,
            };
            next = inner;
        }
    }
}

/// Handlers for each node kind, with an exhaustive dispatcher.
///
/// The default handlers do nothing, so a visitor only overrides the kinds it
/// cares about.
pub trait Visitor {
    fn handle_const(&mut self, _value: i64) -> Result<(), VisitError> {
        Ok(())
    }

    fn handle_plus(&mut self, _lhs: &Expr, _rhs: &Expr) -> Result<(), VisitError> {
        Ok(())
    }

    #[inline]
    fn visit(&mut self, expr: &Expr) -> Result<(), VisitError> {
        match expr {
            Expr::Const(value) => self.handle_const(*value),
            Expr::Plus(lhs, rhs) => self.handle_plus(lhs, rhs),
        }
    }
}

/// Sums the leaves of a tree.
#[derive(Debug, Default)]
pub struct CalcVisitor {
    // The value obtained after visiting an expr.
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
    fn handle_const(&mut self, value: i64) -> Result<(), VisitError> {
        self.result = value;
        Ok(())
    }

    fn handle_plus(&mut self, lhs: &Expr, rhs: &Expr) -> Result<(), VisitError> {
        self.visit(lhs)?;
        let left = self.result;
        self.visit(rhs)?;
        self.result = checked_sum(left, self.result)?;
        Ok(())
    }
}

/// Writes a tree as `a + b + c` into any formatter sink.
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
    fn handle_const(&mut self, value: i64) -> Result<(), VisitError> {
        write!(self.out, "{}", value)?;
        Ok(())
    }

    fn handle_plus(&mut self, lhs: &Expr, rhs: &Expr) -> Result<(), VisitError> {
        self.visit(lhs)?;
        self.out.write_str(" + ")?;
        self.visit(rhs)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        PrintVisitor::new(f).visit(self).map_err(|_| fmt::Error)
    }
}

pub fn evaluate(expr: &Expr) -> Result<i64, VisitError> {
    let mut calc = CalcVisitor::new();
    calc.visit(expr)?;
    Ok(calc.result())
}

pub fn render(expr: &Expr) -> Result<String, VisitError> {
    let mut printer = PrintVisitor::new(String::new());
    printer.visit(expr)?;
    Ok(printer.into_inner())
}

/// Builder for owned tagged trees
pub struct TaggedBuilder;

impl ExprBuilder for TaggedBuilder {
    type Node = Expr;

    fn constant(&mut self, value: i64) -> Expr {
        Expr::constant(value)
    }

    fn plus(&mut self, lhs: Expr, rhs: Expr) -> Expr {
        Expr::plus(lhs, rhs)
    }
}

pub fn build(len: u32) -> Expr {
    build_chain(&mut TaggedBuilder, len)
}

impl PreparedExpr for Expr {
    #[inline(never)]
    fn evaluate(&self) -> Result<i64, VisitError> {
        evaluate(self)
    }

    fn render(&self) -> Option<Result<String, VisitError>> {
        Some(render(self))
    }
}
