//! AST of propositional formulas.
//!
//! [`Expr`] is a closed set of node kinds. Every operation (evaluation,
//! display, metrics) is an exhaustive `match`, so adding a node kind is a
//! compile error everywhere it needs handling.
//!
//! Chains of one connective group to the right, so a formula's depth grows
//! with its length. Traversals therefore run on an explicit stack instead of
//! the call stack, and so do `Clone`, `PartialEq` and `Drop`.

use std::fmt;
use std::mem;

use crate::types::Var;

/// A propositional formula.
///
/// The `Debug` output is derived and recurses per level; use
/// [`display`][Expr::display] for large formulas.
#[derive(Debug, Eq)]
pub enum Expr {
    /// Constant true or false
    Const(bool),
    /// Variable reference (index into the variable table)
    Var(Var),
    /// Negation
    Not(Box<Expr>),
    /// Conjunction
    And(Box<Expr>, Box<Expr>),
    /// Disjunction
    Or(Box<Expr>, Box<Expr>),
    /// Implication
    Implies(Box<Expr>, Box<Expr>),
    /// Biconditional
    Iff(Box<Expr>, Box<Expr>),
}

/// Borrowed view of one node, with the binary connectives merged.
#[derive(Debug, Copy, Clone)]
pub(crate) enum Node<'a> {
    Const(bool),
    Var(Var),
    Not(&'a Expr),
    Binary(BinOp, &'a Expr, &'a Expr),
}

impl Expr {
    pub fn var(index: usize) -> Self {
        Expr::Var(Var::new(index))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(value: Self) -> Self {
        Expr::Not(Box::new(value))
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Expr::And(Box::new(lhs), Box::new(rhs))
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Expr::Or(Box::new(lhs), Box::new(rhs))
    }

    pub fn implies(lhs: Self, rhs: Self) -> Self {
        Expr::Implies(Box::new(lhs), Box::new(rhs))
    }

    pub fn iff(lhs: Self, rhs: Self) -> Self {
        Expr::Iff(Box::new(lhs), Box::new(rhs))
    }

    pub(crate) fn node(&self) -> Node<'_> {
        match self {
            Expr::Const(b) => Node::Const(*b),
            Expr::Var(v) => Node::Var(*v),
            Expr::Not(e) => Node::Not(e),
            Expr::And(l, r) => Node::Binary(BinOp::And, l, r),
            Expr::Or(l, r) => Node::Binary(BinOp::Or, l, r),
            Expr::Implies(l, r) => Node::Binary(BinOp::Implies, l, r),
            Expr::Iff(l, r) => Node::Binary(BinOp::Iff, l, r),
        }
    }

    /// Bottom-up fold over the tree: each node is combined from the results
    /// of its operands.
    fn fold<T>(
        &self,
        mut constant: impl FnMut(bool) -> T,
        mut var: impl FnMut(Var) -> T,
        mut not: impl FnMut(T) -> T,
        mut binary: impl FnMut(BinOp, T, T) -> T,
    ) -> T {
        enum Frame<'a> {
            Enter(&'a Expr),
            Exit(&'a Expr),
        }

        let mut stack = vec![Frame::Enter(self)];
        let mut values: Vec<T> = Vec::new();
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(expr) => match expr.node() {
                    Node::Const(b) => values.push(constant(b)),
                    Node::Var(v) => values.push(var(v)),
                    Node::Not(e) => {
                        stack.push(Frame::Exit(expr));
                        stack.push(Frame::Enter(e));
                    }
                    Node::Binary(_, l, r) => {
                        stack.push(Frame::Exit(expr));
                        stack.push(Frame::Enter(r));
                        stack.push(Frame::Enter(l));
                    }
                },
                Frame::Exit(expr) => {
                    let value = if let Node::Binary(op, ..) = expr.node() {
                        let rhs = pop_value(&mut values);
                        let lhs = pop_value(&mut values);
                        binary(op, lhs, rhs)
                    } else {
                        not(pop_value(&mut values))
                    };
                    values.push(value);
                }
            }
        }
        pop_value(&mut values)
    }

    /// Evaluate the formula under `assignment`, indexed by variable.
    ///
    /// # Panics
    ///
    /// Panics if the formula references a variable outside `assignment`.
    /// Formulas produced by the parser never do when given an assignment of
    /// the compiled variable count.
    pub fn eval(&self, assignment: &[bool]) -> bool {
        self.fold(|b| b, |v| assignment[v.index()], |b| !b, BinOp::eval)
    }

    /// Depth of the expression tree (0 for leaves).
    pub fn depth(&self) -> usize {
        self.fold(|_| 0, |_| 0, |d| d + 1, |_, l, r| 1 + l.max(r))
    }

    /// Size of the expression tree (number of nodes).
    pub fn size(&self) -> usize {
        self.fold(|_| 1, |_| 1, |n| n + 1, |_, l, r| 1 + l + r)
    }

    /// Distinct variables referenced by the formula, in ascending order.
    pub fn vars(&self) -> Vec<Var> {
        let mut vars = Vec::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match expr.node() {
                Node::Const(_) => {}
                Node::Var(v) => vars.push(v),
                Node::Not(e) => stack.push(e),
                Node::Binary(_, l, r) => {
                    stack.push(r);
                    stack.push(l);
                }
            }
        }
        vars.sort_unstable();
        vars.dedup();
        vars
    }

    /// Display the formula using `variables` as the names of its variables.
    ///
    /// Every binary node is parenthesized, so the result never depends on
    /// connective priorities:
    ///
    /// ```
    /// use truthtable_rs::ast::{Expr, Notation};
    ///
    /// let names = vec!["p".to_string(), "q".to_string()];
    /// let f = Expr::and(Expr::not(Expr::var(0)), Expr::var(1));
    /// assert_eq!(f.display(&names).to_string(), "(¬p ∧ q)");
    /// assert_eq!(f.display(&names).notation(Notation::Ascii).to_string(), "(~p /\\ q)");
    /// ```
    pub fn display<'a, S: AsRef<str>>(&'a self, variables: &'a [S]) -> ExprDisplay<'a, S> {
        ExprDisplay {
            expr: self,
            variables,
            notation: Notation::default(),
        }
    }

    /// Move the operands out into `out`, leaving constant leaves behind.
    fn detach_operands(&mut self, out: &mut Vec<Expr>) {
        match self {
            Expr::Const(_) | Expr::Var(_) => {}
            Expr::Not(e) => out.push(mem::replace(&mut **e, Expr::Const(false))),
            Expr::And(l, r) | Expr::Or(l, r) | Expr::Implies(l, r) | Expr::Iff(l, r) => {
                out.push(mem::replace(&mut **l, Expr::Const(false)));
                out.push(mem::replace(&mut **r, Expr::Const(false)));
            }
        }
    }
}

fn pop_value<T>(values: &mut Vec<T>) -> T {
    values.pop().expect("fold invariant: value stack underflow")
}

impl Clone for Expr {
    fn clone(&self) -> Self {
        self.fold(Expr::Const, Expr::Var, Expr::not, BinOp::apply)
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            match (a.node(), b.node()) {
                (Node::Const(x), Node::Const(y)) if x == y => {}
                (Node::Var(x), Node::Var(y)) if x == y => {}
                (Node::Not(x), Node::Not(y)) => stack.push((x, y)),
                (Node::Binary(op1, l1, r1), Node::Binary(op2, l2, r2)) if op1 == op2 => {
                    stack.push((r1, r2));
                    stack.push((l1, l2));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.detach_operands(&mut stack);
        // Each popped node is dropped with leaf operands only.
        while let Some(mut expr) = stack.pop() {
            expr.detach_operands(&mut stack);
        }
    }
}

/// Binary connectives, as they appear on the parser's operator stack.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinOp {
    And,
    Or,
    Implies,
    Iff,
}

impl BinOp {
    /// Binding strength; higher binds tighter.
    pub fn priority(self) -> i8 {
        match self {
            BinOp::And => 3,
            BinOp::Or => 2,
            BinOp::Implies => 1,
            BinOp::Iff => 0,
        }
    }

    /// Build the node for this connective.
    pub fn apply(self, lhs: Expr, rhs: Expr) -> Expr {
        match self {
            BinOp::And => Expr::and(lhs, rhs),
            BinOp::Or => Expr::or(lhs, rhs),
            BinOp::Implies => Expr::implies(lhs, rhs),
            BinOp::Iff => Expr::iff(lhs, rhs),
        }
    }

    /// Truth function of this connective.
    pub fn eval(self, lhs: bool, rhs: bool) -> bool {
        match self {
            BinOp::And => lhs && rhs,
            BinOp::Or => lhs || rhs,
            BinOp::Implies => !lhs || rhs,
            BinOp::Iff => lhs == rhs,
        }
    }

    pub fn glyph(self, notation: Notation) -> &'static str {
        match (notation, self) {
            (Notation::Unicode, BinOp::And) => "∧",
            (Notation::Unicode, BinOp::Or) => "∨",
            (Notation::Unicode, BinOp::Implies) => "→",
            (Notation::Unicode, BinOp::Iff) => "↔",
            (Notation::Ascii, BinOp::And) => "/\\",
            (Notation::Ascii, BinOp::Or) => "\\/",
            (Notation::Ascii, BinOp::Implies) => "->",
            (Notation::Ascii, BinOp::Iff) => "<->",
            (Notation::Latex, BinOp::And) => "\\land",
            (Notation::Latex, BinOp::Or) => "\\lor",
            (Notation::Latex, BinOp::Implies) => "\\to",
            (Notation::Latex, BinOp::Iff) => "\\leftrightarrow",
        }
    }
}

/// Glyph set used when displaying formulas.
///
/// Each notation only uses spellings the lexer accepts.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Notation {
    /// `⊤ ⊥ ¬ ∧ ∨ → ↔`
    #[default]
    Unicode,
    /// `T F ~ /\ \/ -> <->`
    Ascii,
    /// `\top \bot \lnot \land \lor \to \leftrightarrow`
    Latex,
}

impl Notation {
    pub fn constant(self, value: bool) -> &'static str {
        match (self, value) {
            (Notation::Unicode, true) => "⊤",
            (Notation::Unicode, false) => "⊥",
            (Notation::Ascii, true) => "T",
            (Notation::Ascii, false) => "F",
            (Notation::Latex, true) => "\\top",
            (Notation::Latex, false) => "\\bot",
        }
    }

    pub fn negation(self) -> &'static str {
        match self {
            Notation::Unicode => "¬",
            Notation::Ascii => "~",
            Notation::Latex => "\\lnot ",
        }
    }
}

/// Helper returned by [`Expr::display`].
pub struct ExprDisplay<'a, S> {
    expr: &'a Expr,
    variables: &'a [S],
    notation: Notation,
}

impl<S> ExprDisplay<'_, S> {
    pub fn notation(mut self, notation: Notation) -> Self {
        self.notation = notation;
        self
    }
}

impl<S: AsRef<str>> fmt::Display for ExprDisplay<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece<'a> {
            Expr(&'a Expr),
            Glyph(BinOp),
            Close,
        }

        let mut stack = vec![Piece::Expr(self.expr)];
        while let Some(piece) = stack.pop() {
            match piece {
                Piece::Expr(expr) => match expr.node() {
                    Node::Const(b) => f.write_str(self.notation.constant(b))?,
                    Node::Var(v) => f.write_str(self.variables[v.index()].as_ref())?,
                    Node::Not(e) => {
                        f.write_str(self.notation.negation())?;
                        stack.push(Piece::Expr(e));
                    }
                    Node::Binary(op, l, r) => {
                        f.write_str("(")?;
                        stack.push(Piece::Close);
                        stack.push(Piece::Expr(r));
                        stack.push(Piece::Glyph(op));
                        stack.push(Piece::Expr(l));
                    }
                },
                Piece::Glyph(op) => write!(f, " {} ", op.glyph(self.notation))?,
                Piece::Close => f.write_str(")")?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
