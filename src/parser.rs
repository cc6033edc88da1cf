//! Operator-precedence parser.
//!
//! The parser is a shunting-yard variant driven by two explicit stacks:
//!
//! - the **operator stack** holds pending binary connectives, open
//!   parentheses, and pending negations;
//! - the **operand stack** holds finished subtrees.
//!
//! It alternates between two states. In the `NeedOperand` state it expects a
//! constant, a variable, `(`, or a negation; in `NeedOperator` it
//! expects a binary connective, `)`, or the end of input.
//!
//! Negations are not applied when read. They stay on the operator stack until
//! the subtree they apply to is complete, and are folded into it when that
//! subtree is pushed onto the operand stack. This handles chains (`~~p`) and
//! negated groups (`~(p /\ q)`) uniformly.
//!
//! # Associativity
//!
//! A stacked connective is reduced only when its priority is *strictly*
//! greater than the incoming one. Connectives of equal priority therefore
//! pile up and are reduced right to left, making every chain
//! right-associative:
//!
//! ```
//! use truthtable_rs::compile;
//!
//! let f = compile("p and q and r").unwrap();
//! assert_eq!(f.to_string(), "(p ∧ (q ∧ r))");
//! ```

use log::debug;

use crate::ast::{BinOp, Expr};
use crate::error::{ErrorKind, Result};
use crate::lexer::Scanned;
use crate::token::{Token, TokenKind};
use crate::types::Span;
use crate::Compiled;

/// Priority of the end-of-input sentinel, below every connective.
const END_PRIORITY: i8 = -1;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum State {
    NeedOperand,
    NeedOperator,
    Done,
}

/// Entry of the operator stack.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Pending {
    OpenParen(Span),
    Not(Span),
    Binary(BinOp, Span),
}

impl Pending {
    fn span(self) -> Span {
        match self {
            Pending::OpenParen(span) | Pending::Not(span) | Pending::Binary(_, span) => span,
        }
    }
}

/// Parses a scanned token stream into a formula.
///
/// The variable table is passed through unchanged.
///
/// # Errors
///
/// Returns the first syntax error with the span of the token responsible:
/// an empty formula, an unmatched parenthesis, a connective without an
/// operand, or a token that cannot appear where it was found.
///
/// # Panics
///
/// Panics if `scanned.tokens` is not terminated by [`TokenKind::End`], which
/// [`scan`][crate::lexer::scan] guarantees.
pub fn parse(scanned: Scanned) -> Result<Compiled> {
    let Scanned { tokens, variables } = scanned;

    let mut parser = Parser::default();
    let mut state = State::NeedOperand;
    for token in tokens {
        state = match state {
            State::NeedOperand => parser.operand(token)?,
            State::NeedOperator => parser.operator(token)?,
            State::Done => break,
        };
    }
    assert_eq!(state, State::Done, "token stream must end with an end token");

    let expr = parser.finish();
    debug!("parse: {}", expr.display(&variables));
    Ok(Compiled { expr, variables })
}

#[derive(Debug, Default)]
struct Parser {
    operators: Vec<Pending>,
    operands: Vec<Expr>,
}

impl Parser {
    /// Handle `token` in the `NeedOperand` state.
    fn operand(&mut self, token: Token) -> Result<State> {
        match token.kind {
            TokenKind::True => self.push_operand(Expr::Const(true)),
            TokenKind::False => self.push_operand(Expr::Const(false)),
            TokenKind::Var(v) => self.push_operand(Expr::Var(v)),
            TokenKind::OpenParen => {
                self.operators.push(Pending::OpenParen(token.span));
                return Ok(State::NeedOperand);
            }
            TokenKind::Not => {
                self.operators.push(Pending::Not(token.span));
                return Ok(State::NeedOperand);
            }
            TokenKind::End => {
                return Err(match self.operators.last() {
                    None => ErrorKind::ExpressionExpected.at(token.span),
                    Some(Pending::OpenParen(span)) => ErrorKind::UnmatchedOpenParen.at(*span),
                    Some(top) => ErrorKind::MissingOperand.at(top.span()),
                });
            }
            _ => return Err(ErrorKind::ExpectedOperand.at(token.span)),
        }
        Ok(State::NeedOperator)
    }

    /// Handle `token` in the `NeedOperator` state.
    fn operator(&mut self, token: Token) -> Result<State> {
        if let Some(op) = token.kind.binary_op() {
            self.reduce(op.priority())?;
            self.operators.push(Pending::Binary(op, token.span));
            return Ok(State::NeedOperand);
        }

        match token.kind {
            TokenKind::End => {
                self.reduce(END_PRIORITY)?;
                if let Some(Pending::OpenParen(span)) = self.operators.last() {
                    return Err(ErrorKind::UnmatchedOpenParen.at(*span));
                }
                Ok(State::Done)
            }
            TokenKind::CloseParen => {
                self.close(token.span)?;
                Ok(State::NeedOperator)
            }
            _ => Err(ErrorKind::ExpectedOperator.at(token.span)),
        }
    }

    /// Reduce stacked connectives binding tighter than `priority`.
    fn reduce(&mut self, priority: i8) -> Result<()> {
        while let Some(&top) = self.operators.last() {
            match top {
                Pending::OpenParen(_) => break,
                Pending::Not(span) => return Err(ErrorKind::NothingToNegate.at(span)),
                Pending::Binary(op, _) if op.priority() > priority => {
                    self.operators.pop();
                    self.apply(op);
                }
                Pending::Binary(..) => break,
            }
        }
        Ok(())
    }

    /// Reduce everything up to the matching `(` and re-push the group.
    fn close(&mut self, span: Span) -> Result<()> {
        loop {
            match self.operators.pop() {
                None => return Err(ErrorKind::UnmatchedCloseParen.at(span)),
                Some(Pending::OpenParen(_)) => break,
                Some(Pending::Not(negation)) => return Err(ErrorKind::NothingToNegate.at(negation)),
                Some(Pending::Binary(op, _)) => self.apply(op),
            }
        }
        // Re-push so that negations written before the `(` apply to the group.
        let group = self.pop_operand();
        self.push_operand(group);
        Ok(())
    }

    fn apply(&mut self, op: BinOp) {
        let rhs = self.pop_operand();
        let lhs = self.pop_operand();
        debug!("reduce {:?}", op);
        self.push_operand(op.apply(lhs, rhs));
    }

    /// Wrap `expr` in every negation pending on top of the operator stack,
    /// then push it onto the operand stack.
    fn push_operand(&mut self, mut expr: Expr) {
        while let Some(Pending::Not(_)) = self.operators.last() {
            self.operators.pop();
            expr = Expr::not(expr);
        }
        self.operands.push(expr);
    }

    fn pop_operand(&mut self) -> Expr {
        self.operands.pop().expect("parser invariant: operand stack underflow")
    }

    fn finish(mut self) -> Expr {
        let expr = self.pop_operand();
        assert!(
            self.operands.is_empty() && self.operators.is_empty(),
            "parser invariant: stacks not empty after end of input"
        );
        expr
    }
}
