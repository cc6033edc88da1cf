//! Tokens produced by the lexer.

use std::fmt;

use crate::ast::BinOp;
use crate::types::{Span, Var};

/// Canonical token kind. All spellings of a connective map to the same kind.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    True,
    False,
    Not,
    And,
    Or,
    Implies,
    Iff,
    OpenParen,
    CloseParen,
    /// Reference to the variable with the given (final, sorted) index.
    Var(Var),
    /// End-of-input sentinel. Always the last token.
    End,
}

impl TokenKind {
    /// The binary connective this token denotes, if any.
    pub fn binary_op(self) -> Option<BinOp> {
        match self {
            TokenKind::And => Some(BinOp::And),
            TokenKind::Or => Some(BinOp::Or),
            TokenKind::Implies => Some(BinOp::Implies),
            TokenKind::Iff => Some(BinOp::Iff),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::True => write!(f, "true"),
            TokenKind::False => write!(f, "false"),
            TokenKind::Not => write!(f, "not"),
            TokenKind::And => write!(f, "and"),
            TokenKind::Or => write!(f, "or"),
            TokenKind::Implies => write!(f, "implies"),
            TokenKind::Iff => write!(f, "iff"),
            TokenKind::OpenParen => write!(f, "("),
            TokenKind::CloseParen => write!(f, ")"),
            TokenKind::Var(v) => write!(f, "{}", v),
            TokenKind::End => write!(f, "<end>"),
        }
    }
}

/// A token together with the characters it was read from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.kind, self.span)
    }
}
