//! Errors reported while compiling a formula.
//!
//! Every error carries the [`Span`] of the offending text, so a renderer can
//! underline it in the original input.

use derive_more::Display;

use crate::types::Span;

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, Error>;

/// What went wrong.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display)]
pub enum ErrorKind {
    // Lexical errors.
    /// Character outside the accepted alphabet.
    #[display("illegal character {_0:?}")]
    IllegalCharacter(char),
    /// Accepted character that starts no token at this position.
    #[display("unexpected character {_0:?}")]
    UnexpectedCharacter(char),

    // Syntax errors.
    /// The input contains no expression at all.
    #[display("expression expected")]
    ExpressionExpected,
    #[display("unmatched open parenthesis")]
    UnmatchedOpenParen,
    #[display("unmatched close parenthesis")]
    UnmatchedCloseParen,
    /// A connective (binary or negation) is followed by the end of input.
    #[display("operator missing its operand")]
    MissingOperand,
    #[display("negation has nothing to negate")]
    NothingToNegate,
    #[display("expected variable, constant, or open parenthesis")]
    ExpectedOperand,
    #[display("expected close parenthesis or binary connective")]
    ExpectedOperator,
}

impl ErrorKind {
    /// Whether the error was raised by the lexer (as opposed to the parser).
    pub fn is_lexical(self) -> bool {
        matches!(self, ErrorKind::IllegalCharacter(_) | ErrorKind::UnexpectedCharacter(_))
    }

    pub(crate) fn at(self, span: Span) -> Error {
        Error { kind: self, span }
    }
}

/// A compilation error: its kind plus the half-open character range it covers.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, derive_more::Error)]
#[display("{kind} at {span}")]
pub struct Error {
    kind: ErrorKind,
    span: Span,
}

impl Error {
    pub fn new(kind: ErrorKind, span: Span) -> Self {
        Error { kind, span }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable description, without the location.
    pub fn description(&self) -> String {
        self.kind.to_string()
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ErrorKind::UnmatchedOpenParen.at(Span::single(0));
        assert_eq!(err.description(), "unmatched open parenthesis");
        assert_eq!(err.to_string(), "unmatched open parenthesis at 0..1");
        assert_eq!((err.start(), err.end()), (0, 1));
    }

    #[test]
    fn test_error_kind_display_with_char() {
        let kind = ErrorKind::IllegalCharacter('#');
        assert_eq!(kind.to_string(), "illegal character '#'");
        assert!(kind.is_lexical());
        assert!(!ErrorKind::ExpectedOperand.is_lexical());
    }
}
