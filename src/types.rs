//! Type-safe wrappers for variable indices and source spans.
//!
//! This module provides newtype wrappers that keep variable indices apart
//! from character positions, so a token's position can never be confused
//! with the variable it refers to.
use std::fmt;
use std::ops::Range;

/// A variable index (0-indexed).
///
/// Indices refer to positions in the sorted variable table produced by the
/// lexer, and therefore also to positions in an assignment.
///
/// # Invariants
///
/// - Indices are dense: a formula with `n` variables uses exactly `0..n`
/// - Index order matches the lexicographic order of the variable names
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(usize);

impl Var {
    /// Creates a variable with the given index.
    pub const fn new(index: usize) -> Self {
        Var(index)
    }

    /// Returns the raw index as a `usize`.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<Var> for usize {
    fn from(var: Var) -> Self {
        var.0
    }
}

impl From<usize> for Var {
    fn from(index: usize) -> Self {
        Var(index)
    }
}

/// A half-open range `[start, end)` of characters in the original input.
///
/// Positions count Unicode scalar values, not bytes, so a glyph such as `∧`
/// occupies exactly one position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "Span start must not exceed its end");
        Span { start, end }
    }

    /// A span covering the single character at `pos`.
    pub fn single(pos: usize) -> Self {
        Span::new(pos, pos + 1)
    }

    /// An empty span located at `pos`.
    pub fn empty(pos: usize) -> Self {
        Span::new(pos, pos)
    }

    pub fn len(self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    pub fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}
