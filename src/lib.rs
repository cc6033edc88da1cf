//! # truthtable-rs: propositional formulas and their truth tables
//!
//! **`truthtable-rs`** compiles a textual propositional formula into an
//! abstract syntax tree and enumerates every assignment of its variables to
//! produce a truth table.
//!
//! The pipeline is a miniature compiler front end:
//!
//! ```text
//! text --[lexer]--> tokens + variables --[parser]--> Expr + variables --[table]--> rows
//! ```
//!
//! ## Syntax
//!
//! Connectives may be written in ASCII, Unicode, or LaTeX style, and may be
//! mixed freely within one formula:
//!
//! | Connective | Spellings |
//! |---|---|
//! | and | `/\` `&&` `and` `^` `∧` `\land` `\wedge` |
//! | or | `\/` `\|\|` `or` `∨` `\lor` `\vee` |
//! | implies | `->` `=>` `implies` `→` `\to` `\rightarrow` `\Rightarrow` |
//! | iff | `<->` `<=>` `iff` `↔` `\leftrightarrow` `\Leftrightarrow` |
//! | not | `~` `!` `not` `¬` `\lnot` `\neg` |
//! | true | `T` `true` `⊤` `\top` |
//! | false | `F` `false` `⊥` `\bot` |
//!
//! Variables match `[A-Za-z_][A-Za-z_0-9]*`. Priorities, tightest first:
//! not, and, or, implies, iff. Chains of one connective group to the right.
//!
//! ## Basic Usage
//!
//! ```rust
//! use truthtable_rs::compile;
//! use truthtable_rs::table::enumerate;
//!
//! let f = compile("p /\\ q").unwrap();
//! assert_eq!(f.variables, vec!["p", "q"]);
//!
//! let mut rows = Vec::new();
//! enumerate(&f.expr, f.variables.len(), |assignment, value| {
//!     rows.push((assignment.to_vec(), value));
//! });
//! assert_eq!(rows.len(), 4);
//! assert_eq!(rows[2], (vec![true, false], false));
//! assert_eq!(rows[3], (vec![true, true], true));
//! ```
//!
//! Errors carry the character range of the offending input:
//!
//! ```rust
//! use truthtable_rs::compile;
//!
//! let err = compile("(p").unwrap_err();
//! assert_eq!(err.description(), "unmatched open parenthesis");
//! assert_eq!((err.start(), err.end()), (0, 1));
//! ```
//!
//! ## Core Components
//!
//! - **[`lexer`]**: tokens and the sorted variable table.
//! - **[`parser`]**: operator-precedence parser producing an [`ast::Expr`].
//! - **[`table`]**: truth-table enumeration, classification, equivalence.
//! - **[`dot`]**: Graphviz rendering of a formula's tree.

pub mod ast;
pub mod dot;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod table;
pub mod token;
pub mod types;

use std::fmt;
use std::str::FromStr;

use crate::ast::Expr;
use crate::error::{Error, Result};

/// A compiled formula: its tree and the sorted names of its variables.
///
/// Every [`Expr::Var`] in `expr` indexes into `variables`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub expr: Expr,
    pub variables: Vec<String>,
}

impl Compiled {
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// Evaluate under `assignment`, one value per entry of `variables`.
    pub fn eval(&self, assignment: &[bool]) -> bool {
        self.expr.eval(assignment)
    }
}

impl fmt::Display for Compiled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr.display(&self.variables))
    }
}

impl FromStr for Compiled {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        compile(s)
    }
}

/// Compiles `text` into a formula.
///
/// # Errors
///
/// Returns the first lexical or syntax error, see [`error::ErrorKind`].
pub fn compile(text: &str) -> Result<Compiled> {
    let scanned = lexer::scan(text)?;
    parser::parse(scanned)
}
