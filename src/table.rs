//! Truth-table enumeration.
//!
//! This module enumerates every assignment of a formula's variables and
//! reports the formula's value for each of them.
//!
//! # Order
//!
//! An assignment is read as a binary number with index 0 as the most
//! significant bit. Rows are produced counting upward from all-false
//! (`0…0`) to all-true (`1…1`), so a formula over `n` variables yields
//! exactly `2^n` rows. A formula without variables yields one row with the
//! empty assignment.
//!
//! # Example
//!
//! ```
//! use truthtable_rs::compile;
//! use truthtable_rs::table::{enumerate, TruthTable, Classification};
//!
//! let f = compile("p -> q").unwrap();
//!
//! let mut values = Vec::new();
//! enumerate(&f.expr, f.num_vars(), |_, value| values.push(value));
//! assert_eq!(values, vec![true, true, false, true]);
//!
//! let table = TruthTable::new(&f);
//! assert_eq!(table.count_models(), 3);
//! assert_eq!(table.classify(), Classification::Contingent);
//! ```
//!
//! Note: the number of rows is exponential in the number of variables.
//! Use [`row_count`] to check the size before enumerating untrusted input.

use std::fmt;

use log::debug;
use num_bigint::BigUint;

use crate::ast::Expr;
use crate::Compiled;

/// Calls `sink` once per assignment of `num_vars` variables, in ascending
/// binary-counter order, with the assignment and the value of `expr` on it.
///
/// The assignment slice is reused between calls; copy it to keep it.
pub fn enumerate<F>(expr: &Expr, num_vars: usize, mut sink: F)
where
    F: FnMut(&[bool], bool),
{
    debug!("enumerate(num_vars = {})", num_vars);

    let mut assignment = vec![false; num_vars];
    loop {
        let value = expr.eval(&assignment);
        sink(&assignment, value);
        if !advance(&mut assignment) {
            break;
        }
    }
}

/// Advance `assignment` to the next row, treating it as a binary counter
/// with index 0 as the most significant bit.
///
/// Returns `false` (leaving `assignment` unchanged) if it was the last row.
pub fn advance(assignment: &mut [bool]) -> bool {
    match assignment.iter().rposition(|&b| !b) {
        Some(i) => {
            assignment[i] = true;
            assignment[i + 1..].fill(false);
            true
        }
        None => false,
    }
}

/// Number of rows in the truth table of a formula with `num_vars` variables.
pub fn row_count(num_vars: usize) -> BigUint {
    BigUint::from(1u32) << num_vars
}

/// The assignment at position `row` of the enumeration order.
///
/// This is the pure counterpart of [`advance`]: bit `num_vars - 1 - i` of
/// `row` is the value of variable `i`. Bits of `row` above `num_vars` are
/// ignored.
pub fn assignment_at(row: &BigUint, num_vars: usize) -> Vec<bool> {
    (0..num_vars).map(|i| row.bit((num_vars - 1 - i) as u64)).collect()
}

/// Semantic status of a formula.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Classification {
    /// True under every assignment.
    Tautology,
    /// False under every assignment.
    Contradiction,
    /// True under some assignments and false under others.
    Contingent,
}

impl Classification {
    fn from_counts(models: usize, rows: usize) -> Self {
        if models == rows {
            Classification::Tautology
        } else if models == 0 {
            Classification::Contradiction
        } else {
            Classification::Contingent
        }
    }

    pub fn is_satisfiable(self) -> bool {
        self != Classification::Contradiction
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Tautology => write!(f, "tautology"),
            Classification::Contradiction => write!(f, "contradiction"),
            Classification::Contingent => write!(f, "contingent"),
        }
    }
}

/// Classify `expr` over `num_vars` variables without storing the table.
pub fn classify(expr: &Expr, num_vars: usize) -> Classification {
    let mut models = 0;
    let mut rows = 0;
    enumerate(expr, num_vars, |_, value| {
        rows += 1;
        if value {
            models += 1;
        }
    });
    Classification::from_counts(models, rows)
}

/// Whether two formulas agree on every assignment.
///
/// Variables are matched by name; a variable that occurs in only one of the
/// formulas is enumerated as well, so `p` and `p \/ (q /\ ~q)` are
/// equivalent while `p` and `q` are not.
pub fn equivalent(lhs: &Compiled, rhs: &Compiled) -> bool {
    let mut names: Vec<&String> = lhs.variables.iter().chain(&rhs.variables).collect();
    names.sort_unstable();
    names.dedup();

    // Position of each side's variables in the merged table.
    let position = |variables: &[String]| -> Vec<usize> {
        variables
            .iter()
            .map(|v| names.partition_point(|&n| n < v))
            .collect()
    };
    let lhs_pos = position(&lhs.variables);
    let rhs_pos = position(&rhs.variables);

    let mut assignment = vec![false; names.len()];
    let mut lhs_values = vec![false; lhs_pos.len()];
    let mut rhs_values = vec![false; rhs_pos.len()];
    loop {
        for (value, &i) in lhs_values.iter_mut().zip(&lhs_pos) {
            *value = assignment[i];
        }
        for (value, &i) in rhs_values.iter_mut().zip(&rhs_pos) {
            *value = assignment[i];
        }
        if lhs.eval(&lhs_values) != rhs.eval(&rhs_values) {
            debug!("equivalent: differ at {:?}", assignment);
            return false;
        }
        if !advance(&mut assignment) {
            return true;
        }
    }
}

/// One row of a truth table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub assignment: Vec<bool>,
    pub value: bool,
}

/// A fully materialized truth table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    formula: String,
    variables: Vec<String>,
    rows: Vec<Row>,
}

impl TruthTable {
    pub fn new(formula: &Compiled) -> Self {
        let mut rows = Vec::new();
        enumerate(&formula.expr, formula.num_vars(), |assignment, value| {
            rows.push(Row {
                assignment: assignment.to_vec(),
                value,
            });
        });
        TruthTable {
            formula: formula.to_string(),
            variables: formula.variables.clone(),
            rows,
        }
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Column of results, in row order.
    pub fn values(&self) -> impl Iterator<Item = bool> + '_ {
        self.rows.iter().map(|row| row.value)
    }

    /// Rows on which the formula is true.
    pub fn models(&self) -> impl Iterator<Item = &Row> + '_ {
        self.rows.iter().filter(|row| row.value)
    }

    pub fn count_models(&self) -> usize {
        self.models().count()
    }

    pub fn classify(&self) -> Classification {
        Classification::from_counts(self.count_models(), self.rows.len())
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in &self.variables {
            write!(f, "{} ", name)?;
        }
        writeln!(f, "| {}", self.formula)?;
        for row in &self.rows {
            for (name, &value) in self.variables.iter().zip(&row.assignment) {
                write!(f, "{:<width$} ", value as u8, width = name.chars().count())?;
            }
            writeln!(f, "| {}", row.value as u8)?;
        }
        Ok(())
    }
}
