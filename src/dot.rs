//! Formula tree to DOT (Graphviz) conversion.
//!
//! # DOT Format
//!
//! The generated DOT output follows these conventions:
//! - **Connective nodes** (¬, ∧, ∨, →, ↔) are rendered with the node shape
//! - **Leaves** (variables and constants) are rendered with the leaf shape
//! - **Edges** go from a connective to its operands, left operand first;
//!   `ordering=out` keeps that order in the layout
//! - The **root** is placed at the top (source rank)
//!
//! # Examples
//!
//! ```
//! use truthtable_rs::compile;
//!
//! let f = compile("p -> (q or ~p)").unwrap();
//! let dot = f.expr.to_dot(&f.variables).unwrap();
//! assert!(dot.starts_with("graph {"));
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::fmt;
use std::fmt::Write as _;

use crate::ast::{Expr, Node, Notation};

/// Configuration options for DOT output generation.
///
/// Use `DotConfig::default()` for standard settings.
///
/// # Examples
///
/// ```
/// use truthtable_rs::ast::Notation;
/// use truthtable_rs::compile;
/// use truthtable_rs::dot::DotConfig;
///
/// let f = compile("p /\\ q").unwrap();
/// let config = DotConfig {
///     leaf_shape: "plaintext",
///     notation: Notation::Ascii,
///     ..DotConfig::default()
/// };
/// let dot = f.expr.to_dot_with_config(&f.variables, &config).unwrap();
/// assert!(dot.contains("label=\"/\\\\\""));
/// ```
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for connective nodes (default: "circle")
    pub node_shape: &'static str,
    /// Shape for variables and constants (default: "box")
    pub leaf_shape: &'static str,
    /// Style for operand edges (default: "solid")
    pub edge_style: &'static str,
    /// Glyphs used for node labels (default: Unicode)
    pub notation: Notation,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            leaf_shape: "box",
            edge_style: "solid",
            notation: Notation::Unicode,
        }
    }
}

impl Expr {
    /// Converts the formula tree to DOT (Graphviz) format.
    ///
    /// `variables` supplies the names for variable leaves. Nodes are numbered
    /// in preorder, so the root is always node `0`.
    pub fn to_dot<S: AsRef<str>>(&self, variables: &[S]) -> Result<String, fmt::Error> {
        self.to_dot_with_config(variables, &DotConfig::default())
    }

    /// Converts the formula tree to DOT format with custom configuration.
    pub fn to_dot_with_config<S: AsRef<str>>(&self, variables: &[S], config: &DotConfig) -> Result<String, fmt::Error> {
        let mut writer = DotWriter {
            dot: String::new(),
            variables,
            config,
            next_id: 0,
        };

        writeln!(writer.dot, "graph {{")?;
        writeln!(writer.dot, "graph [ordering=out];")?;
        writeln!(writer.dot, "node [shape={}];", config.node_shape)?;
        writer.tree(self)?;
        writeln!(writer.dot, "{{ rank=source; 0; }}")?;
        writeln!(writer.dot, "}}")?;
        Ok(writer.dot)
    }
}

struct DotWriter<'a, S> {
    dot: String,
    variables: &'a [S],
    config: &'a DotConfig,
    next_id: usize,
}

impl<S: AsRef<str>> DotWriter<'_, S> {
    /// Emit the tree under `root`.
    ///
    /// Nodes are numbered in preorder and each edge is written after the
    /// subtree of its child, on an explicit stack so deep formulas are safe.
    fn tree(&mut self, root: &Expr) -> fmt::Result {
        enum Step<'e> {
            Visit(&'e Expr, Option<usize>),
            Edge(usize, usize),
        }

        let notation = self.config.notation;
        let variables = self.variables;
        let mut stack = vec![Step::Visit(root, None)];
        while let Some(step) = stack.pop() {
            let (expr, parent) = match step {
                Step::Visit(expr, parent) => (expr, parent),
                Step::Edge(parent, child) => {
                    writeln!(self.dot, "{} -- {} [style={}];", parent, child, self.config.edge_style)?;
                    continue;
                }
            };

            let id = self.next_id;
            self.next_id += 1;
            if let Some(parent) = parent {
                stack.push(Step::Edge(parent, id));
            }

            match expr.node() {
                Node::Const(b) => self.leaf(id, notation.constant(b))?,
                Node::Var(v) => self.leaf(id, variables[v.index()].as_ref())?,
                Node::Not(e) => {
                    self.label(id, notation.negation().trim_end())?;
                    stack.push(Step::Visit(e, Some(id)));
                }
                Node::Binary(op, l, r) => {
                    self.label(id, op.glyph(notation))?;
                    stack.push(Step::Visit(r, Some(id)));
                    stack.push(Step::Visit(l, Some(id)));
                }
            }
        }
        Ok(())
    }

    fn leaf(&mut self, id: usize, label: &str) -> fmt::Result {
        writeln!(
            self.dot,
            "{} [shape={}, label=\"{}\"];",
            id,
            self.config.leaf_shape,
            escape(label)
        )
    }

    fn label(&mut self, id: usize, label: &str) -> fmt::Result {
        writeln!(self.dot, "{} [label=\"{}\"];", id, escape(label))
    }
}

/// Escape a label for use inside a double-quoted DOT string.
fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;

    /// Basic test: verify DOT output is generated without errors
    #[test]
    fn test_to_dot_basic() {
        let f = compile("~p and (q or r)").unwrap();
        let dot = f.expr.to_dot(&f.variables).unwrap();

        assert!(dot.starts_with("graph {"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("0 [label=\"∧\"];"));
        assert!(dot.contains("1 [label=\"¬\"];"));
        assert!(dot.contains("2 [shape=box, label=\"p\"];"));
        assert!(dot.contains("0 -- 1 [style=solid];"));
        assert!(dot.contains("1 -- 2 [style=solid];"));
        assert!(dot.contains("0 -- 3 [style=solid];"));
        assert!(dot.contains("3 -- 4 [style=solid];"));
        assert!(dot.contains("3 -- 5 [style=solid];"));
    }

    /// One node per tree node, one edge per non-root node
    #[test]
    fn test_to_dot_counts() {
        let f = compile("(p <-> q) -> ~(r \\/ T)").unwrap();
        let dot = f.expr.to_dot(&f.variables).unwrap();
        let edges = dot.lines().filter(|l| l.contains(" -- ")).count();
        let nodes = dot.lines().filter(|l| l.contains("label=")).count();
        assert_eq!(nodes, f.expr.size());
        assert_eq!(edges, f.expr.size() - 1);
    }

    /// Test with a lone constant
    #[test]
    fn test_to_dot_constant() {
        let f = compile("F").unwrap();
        let dot = f.expr.to_dot(&f.variables).unwrap();
        assert!(dot.contains("0 [shape=box, label=\"⊥\"];"));
        assert!(!dot.contains(" -- "));
    }

    /// Test with custom configuration
    #[test]
    fn test_to_dot_with_config() {
        let f = compile("~p -> q").unwrap();
        let config = DotConfig {
            node_shape: "ellipse",
            notation: Notation::Latex,
            ..DotConfig::default()
        };

        let dot = f.expr.to_dot_with_config(&f.variables, &config).unwrap();
        assert!(dot.contains("node [shape=ellipse];"));
        assert!(dot.contains("0 [label=\"\\\\to\"];"));
        assert!(dot.contains("1 [label=\"\\\\lnot\"];"));
    }

    /// Edges follow their child's subtree, in preorder
    #[test]
    fn test_to_dot_edge_order() {
        let f = compile("(p and q) or r").unwrap();
        let dot = f.expr.to_dot(&f.variables).unwrap();
        let body: Vec<&str> = dot.lines().skip(3).collect();
        assert_eq!(
            body,
            vec![
                "0 [label=\"∨\"];",
                "1 [label=\"∧\"];",
                "2 [shape=box, label=\"p\"];",
                "1 -- 2 [style=solid];",
                "3 [shape=box, label=\"q\"];",
                "1 -- 3 [style=solid];",
                "0 -- 1 [style=solid];",
                "4 [shape=box, label=\"r\"];",
                "0 -- 4 [style=solid];",
                "{ rank=source; 0; }",
                "}",
            ]
        );
    }

    /// Deep negation chains are exported without recursion
    #[test]
    fn test_to_dot_deep() {
        let input = format!("{}p", "~".repeat(100_000));
        let f = compile(&input).unwrap();
        let dot = f.expr.to_dot(&f.variables).unwrap();
        assert_eq!(dot.lines().filter(|l| l.contains(" -- ")).count(), 100_000);
        assert!(dot.contains("100000 [shape=box, label=\"p\"];"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("\\/"), "\\\\/");
        assert_eq!(escape("a\"b"), "a\\\"b");
    }
}
