//! # Abstract Syntax Trees
//!
//! The purely structural output of a parse. Nodes are created only by the
//! PEG evaluator and never mutated afterwards.

use std::fmt;

use compact_str::CompactString;

/// One node of a parse result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ast {
    /// Structural placeholder for an optional or zero-matched construct
    /// that still has to hand back a node.
    Empty,
    /// A matched lexeme, with no type label.
    Terminal(CompactString),
    /// A subtree tagged with the name of the rule that produced it.
    Nonterminal(CompactString, Box<Ast>),
    /// An unlabeled ordered sequence of children.
    Branches(Vec<Ast>),
}

impl Ast {
    /// A display adapter that renders one line per node with
    /// depth-proportional indentation. Terminals print their token,
    /// nonterminals print their type name above their subtree, empty nodes
    /// print nothing, and branches are transparent grouping.
    #[must_use]
    pub const fn pretty(&self) -> Pretty<'_> {
        Pretty(self)
    }

    /// Matched lexemes in left-to-right order.
    #[must_use]
    pub fn terminals(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_terminals(&mut out);
        out
    }

    fn collect_terminals<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Empty => {}
            Self::Terminal(token) => out.push(token.as_str()),
            Self::Nonterminal(_, child) => child.collect_terminals(out),
            Self::Branches(children) => {
                for child in children {
                    child.collect_terminals(out);
                }
            }
        }
    }

    fn write_pretty(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Terminal(token) => {
                writeln!(f, "{:indent$}{token}", "", indent = depth * 2)
            }
            Self::Nonterminal(name, child) => {
                writeln!(f, "{:indent$}{name}", "", indent = depth * 2)?;
                child.write_pretty(f, depth + 1)
            }
            Self::Branches(children) => {
                for child in children {
                    child.write_pretty(f, depth)?;
                }
                Ok(())
            }
        }
    }
}

/// See [`Ast::pretty`].
pub struct Pretty<'a>(&'a Ast);

impl fmt::Display for Pretty<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_pretty(f, 0)
    }
}
