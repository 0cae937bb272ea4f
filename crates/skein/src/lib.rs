//! # Skein
//!
//! A self-contained text-processing toolkit with two layered components: a
//! regular-expression engine that compiles patterns into deterministic
//! state machines, and a PEG parser generator that reads grammar
//! description files and parses input streams into abstract syntax trees.
//! A checkpointed scanner binds the two together.
//!
//! ## Quick start
//!
//! ```
//! use skein::Grammar;
//!
//! let grammar = Grammar::from_source(
//!     "Greeting' -> \"hello|hi\" Name\nName -> \"\\A+\"\n",
//! )?;
//! let ast = grammar.parse("hello world").expect("input matches");
//! print!("{}", ast.pretty());
//! # Ok::<(), skein::InvalidGrammar>(())
//! ```
//!
//! ## Layers
//!
//! - [`interval`] / [`disjoint`] — the balanced interval map and union-find
//!   the automata are built on
//! - [`automata`] — Thompson NFA construction and subset-construction DFA
//! - [`regex`] — the pattern surface: compilation, matching, the pattern
//!   pool
//! - [`scan`] — the checkpointed scanner: regex-driven tokenization, typed
//!   readers, savepoints
//! - [`peg`] — grammar ingest and prioritized-choice evaluation
//! - [`ast`] — the structural parse result and its formatter
//!
//! The engine is single-threaded and synchronous; the only process-wide
//! state is the internally locked pattern pool.

pub mod ast;
pub mod automata;
pub mod disjoint;
pub mod error;
pub mod interval;
pub mod peg;
pub mod regex;
pub mod scan;

pub use ast::Ast;
pub use automata::{Dfa, Nfa, StateId};
pub use disjoint::DisjointSets;
pub use error::{Error, InvalidGrammar, InvalidRegex, ScanError};
pub use interval::IntervalTree;
pub use peg::{Grammar, Repeat, Rule, RuleKind, RuleTable};
pub use regex::{Regex, RegexPool, WellKnown};
pub use scan::{Checkpoint, ScanState, Scanner, Source};
