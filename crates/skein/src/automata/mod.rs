//! # Finite Automata
//!
//! The two state machines behind the regex engine: a Thompson-style ε-NFA
//! composed from primitives and combinators, and the DFA obtained from it by
//! grouping states into ε-closure classes.
//!
//! Both machines are arenas: states live in a `Vec` owned by the machine and
//! edges are indices, so the cycles that Kleene operators introduce never
//! turn into ownership cycles.

mod dfa;
mod nfa;

pub use dfa::Dfa;
pub use nfa::Nfa;

/// Index of a state within its owning automaton.
pub type StateId = usize;

/// Upper end of the machine alphabet: the engine is ASCII-oriented and `.`
/// spans `[0, CHAR_MAX]`.
pub(crate) const CHAR_MAX: u8 = 0x7f;
