//! # Regular Expressions
//!
//! The greedy, left-anchored regex engine. A [`Regex`] compiles its pattern
//! into a Thompson NFA, collapses that to a [`Dfa`](crate::automata::Dfa),
//! and answers match queries by driving the DFA.
//!
//! Pattern surface:
//!
//! - literals, `.` (any character), `(...)` groups, `|` alternation
//! - quantifiers `*`, `+`, `?`
//! - character classes `[...]` with ranges (`[a-z0-9]`)
//! - class escapes `\s`, `\d`, `\a` (lowercase), `\U` (uppercase),
//!   `\A` (alphabetic), `\w` (alphanumeric)
//! - escaped metacharacters (`\*`, `\[`, `\\`, ...)
//! - `\b` at either end of the pattern marks a word boundary; the scanner
//!   enforces it, the automaton never sees it
//!
//! `matches` demands the *entire* remainder of the input from the given
//! offset; it never backtracks to a shorter accepting prefix. Prefix
//! trimming is the scanner's job.
//!
//! ## Usage
//!
//! ```
//! use skein::Regex;
//!
//! let number = Regex::new(r"[+\-]?(0|[1-9]\d*)")?;
//! assert!(number.matches("-42", 0));
//! assert!(!number.matches("007", 0));
//! assert_eq!(number.find("abc 17"), Some(4));
//! # Ok::<(), skein::InvalidRegex>(())
//! ```

mod parser;
mod pool;

pub use pool::{RegexPool, WellKnown};

use crate::automata::{Dfa, Nfa};
use crate::error::InvalidRegex;

/// A compiled regular expression.
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    front_word_bounded: bool,
    back_word_bounded: bool,
    /// Exact ε-acceptance, computed on the NFA before subset construction.
    matches_empty: bool,
    dfa: Dfa,
}

impl Regex {
    /// Compile `pattern`.
    pub fn new(pattern: &str) -> Result<Self, InvalidRegex> {
        let (core, front, back) = strip_word_bounds(pattern);
        let base = if front { 2 } else { 0 };
        let nfa = parser::compile(core, base)?;
        let matches_empty = nfa
            .epsilon_closure(nfa.start())
            .iter()
            .any(|&s| nfa.state(s).accept);
        Ok(Self {
            pattern: pattern.to_string(),
            front_word_bounded: front,
            back_word_bounded: back,
            matches_empty,
            dfa: Dfa::from_nfa(&nfa),
        })
    }

    /// Fetch a regex from the process-wide pattern pool, compiling on first
    /// use. See [`RegexPool::lookup`] for the key contract.
    pub fn from_pool(name: &str, pattern: &str) -> Result<Self, InvalidRegex> {
        pool::shared(|pool| pool.lookup(name, pattern))
    }

    /// Fetch one of the seven built-in pool entries.
    #[must_use]
    pub fn well_known(which: WellKnown) -> Self {
        pool::shared(|pool| pool.well_known(which))
    }

    /// The source pattern, word-boundary markers included.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the pattern began with `\b`.
    #[must_use]
    pub const fn front_word_bounded(&self) -> bool {
        self.front_word_bounded
    }

    /// Whether the pattern ended with `\b`.
    #[must_use]
    pub const fn back_word_bounded(&self) -> bool {
        self.back_word_bounded
    }

    /// True iff the substring of `input` starting at `offset` drives the
    /// automaton to an accepting state after consuming *exactly* the
    /// remainder.
    #[must_use]
    pub fn matches(&self, input: &str, offset: usize) -> bool {
        self.matches_bytes(input.as_bytes(), offset)
    }

    /// Byte-level `matches`; the scanner works on raw bytes.
    pub(crate) fn matches_bytes(&self, bytes: &[u8], offset: usize) -> bool {
        if offset > bytes.len() {
            return false;
        }
        if offset == bytes.len() {
            return self.matches_empty;
        }
        self.dfa.reset();
        for &byte in &bytes[offset..] {
            if !self.dfa.step(byte) {
                return false;
            }
        }
        self.dfa.is_final()
    }

    /// Smallest offset at which the automaton accepts a non-empty prefix of
    /// the remainder; `None` when no offset does.
    #[must_use]
    pub fn find(&self, input: &str) -> Option<usize> {
        let bytes = input.as_bytes();
        for offset in 0..bytes.len() {
            self.dfa.reset();
            for &byte in &bytes[offset..] {
                if !self.dfa.step(byte) {
                    break;
                }
                if self.dfa.is_final() {
                    return Some(offset);
                }
            }
        }
        None
    }
}

/// Split leading/trailing `\b` markers off the pattern.
fn strip_word_bounds(pattern: &str) -> (&str, bool, bool) {
    let mut core = pattern;
    let front = core.starts_with("\\b");
    if front {
        core = &core[2..];
    }
    // A trailing `\b` only counts when the backslash itself is not escaped.
    let back = core.ends_with("\\b") && !core.ends_with("\\\\b");
    if back {
        core = &core[..core.len() - 2];
    }
    (core, front, back)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_bound_markers_are_stripped() {
        let regex = Regex::new(r"\bword\b").unwrap();
        assert!(regex.front_word_bounded());
        assert!(regex.back_word_bounded());
        assert!(regex.matches("word", 0));

        let plain = Regex::new("word").unwrap();
        assert!(!plain.front_word_bounded());
        assert!(!plain.back_word_bounded());
    }

    #[test]
    fn escaped_backslash_before_b_is_not_a_boundary() {
        let regex = Regex::new(r"a\\b").unwrap();
        assert!(!regex.back_word_bounded());
        assert!(regex.matches("a\\b", 0));
    }

    #[test]
    fn error_positions_account_for_stripped_front_marker() {
        let err = Regex::new(r"\ba[]").unwrap_err();
        assert_eq!(err.position(), 4);
    }
}
