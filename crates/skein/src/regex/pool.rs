//! # Pattern Pool
//!
//! Compiling a pattern builds an NFA and collapses it to a DFA — too heavy
//! to repeat for the handful of patterns the scanner leans on constantly.
//! The pool caches compiled regexes under string keys and hands out clones.
//!
//! Lookup contract: a key hit whose stored source pattern matches returns
//! the cached regex. A key hit with a *different* pattern derives a new key
//! by a fixed rotation rule — prepend the letter `'a' + pattern.len() % 26`
//! — and seeks again, so lookups stay deterministic and collision-free for
//! the well-known entries.
//!
//! The pool is process-wide and internally locked; lookups are linearizable.

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use std::sync::{Mutex, PoisonError};

use crate::error::InvalidRegex;
use crate::regex::Regex;

/// The well-known patterns every scanner shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellKnown {
    Integral,
    Float,
    Word,
    Whitespace,
    Letter,
    Char,
    Repl,
}

impl WellKnown {
    /// Pool key for this entry.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Integral => "integral",
            Self::Float => "float",
            Self::Word => "word",
            Self::Whitespace => "whitespace",
            Self::Letter => "letter",
            Self::Char => "char",
            Self::Repl => "repl",
        }
    }

    /// Source pattern for this entry.
    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::Integral => r"[+\-]?(0|[1-9]\d*)",
            Self::Float => r"[+\-]?(0|[1-9]\d*)?(\.\d*)?",
            Self::Word => r"\A+",
            Self::Whitespace => r"\s+",
            Self::Letter => r"[\a\U]",
            Self::Char => ".",
            Self::Repl => r"{\A+}",
        }
    }
}

/// Keyed cache of compiled regexes.
#[derive(Debug, Default)]
pub struct RegexPool {
    entries: HashMap<String, Regex, ahash::RandomState>,
}

impl RegexPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the regex cached under `name`, compiling and inserting
    /// `pattern` on a miss. A hit whose source differs rotates the key and
    /// seeks again.
    pub fn lookup(&mut self, name: &str, pattern: &str) -> Result<Regex, InvalidRegex> {
        let mut key = name.to_string();
        loop {
            match self.entries.get(&key) {
                Some(cached) if cached.pattern() == pattern => return Ok(cached.clone()),
                Some(_) => key = rotate(&key, pattern),
                None => {
                    let compiled = Regex::new(pattern)?;
                    self.entries.insert(key, compiled.clone());
                    return Ok(compiled);
                }
            }
        }
    }

    /// Fetch one of the seven built-in entries. The patterns are constants
    /// verified by the test suite, so compilation cannot fail.
    pub fn well_known(&mut self, which: WellKnown) -> Regex {
        if let Some(cached) = self.entries.get(which.key()) {
            return cached.clone();
        }
        let compiled =
            Regex::new(which.pattern()).expect("well-known pool pattern must compile");
        self.entries.insert(which.key().to_string(), compiled.clone());
        compiled
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn rotate(key: &str, pattern: &str) -> String {
    let letter = (b'a' + (pattern.len() % 26) as u8) as char;
    let mut rotated = String::with_capacity(key.len() + 1);
    rotated.push(letter);
    rotated.push_str(key);
    rotated
}

static POOL: Lazy<Mutex<RegexPool>> = Lazy::new(|| Mutex::new(RegexPool::new()));

/// Process-wide pool access, recovering from poisoning (the pool holds no
/// invariants a panicked lookup could have broken).
pub(crate) fn shared<R>(with: impl FnOnce(&mut RegexPool) -> R) -> R {
    let mut guard = POOL.lock().unwrap_or_else(PoisonError::into_inner);
    with(&mut guard)
}
