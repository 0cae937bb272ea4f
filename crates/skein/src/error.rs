//! # Error Types
//!
//! Every failure mode of the toolkit, in three layers:
//!
//! - [`InvalidRegex`]: a pattern failed to compile
//! - [`InvalidGrammar`]: a grammar description failed to ingest
//! - [`ScanError`]: the scanner could not produce what was asked of it
//!
//! A parse *miss* is not an error: rule evaluation communicates failure with
//! `Option`, and only [`Grammar::parse`](crate::Grammar::parse) turns a
//! top-level miss into `None`.
//!
//! When the `diagnostics` feature is enabled, all error types derive
//! [`miette::Diagnostic`] for rich reporting.

use thiserror::Error;

use crate::scan::ScanState;

#[cfg(feature = "diagnostics")]
use miette::Diagnostic;

/// A regular expression pattern that could not be compiled.
///
/// Each variant records the byte offset within the pattern at which the
/// problem was detected and, where one exists, the offending character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum InvalidRegex {
    #[error("empty character class at position {position}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(regex::empty_class)))]
    EmptyClass { position: usize },

    #[error("unterminated character class opened at position {position}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(regex::unterminated_class)))]
    UnterminatedClass { position: usize },

    #[error("reversed range '{lo}-{hi}' at position {position}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(regex::reversed_range)))]
    ReversedRange { lo: char, hi: char, position: usize },

    #[error("misplaced '-' at position {position}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(regex::misplaced_hyphen)))]
    MisplacedHyphen { position: usize },

    #[error("unbalanced group at position {position}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(regex::unbalanced_group)))]
    UnbalancedGroup { position: usize },

    #[error("quantifier '{quantifier}' with no preceding atom at position {position}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(regex::stray_quantifier)))]
    StrayQuantifier { quantifier: char, position: usize },

    #[error("unknown escape '\\{escape}' at position {position}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(regex::unknown_escape)))]
    UnknownEscape { escape: char, position: usize },

    #[error("dangling '\\' at end of pattern (position {position})")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(regex::dangling_escape)))]
    DanglingEscape { position: usize },
}

impl InvalidRegex {
    /// Byte offset within the pattern at which the error was detected.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::EmptyClass { position }
            | Self::UnterminatedClass { position }
            | Self::ReversedRange { position, .. }
            | Self::MisplacedHyphen { position }
            | Self::UnbalancedGroup { position }
            | Self::StrayQuantifier { position, .. }
            | Self::UnknownEscape { position, .. }
            | Self::DanglingEscape { position } => *position,
        }
    }

    /// The character that triggered the error, if one exists.
    #[must_use]
    pub const fn offending(&self) -> Option<char> {
        match self {
            Self::StrayQuantifier { quantifier, .. } => Some(*quantifier),
            Self::UnknownEscape { escape, .. } => Some(*escape),
            Self::ReversedRange { hi, .. } => Some(*hi),
            Self::MisplacedHyphen { .. } => Some('-'),
            _ => None,
        }
    }
}

/// A grammar description that could not be ingested.
#[derive(Debug, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum InvalidGrammar {
    #[error("no start symbol declared")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::no_start_symbol)))]
    NoStartSymbol,

    #[error("multiple start symbols (second declared at line {line}, column {column})")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::multiple_start_symbols)))]
    MultipleStartSymbols { line: u32, column: u32 },

    #[error("expected '->' after rule name at line {line}, column {column}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::missing_arrow)))]
    MissingArrow { line: u32, column: u32 },

    #[error("malformed definition at line {line}, column {column}: {detail}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::malformed_definition)))]
    MalformedDefinition {
        detail: String,
        line: u32,
        column: u32,
    },

    #[error("invalid terminal pattern at line {line}: {source}")]
    #[cfg_attr(feature = "diagnostics", diagnostic(code(grammar::invalid_terminal)))]
    InvalidTerminal {
        #[source]
        source: InvalidRegex,
        line: u32,
    },
}

impl InvalidGrammar {
    /// Line of the grammar file the error was detected on, when known.
    #[must_use]
    pub const fn line(&self) -> Option<u32> {
        match self {
            Self::NoStartSymbol => None,
            Self::MultipleStartSymbols { line, .. }
            | Self::MissingArrow { line, .. }
            | Self::MalformedDefinition { line, .. }
            | Self::InvalidTerminal { line, .. } => Some(*line),
        }
    }
}

/// The scanner could not produce a token, line, or byte.
///
/// Carries the scan state (cursor, line, column, stream bits) at the moment
/// of failure.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
#[cfg_attr(feature = "diagnostics", diagnostic(code(scan::failed)))]
pub struct ScanError {
    pub message: String,
    pub state: ScanState,
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.message, self.state.line, self.state.column
        )
    }
}

impl std::error::Error for ScanError {}

impl ScanError {
    pub(crate) fn new(message: impl Into<String>, state: ScanState) -> Self {
        Self {
            message: message.into(),
            state,
        }
    }

    /// The scan state at the moment of failure.
    #[must_use]
    pub const fn state(&self) -> &ScanState {
        &self.state
    }
}

/// Umbrella error for file-driven construction and command-line use.
#[derive(Debug, Error)]
#[cfg_attr(feature = "diagnostics", derive(Diagnostic))]
pub enum Error {
    #[error(transparent)]
    Regex(#[from] InvalidRegex),

    #[error(transparent)]
    Grammar(#[from] InvalidGrammar),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("failed to read grammar file: {0}")]
    Io(#[from] std::io::Error),
}
