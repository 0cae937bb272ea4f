//! # Grammar Ingest and Parsing
//!
//! Phase one reads a grammar description, line-oriented:
//!
//! ```text
//! # comment
//! Name' -> "terminal regex" Other ("sub" | Choice)* Maybe?
//! ```
//!
//! A trailing apostrophe marks the start symbol (exactly one must be
//! declared). Each right-hand side is parsed by a dedicated mini-scanner
//! over the remainder of its line and stored as a [`RuleKind::Choice`]
//! under the rule's name.
//!
//! Phase two evaluates the start rule against an input stream and returns
//! its AST only when the whole input was consumed.
//!
//! ## Usage
//!
//! ```
//! use skein::Grammar;
//!
//! let grammar = Grammar::from_source("List' -> Num+\nNum -> \"\\d+\"\n")?;
//! let ast = grammar.parse("1 2 3").expect("input matches");
//! assert_eq!(ast.terminals(), vec!["1", "2", "3"]);
//! assert_eq!(grammar.parse("1 2 x"), None);
//! # Ok::<(), skein::InvalidGrammar>(())
//! ```

use std::fs;
use std::path::Path;

use compact_str::CompactString;

use crate::ast::Ast;
use crate::error::{Error, InvalidGrammar};
use crate::peg::rule::{Repeat, Rule, RuleKind, RuleTable};
use crate::regex::{Regex, WellKnown};
use crate::scan::Scanner;

const COMMENT: u8 = b'#';
const START_MARK: char = '\'';
const TERMINAL_DELIM: u8 = b'"';
const CHOOSE: u8 = b'|';
const SUB_START: u8 = b'(';
const SUB_END: u8 = b')';
const KLEENE_STAR: u8 = b'*';
const KLEENE_PLUS: u8 = b'+';
const KLEENE_OPTIONAL: u8 = b'?';

/// The pattern a rule name is read with: letters, optionally marked as the
/// start symbol.
const MARKED_WORD_KEY: &str = "grammar-marked-word";
const MARKED_WORD_EXPR: &str = r"\A+'?";

/// The rule separator.
const ARROW_KEY: &str = "grammar-arrow";
const ARROW_EXPR: &str = r"\->";

/// A parsing expression grammar: a start symbol and the rule table.
#[derive(Debug, Clone)]
pub struct Grammar {
    start: CompactString,
    table: RuleTable,
}

impl Grammar {
    /// Read and ingest a grammar description file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_source(&text)?)
    }

    /// Ingest a grammar description from memory.
    pub fn from_source(text: &str) -> Result<Self, InvalidGrammar> {
        let marked_word = pool_regex(MARKED_WORD_KEY, MARKED_WORD_EXPR)?;
        let arrow = pool_regex(ARROW_KEY, ARROW_EXPR)?;

        let mut scanner = Scanner::new(text);
        let mut start: Option<CompactString> = None;
        let mut table = RuleTable::default();

        while !scanner.at_eof() {
            if scanner.peek(0) == Some(COMMENT) {
                if scanner.read_line().is_err() {
                    break;
                }
                continue;
            }

            let mut name = scanner.next(&marked_word).map_err(|err| {
                InvalidGrammar::MalformedDefinition {
                    detail: format!("expected rule name ({})", err.message),
                    line: err.state.line,
                    column: err.state.column,
                }
            })?;

            if name.ends_with(START_MARK) {
                name.pop();
                if start.is_some() {
                    let at = scanner.state();
                    return Err(InvalidGrammar::MultipleStartSymbols {
                        line: at.line,
                        column: at.column,
                    });
                }
                start = Some(name.as_str().into());
            }

            scanner.next(&arrow).map_err(|err| InvalidGrammar::MissingArrow {
                line: err.state.line,
                column: err.state.column,
            })?;

            let line_number = scanner.state().line;
            let definition = scanner.read_line().map_err(|err| {
                InvalidGrammar::MalformedDefinition {
                    detail: "missing definition".to_string(),
                    line: err.state.line,
                    column: err.state.column,
                }
            })?;

            table.insert(name.as_str().into(), parse_definition(&definition, line_number)?);
        }

        match start {
            Some(start) => Ok(Self { start, table }),
            None => Err(InvalidGrammar::NoStartSymbol),
        }
    }

    /// The nonterminal parsing begins from.
    #[must_use]
    pub fn start_symbol(&self) -> &str {
        &self.start
    }

    /// Look up a rule by nonterminal name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.table.get(name)
    }

    /// Number of rules in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Evaluate the start rule against `input`. `Some` only when the rule
    /// matched *and* the scanner consumed the entire input.
    #[must_use]
    pub fn parse(&self, input: &str) -> Option<Ast> {
        let mut scanner = Scanner::new(input);
        let rule = self.table.get(&self.start)?;
        let result = rule.parse(&mut scanner, &self.table)?;
        if !scanner.at_eof() {
            return None;
        }
        Some(Ast::Nonterminal(self.start.clone(), Box::new(result)))
    }
}

/// The two ingest patterns are constants; a compile failure here is a
/// programming error surfaced as a malformed grammar rather than a panic.
fn pool_regex(key: &str, pattern: &str) -> Result<Regex, InvalidGrammar> {
    Regex::from_pool(key, pattern).map_err(|source| InvalidGrammar::InvalidTerminal { source, line: 0 })
}

/// Parse one right-hand side with a mini-scanner over the line.
fn parse_definition(text: &str, line: u32) -> Result<Rule, InvalidGrammar> {
    let mut scanner = Scanner::new(text);
    parse_choices(&mut scanner, line)
}

fn parse_choices(scanner: &mut Scanner<'_>, line: u32) -> Result<Rule, InvalidGrammar> {
    let letter = Regex::well_known(WellKnown::Letter);
    let mut alternatives: Vec<Rule> = vec![Rule::sequence(Vec::new())];

    loop {
        let Some(next) = scanner.peek(0) else { break };

        // Letters stay in the stream for the word read below; everything
        // else is consumed here. Reading through the scanner keeps the
        // delimiter handling consistent for single-letter nonterminals.
        let symbol = if letter.matches_bytes(&[next], 0) {
            next
        } else {
            match scanner.read() {
                Ok(byte) => byte,
                Err(_) => break,
            }
        };

        match symbol {
            TERMINAL_DELIM => {
                let mut term = scanner.read_until(TERMINAL_DELIM);
                if !term.ends_with('"') {
                    return Err(malformed("unterminated terminal", line, scanner));
                }
                term.pop();
                let regex = Regex::new(&term)
                    .map_err(|source| InvalidGrammar::InvalidTerminal { source, line })?;
                append(&mut alternatives, Rule::terminal(regex));
            }
            CHOOSE => alternatives.push(Rule::sequence(Vec::new())),
            SUB_START => {
                let sub = parse_choices(scanner, line)?;
                append(&mut alternatives, sub);
            }
            SUB_END => break,
            quantifier @ (KLEENE_STAR | KLEENE_PLUS | KLEENE_OPTIONAL) => {
                set_last_repeat(&mut alternatives, quantifier, line, scanner)?;
            }
            word_start if letter.matches_bytes(&[word_start], 0) => {
                let word = scanner.next_word().map_err(|err| {
                    malformed(&format!("expected nonterminal ({})", err.message), line, scanner)
                })?;
                append(&mut alternatives, Rule::nonterminal(word.as_str().into()));
            }
            other => {
                return Err(malformed(
                    &format!("unexpected character '{}'", other as char),
                    line,
                    scanner,
                ));
            }
        }
    }

    // Every alternative must hold at least one element by evaluation time.
    for alternative in &alternatives {
        if let RuleKind::Sequence(children) = &alternative.kind {
            if children.is_empty() {
                return Err(malformed("empty alternative", line, scanner));
            }
        }
    }

    Ok(Rule::choice(alternatives))
}

fn append(alternatives: &mut [Rule], rule: Rule) {
    if let Some(Rule {
        kind: RuleKind::Sequence(children),
        ..
    }) = alternatives.last_mut()
    {
        children.push(rule);
    }
}

fn set_last_repeat(
    alternatives: &mut [Rule],
    quantifier: u8,
    line: u32,
    scanner: &Scanner<'_>,
) -> Result<(), InvalidGrammar> {
    let repeat = match quantifier {
        KLEENE_STAR => Repeat::ZeroOrMore,
        KLEENE_PLUS => Repeat::OneOrMore,
        _ => Repeat::Optional,
    };
    if let Some(Rule {
        kind: RuleKind::Sequence(children),
        ..
    }) = alternatives.last_mut()
    {
        if let Some(last) = children.last_mut() {
            last.repeat = repeat;
            return Ok(());
        }
    }
    Err(malformed("quantifier with nothing to repeat", line, scanner))
}

fn malformed(detail: &str, line: u32, scanner: &Scanner<'_>) -> InvalidGrammar {
    InvalidGrammar::MalformedDefinition {
        detail: detail.to_string(),
        line,
        column: scanner.state().column,
    }
}
