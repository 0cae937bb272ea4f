//! Grammar description files on disk: construction from a path, comment and
//! blank-line handling, and error reporting.

use std::fs;
use std::path::PathBuf;

use skein::{Error, Grammar, InvalidGrammar};

/// Write a uniquely named grammar file under the system temp directory.
struct TempGrammar {
    path: PathBuf,
}

impl TempGrammar {
    fn new(name: &str, contents: &str) -> Self {
        let mut path = std::env::temp_dir();
        path.push(format!("skein-test-{}-{name}.peg", std::process::id()));
        fs::write(&path, contents).expect("temp grammar written");
        Self { path }
    }
}

impl Drop for TempGrammar {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[test]
fn grammar_loads_from_a_file() {
    let file = TempGrammar::new(
        "arithmetic",
        concat!(
            "# A tiny arithmetic grammar.\n",
            "\n",
            "Expr' -> Term ((\"\\+\"|\"\\-\") Term)*\n",
            "Term -> Factor ((\"\\*\"|\"/\") Factor)*\n",
            "\n",
            "# Parentheses recurse into Expr.\n",
            "Factor -> \"\\(\" Expr \"\\)\" | \"\\d+\"\n",
        ),
    );

    let grammar = Grammar::from_path(&file.path).unwrap();
    assert_eq!(grammar.start_symbol(), "Expr");
    assert_eq!(grammar.len(), 3);
    assert!(grammar.rule("Factor").is_some());
    assert!(grammar.parse("1 + 2 * (3 - 4)").is_some());
    assert!(grammar.parse("1 +").is_none());
}

#[test]
fn missing_file_surfaces_io_error() {
    let err = Grammar::from_path("/nonexistent/grammar.peg").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn comment_only_file_has_no_start_symbol() {
    let file = TempGrammar::new("comments", "# one\n# two\n\n");
    let err = Grammar::from_path(&file.path).unwrap_err();
    assert!(matches!(
        err,
        Error::Grammar(InvalidGrammar::NoStartSymbol)
    ));
}

#[test]
fn grammar_errors_render_their_location() {
    let err = Grammar::from_source("A' -> \"a\"\nB' -> \"b\"\n").unwrap_err();
    let text = format!("{err}");
    assert!(text.contains("start symbols"));
    assert!(text.contains("line 2"));

    let err = Grammar::from_source("Start \"a\"\n").unwrap_err();
    assert!(format!("{err}").contains("->"));
}

#[test]
fn rules_may_reference_rules_defined_later() {
    // Nonterminal references resolve at parse time, so definition order in
    // the file is free.
    let grammar = Grammar::from_source(concat!(
        "Greeting' -> Word Punct\n",
        "Punct -> \"!|\\?\"\n",
        "Word -> \"\\A+\"\n",
    ))
    .unwrap();
    assert!(grammar.parse("hello !").is_some());
    assert!(grammar.parse("hello ?").is_some());
    assert!(grammar.parse("hello").is_none());
}

#[test]
fn whitespace_in_a_terminal_pattern_never_matches_a_token() {
    // Tokens split at the delimiter, so a terminal whose pattern demands
    // interior whitespace ingests fine but can never be satisfied.
    let grammar = Grammar::from_source("S' -> \"a\\sb\"\n").unwrap();
    assert!(grammar.parse("a b").is_none());
    assert!(grammar.parse("ab").is_none());
}

#[test]
fn redefining_a_rule_keeps_the_last_definition() {
    let grammar = Grammar::from_source(concat!(
        "S' -> \"x\"\n",
        "S -> \"y\"\n",
    ))
    .unwrap();
    assert!(grammar.parse("y").is_some());
    assert!(grammar.parse("x").is_none());
}
