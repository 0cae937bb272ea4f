//! # Rule Model
//!
//! The interpretable form of a grammar rule: a tagged variant with a
//! repetition quantifier, evaluated with ordered choice and prioritized
//! backtracking through scanner checkpoints.
//!
//! Evaluation is continuation-passing: a rule enumerates its matches in
//! priority order and offers each to the continuation, which represents
//! the rest of the enclosing sequence. A rejected match restores the
//! scanner and the next alternative is tried, so a later failure can reach
//! back into an earlier choice. Repetition and the optional quantifier are
//! possessive, as usual for PEGs: they commit to their greedy match and
//! offer no shorter one. The top-level parse takes the first complete
//! derivation and never revisits it — an earlier alternative's success is
//! committed even when a later one would have consumed more input.

use compact_str::CompactString;
use hashbrown::HashMap;

use crate::ast::Ast;
use crate::regex::Regex;
use crate::scan::Scanner;

/// Nonterminal name → rule, the table every evaluation threads through.
pub type RuleTable = HashMap<CompactString, Rule, ahash::RandomState>;

/// The continuation a rule offers its matches to. Returning `true` commits
/// the match; returning `false` sends the rule on to its next alternative.
type Accept<'c, 's> = &'c mut dyn FnMut(&mut Scanner<'s>, Ast) -> bool;

/// How often a rule is applied at its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    /// Exactly once; success and failure propagate.
    #[default]
    None,
    /// Until failure; zero matches is a successful [`Ast::Empty`].
    ZeroOrMore,
    /// Until failure; zero matches is a failure.
    OneOrMore,
    /// At most once; failure becomes [`Ast::Empty`].
    Optional,
}

/// The four rule shapes.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// A regex the scanner pulls one token for.
    Terminal(Regex),
    /// A reference into the rule table. Unknown names are parse-time
    /// failures, not build-time errors.
    Nonterminal(CompactString),
    /// All children in order, or nothing.
    Sequence(Vec<Rule>),
    /// Alternatives tried in order; an alternative restores the scanner on
    /// its own failure, and the choice itself saves nothing.
    Choice(Vec<Rule>),
}

/// One grammar rule: a shape plus its repetition quantifier.
#[derive(Debug, Clone)]
pub struct Rule {
    pub kind: RuleKind,
    pub repeat: Repeat,
}

impl Rule {
    #[must_use]
    pub const fn terminal(regex: Regex) -> Self {
        Self {
            kind: RuleKind::Terminal(regex),
            repeat: Repeat::None,
        }
    }

    #[must_use]
    pub const fn nonterminal(name: CompactString) -> Self {
        Self {
            kind: RuleKind::Nonterminal(name),
            repeat: Repeat::None,
        }
    }

    #[must_use]
    pub const fn sequence(children: Vec<Self>) -> Self {
        Self {
            kind: RuleKind::Sequence(children),
            repeat: Repeat::None,
        }
    }

    #[must_use]
    pub const fn choice(alternatives: Vec<Self>) -> Self {
        Self {
            kind: RuleKind::Choice(alternatives),
            repeat: Repeat::None,
        }
    }

    /// Evaluate the rule at the scanner's position and commit the first
    /// derivation. `None` is an ordinary parse miss; the scanner is back
    /// where it started.
    #[must_use]
    pub fn parse(&self, scanner: &mut Scanner<'_>, table: &RuleTable) -> Option<Ast> {
        let mut result = None;
        self.matches_into(scanner, table, &mut |_, ast| {
            result = Some(ast);
            true
        });
        result
    }

    /// Enumerate this rule's matches (quantifier applied) in priority
    /// order. Returns `true` once `accept` commits one; returns `false`
    /// with the scanner restored when every alternative is exhausted.
    fn matches_into<'s>(
        &self,
        scanner: &mut Scanner<'s>,
        table: &RuleTable,
        accept: Accept<'_, 's>,
    ) -> bool {
        match self.repeat {
            Repeat::None => self.body_matches(scanner, table, accept),
            Repeat::Optional => {
                let checkpoint = scanner.save_checkpoint();
                let node = self.first_body_match(scanner, table).unwrap_or(Ast::Empty);
                if accept(scanner, node) {
                    true
                } else {
                    scanner.restore_to(checkpoint);
                    false
                }
            }
            Repeat::ZeroOrMore => {
                let checkpoint = scanner.save_checkpoint();
                let node = collapse_matches(self.gather(scanner, table));
                if accept(scanner, node) {
                    true
                } else {
                    scanner.restore_to(checkpoint);
                    false
                }
            }
            Repeat::OneOrMore => {
                let checkpoint = scanner.save_checkpoint();
                let nodes = self.gather(scanner, table);
                if !nodes.is_empty() && accept(scanner, collapse_matches(nodes)) {
                    true
                } else {
                    scanner.restore_to(checkpoint);
                    false
                }
            }
        }
    }

    /// Enumerate matches of the rule body, ignoring the quantifier.
    fn body_matches<'s>(
        &self,
        scanner: &mut Scanner<'s>,
        table: &RuleTable,
        accept: Accept<'_, 's>,
    ) -> bool {
        match &self.kind {
            RuleKind::Terminal(regex) => {
                // One match only: the scanner's token is greedy and the
                // engine never backtracks to a shorter accepting prefix.
                let checkpoint = scanner.save_checkpoint();
                match scanner.next(regex) {
                    Ok(token) => {
                        if accept(scanner, Ast::Terminal(token.into())) {
                            true
                        } else {
                            scanner.restore_to(checkpoint);
                            false
                        }
                    }
                    Err(_) => {
                        scanner.restore_to(checkpoint);
                        false
                    }
                }
            }

            RuleKind::Nonterminal(name) => {
                let Some(rule) = table.get(name) else {
                    return false;
                };
                rule.matches_into(scanner, table, &mut |s, child| {
                    accept(s, Ast::Nonterminal(name.clone(), Box::new(child)))
                })
            }

            RuleKind::Sequence(children) => {
                let checkpoint = scanner.save_checkpoint();
                let mut nodes = Vec::with_capacity(children.len());
                let committed =
                    sequence_matches(children, scanner, table, &mut nodes, &mut |s, nodes| {
                        accept(s, collapse_matches(nodes.clone()))
                    });
                if !committed {
                    scanner.restore_to(checkpoint);
                }
                committed
            }

            RuleKind::Choice(alternatives) => {
                for alternative in alternatives {
                    if alternative.matches_into(scanner, table, accept) {
                        return true;
                    }
                }
                false
            }
        }
    }

    /// First match of the rule body, committed. The possessive quantifiers
    /// apply their body this way, once per iteration.
    fn first_body_match(&self, scanner: &mut Scanner<'_>, table: &RuleTable) -> Option<Ast> {
        let mut result = None;
        self.body_matches(scanner, table, &mut |_, ast| {
            result = Some(ast);
            true
        });
        result
    }

    /// Apply the rule body until it fails or stops consuming input.
    fn gather(&self, scanner: &mut Scanner<'_>, table: &RuleTable) -> Vec<Ast> {
        let mut nodes = Vec::new();
        loop {
            let before = scanner.state().cursor;
            match self.first_body_match(scanner, table) {
                Some(node) => {
                    nodes.push(node);
                    if scanner.state().cursor == before {
                        // An ε-match would repeat forever.
                        break;
                    }
                }
                None => break,
            }
        }
        nodes
    }
}

/// Thread a sequence: enumerate matches of the first child and, for each,
/// recurse on the rest; the continuation sees the collected nodes once
/// every child has matched.
fn sequence_matches<'s>(
    children: &[Rule],
    scanner: &mut Scanner<'s>,
    table: &RuleTable,
    nodes: &mut Vec<Ast>,
    accept_all: &mut dyn FnMut(&mut Scanner<'s>, &mut Vec<Ast>) -> bool,
) -> bool {
    let Some((first, rest)) = children.split_first() else {
        return accept_all(scanner, nodes);
    };
    first.matches_into(scanner, table, &mut |s, node| {
        nodes.push(node);
        let committed = sequence_matches(rest, s, table, nodes, accept_all);
        if !committed {
            nodes.pop();
        }
        committed
    })
}

/// Unary collapse: one node stands alone, several become branches, none is
/// the structural empty.
fn collapse_matches(mut nodes: Vec<Ast>) -> Ast {
    match nodes.len() {
        0 => Ast::Empty,
        1 => nodes.swap_remove(0),
        _ => Ast::Branches(nodes),
    }
}
