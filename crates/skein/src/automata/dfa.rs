//! Subset construction and cursor-based traversal.
//!
//! States of the source NFA are grouped into ε-closure classes with a
//! disjoint-set forest; each class becomes one DFA state, accepting if any
//! member accepts, and every labeled NFA edge is relabeled between the
//! classes of its endpoints.

use std::cell::Cell;

use hashbrown::{HashMap, HashSet};

use crate::automata::{Nfa, StateId};
use crate::disjoint::DisjointSets;
use crate::interval::IntervalTree;

#[derive(Debug, Clone, Default)]
struct DfaState {
    accept: bool,
    edges: IntervalTree<u8, StateId>,
}

/// A deterministic automaton with a traversal cursor.
///
/// The cursor is part of the machine (reset/step/is_final walk it in place)
/// but lives in a [`Cell`] so a compiled machine can be shared immutably.
/// Traversal is single-threaded, like everything else in the engine.
#[derive(Debug, Clone)]
pub struct Dfa {
    states: Vec<DfaState>,
    start: StateId,
    cursor: Cell<StateId>,
}

impl Dfa {
    /// Build the class automaton of `nfa`.
    #[must_use]
    pub fn from_nfa(nfa: &Nfa) -> Self {
        // Group every NFA state with its ε-closure. Classes connected
        // through shared members merge transitively.
        let mut classes: DisjointSets<StateId> = DisjointSets::new();
        for id in 0..nfa.len() {
            if classes.find(&id).is_none() {
                classes.create(id);
                for member in nfa.epsilon_closure(id) {
                    if member != id {
                        classes.create(member);
                        classes.union(&member, &id);
                    }
                }
            }
        }

        // Number classes densely in state-id order.
        let mut index_of: HashMap<StateId, usize, ahash::RandomState> =
            HashMap::with_hasher(ahash::RandomState::new());
        let mut states: Vec<DfaState> = Vec::new();
        for id in 0..nfa.len() {
            let Some(root) = classes.find(&id) else {
                continue;
            };
            index_of.entry(root).or_insert_with(|| {
                states.push(DfaState::default());
                states.len() - 1
            });
        }

        // A class accepts iff any member accepts.
        for &f in nfa.finals() {
            if let Some(root) = classes.find(&f) {
                if let Some(&class) = index_of.get(&root) {
                    states[class].accept = true;
                }
            }
        }

        // Relabel every non-ε edge between classes. Members of one class
        // often contribute the same edge; insert each only once so the
        // intervals leaving a state stay disjoint.
        let mut recorded: HashSet<(usize, u8, u8, usize), ahash::RandomState> =
            HashSet::with_hasher(ahash::RandomState::new());
        for id in 0..nfa.len() {
            let Some(from_root) = classes.find(&id) else {
                continue;
            };
            let Some(&from) = index_of.get(&from_root) else {
                continue;
            };
            for (lo, hi, &target) in nfa.state(id).edges.iter() {
                let Some(to_root) = classes.find(&target) else {
                    continue;
                };
                let Some(&to) = index_of.get(&to_root) else {
                    continue;
                };
                if recorded.insert((from, lo, hi, to)) {
                    states[from].edges.insert(lo, hi, to);
                }
            }
        }

        let start = classes
            .find(&nfa.start())
            .and_then(|root| index_of.get(&root).copied())
            .unwrap_or(0);

        Self {
            states,
            start,
            cursor: Cell::new(start),
        }
    }

    /// Place the cursor on the start state.
    pub fn reset(&self) {
        self.cursor.set(self.start);
    }

    /// Try to consume one byte. On a hit the cursor advances and `true`
    /// comes back; on a miss the cursor stays put and `false` signals the
    /// failure to the caller.
    pub fn step(&self, byte: u8) -> bool {
        match self.states[self.cursor.get()].edges.find(byte, byte) {
            Some(&next) => {
                self.cursor.set(next);
                true
            }
            None => false,
        }
    }

    /// Whether the cursor rests on an accepting state.
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.states[self.cursor.get()].accept
    }

    /// Number of states in the machine.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}
