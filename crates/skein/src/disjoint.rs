//! # Disjoint-Set Forest
//!
//! Classical union-find over opaque hashable keys, with union by rank and
//! path compression. The DFA builder uses it to group NFA states into their
//! ε-closure classes.
//!
//! One behavior here is observable and relied upon: when two roots of equal
//! rank are united, the *second* argument's root becomes the parent and its
//! rank increments by one.
//!
//! ```
//! use skein::DisjointSets;
//!
//! let mut sets = DisjointSets::new();
//! sets.create("ann");
//! sets.create("ben");
//! sets.create("cleo");
//! sets.union(&"ann", &"ben");
//! assert_eq!(sets.find(&"ann"), sets.find(&"ben"));
//! assert_ne!(sets.find(&"ann"), sets.find(&"cleo"));
//! assert_eq!(sets.representatives().len(), 2);
//! ```

use std::hash::Hash;

use hashbrown::HashMap;

#[derive(Debug, Clone)]
struct Entry<K> {
    parent: K,
    rank: u32,
}

/// Union-find with rank and path compression.
#[derive(Debug, Clone)]
pub struct DisjointSets<K> {
    table: HashMap<K, Entry<K>, ahash::RandomState>,
}

impl<K> Default for DisjointSets<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> DisjointSets<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: HashMap::with_hasher(ahash::RandomState::new()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<K: Eq + Hash + Clone> DisjointSets<K> {
    /// Insert `key` as a singleton set. No-op if the key is already known.
    pub fn create(&mut self, key: K) {
        self.table.entry(key.clone()).or_insert(Entry {
            parent: key,
            rank: 1,
        });
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.table.contains_key(key)
    }

    /// Representative of `key`'s set, or `None` for an unknown key.
    ///
    /// Compresses the walked path so repeated queries are near-constant.
    pub fn find(&mut self, key: &K) -> Option<K> {
        if !self.table.contains_key(key) {
            return None;
        }

        // First pass: locate the root.
        let mut root = key.clone();
        loop {
            let parent = self.table[&root].parent.clone();
            if parent == root {
                break;
            }
            root = parent;
        }

        // Second pass: repoint everything on the path at the root.
        let mut cur = key.clone();
        while cur != root {
            let next = self.table[&cur].parent.clone();
            if let Some(entry) = self.table.get_mut(&cur) {
                entry.parent = root.clone();
            }
            cur = next;
        }

        Some(root)
    }

    /// Unite the sets holding `a` and `b` by rank. Unknown keys make this a
    /// no-op, as does uniting a set with itself.
    ///
    /// Tie rule: equal ranks put `b`'s root on top and bump its rank.
    pub fn union(&mut self, a: &K, b: &K) {
        let (Some(ra), Some(rb)) = (self.find(a), self.find(b)) else {
            return;
        };
        if ra == rb {
            return;
        }

        let rank_a = self.table[&ra].rank;
        let rank_b = self.table[&rb].rank;
        if rank_a < rank_b {
            if let Some(entry) = self.table.get_mut(&ra) {
                entry.parent = rb;
            }
        } else if rank_a > rank_b {
            if let Some(entry) = self.table.get_mut(&rb) {
                entry.parent = ra;
            }
        } else {
            if let Some(entry) = self.table.get_mut(&ra) {
                entry.parent = rb.clone();
            }
            if let Some(entry) = self.table.get_mut(&rb) {
                entry.rank += 1;
            }
        }
    }

    /// Every set representative, once each, in no particular order.
    #[must_use]
    pub fn representatives(&self) -> Vec<K> {
        let mut roots = Vec::new();
        for (key, entry) in &self.table {
            if entry.parent == *key {
                roots.push(key.clone());
            }
        }
        roots
    }
}
