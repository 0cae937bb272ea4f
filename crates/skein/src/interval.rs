//! # Interval Tree
//!
//! An ordered map from closed intervals `[lo, hi]` to values, built as a
//! red-black tree augmented with the maximum upper bound of each subtree.
//! The augmentation makes stabbing queries (`find`) logarithmic in the
//! number of stored intervals.
//!
//! Intervals may overlap; nothing is merged on insertion. Callers that need
//! disjointness (the DFA does) enforce it themselves. Removal is not
//! supported — nothing in the engine ever takes an edge away from an
//! automaton.
//!
//! Nodes live in an arena (`Vec`) and reference each other by index, so the
//! tree is freely clonable and has no ownership cycles.
//!
//! ```
//! use skein::IntervalTree;
//!
//! let mut tree = IntervalTree::new();
//! tree.insert(b'a', b'z', "lower");
//! tree.insert(b'0', b'9', "digit");
//! assert_eq!(tree.find(b'q', b'q'), Some(&"lower"));
//! assert_eq!(tree.find(b'!', b'!'), None);
//! ```

/// Ordered interval map with subtree-maximum augmentation.
#[derive(Debug, Clone)]
pub struct IntervalTree<K, V> {
    nodes: Vec<Node<K, V>>,
    root: Option<usize>,
}

#[derive(Debug, Clone)]
struct Node<K, V> {
    lo: K,
    hi: K,
    /// Largest `hi` in the subtree rooted here.
    max_upper: K,
    value: V,
    red: bool,
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

impl<K, V> Default for IntervalTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> IntervalTree<K, V> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<K: Copy + Ord, V> IntervalTree<K, V> {
    /// Insert `[lo, hi] -> value`, keeping the tree balanced and the
    /// augmented maxima exact. Entries are ordered by `lo`; equal keys keep
    /// insertion order in the in-order walk.
    pub fn insert(&mut self, lo: K, hi: K, value: V) {
        let id = self.nodes.len();
        self.nodes.push(Node {
            lo,
            hi,
            max_upper: hi,
            value,
            red: true,
            parent: None,
            left: None,
            right: None,
        });

        // Ordinary BST descent on the lower bound.
        let mut cur = self.root;
        let mut parent = None;
        let mut went_left = false;
        while let Some(i) = cur {
            parent = Some(i);
            went_left = lo < self.nodes[i].lo;
            cur = if went_left {
                self.nodes[i].left
            } else {
                self.nodes[i].right
            };
        }

        match parent {
            Some(p) => {
                self.nodes[id].parent = Some(p);
                if went_left {
                    self.nodes[p].left = Some(id);
                } else {
                    self.nodes[p].right = Some(id);
                }
                self.update_max_upward(p);
            }
            None => self.root = Some(id),
        }

        self.insert_fixup(id);
    }

    /// First entry (by the augmented descent, tie-broken by in-order rank)
    /// whose interval contains `[lo, hi]`.
    #[must_use]
    pub fn find(&self, lo: K, hi: K) -> Option<&V> {
        let mut cur = self.root;
        while let Some(i) = cur {
            let n = &self.nodes[i];
            if n.lo <= lo && hi <= n.hi {
                return Some(&n.value);
            }
            cur = match n.left {
                Some(l) if self.nodes[l].max_upper >= lo => Some(l),
                _ => n.right,
            };
        }
        None
    }

    /// In-order iterator over `(lo, hi, value)`, ascending by `lo`.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Recompute one node's `max_upper` from its own bound and children.
    fn pull_max(&mut self, i: usize) {
        let mut max = self.nodes[i].hi;
        if let Some(l) = self.nodes[i].left {
            max = max.max(self.nodes[l].max_upper);
        }
        if let Some(r) = self.nodes[i].right {
            max = max.max(self.nodes[r].max_upper);
        }
        self.nodes[i].max_upper = max;
    }

    fn update_max_upward(&mut self, from: usize) {
        let mut cur = Some(from);
        while let Some(i) = cur {
            self.pull_max(i);
            cur = self.nodes[i].parent;
        }
    }

    /// Right rotation at `a`: `a`'s left child takes its place.
    fn ll_rotate(&mut self, a: usize) {
        let Some(b) = self.nodes[a].left else { return };

        self.nodes[a].left = self.nodes[b].right;
        if let Some(moved) = self.nodes[b].right {
            self.nodes[moved].parent = Some(a);
        }
        self.nodes[b].right = Some(a);

        self.nodes[b].parent = self.nodes[a].parent;
        match self.nodes[b].parent {
            Some(p) => {
                if self.nodes[p].left == Some(a) {
                    self.nodes[p].left = Some(b);
                } else {
                    self.nodes[p].right = Some(b);
                }
            }
            None => self.root = Some(b),
        }
        self.nodes[a].parent = Some(b);

        // The lifted node inherits the old subtree maximum; the demoted one
        // recomputes from its new children.
        self.nodes[b].max_upper = self.nodes[a].max_upper;
        self.pull_max(a);
    }

    /// Left rotation at `a`: `a`'s right child takes its place.
    fn rr_rotate(&mut self, a: usize) {
        let Some(b) = self.nodes[a].right else { return };

        self.nodes[a].right = self.nodes[b].left;
        if let Some(moved) = self.nodes[b].left {
            self.nodes[moved].parent = Some(a);
        }
        self.nodes[b].left = Some(a);

        self.nodes[b].parent = self.nodes[a].parent;
        match self.nodes[b].parent {
            Some(p) => {
                if self.nodes[p].left == Some(a) {
                    self.nodes[p].left = Some(b);
                } else {
                    self.nodes[p].right = Some(b);
                }
            }
            None => self.root = Some(b),
        }
        self.nodes[a].parent = Some(b);

        self.nodes[b].max_upper = self.nodes[a].max_upper;
        self.pull_max(a);
    }

    /// First half of a left-right double rotation: left-rotate `a`'s left
    /// child so the inner grandchild moves onto `a`'s left spine.
    fn lr_rotate(&mut self, a: usize) {
        if let Some(b) = self.nodes[a].left {
            self.rr_rotate(b);
        }
    }

    /// First half of a right-left double rotation.
    fn rl_rotate(&mut self, a: usize) {
        if let Some(b) = self.nodes[a].right {
            self.ll_rotate(b);
        }
    }

    fn insert_fixup(&mut self, start: usize) {
        let mut x = start;
        loop {
            let Some(p) = self.nodes[x].parent else { break };
            if !self.nodes[p].red {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let Some(g) = self.nodes[p].parent else { break };
            let parent_is_left = self.nodes[g].left == Some(p);
            let uncle = if parent_is_left {
                self.nodes[g].right
            } else {
                self.nodes[g].left
            };

            // Red uncle: recolor and continue from the grandparent.
            if let Some(u) = uncle {
                if self.nodes[u].red {
                    self.nodes[p].red = false;
                    self.nodes[u].red = false;
                    self.nodes[g].red = true;
                    x = g;
                    continue;
                }
            }

            // Black uncle: one or two rotations lift a node above the
            // grandparent, which turns red under the new black subtree root.
            if parent_is_left {
                if self.nodes[p].right == Some(x) {
                    self.lr_rotate(g);
                }
                self.ll_rotate(g);
            } else {
                if self.nodes[p].left == Some(x) {
                    self.rl_rotate(g);
                }
                self.rr_rotate(g);
            }
            if let Some(top) = self.nodes[g].parent {
                self.nodes[top].red = false;
            }
            self.nodes[g].red = true;
            break;
        }

        if let Some(r) = self.root {
            self.nodes[r].red = false;
        }
    }
}

/// In-order traversal of an [`IntervalTree`].
pub struct Iter<'a, K, V> {
    tree: &'a IntervalTree<K, V>,
    stack: Vec<usize>,
}

impl<K: Copy + Ord, V> Iter<'_, K, V> {
    fn push_left_spine(&mut self, mut cur: Option<usize>) {
        while let Some(i) = cur {
            self.stack.push(i);
            cur = self.tree.nodes[i].left;
        }
    }
}

impl<'a, K: Copy + Ord, V> Iterator for Iter<'a, K, V> {
    type Item = (K, K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.stack.pop()?;
        let n = &self.tree.nodes[i];
        self.push_left_spine(n.right);
        Some((n.lo, n.hi, &n.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Walk the whole tree checking every red-black and augmentation
    /// invariant, returning the black height.
    fn check_node(tree: &IntervalTree<u8, u32>, i: usize) -> usize {
        let n = &tree.nodes[i];

        let mut expected_max = n.hi;
        for child in [n.left, n.right].into_iter().flatten() {
            assert_eq!(tree.nodes[child].parent, Some(i), "broken parent link");
            assert!(
                !(n.red && tree.nodes[child].red),
                "red node with red child"
            );
            expected_max = expected_max.max(tree.nodes[child].max_upper);
        }
        assert_eq!(n.max_upper, expected_max, "stale max_upper");

        if let Some(l) = n.left {
            assert!(tree.nodes[l].lo <= n.lo, "left child out of order");
        }
        if let Some(r) = n.right {
            assert!(tree.nodes[r].lo >= n.lo, "right child out of order");
        }

        let lh = n.left.map_or(1, |l| check_node(tree, l));
        let rh = n.right.map_or(1, |r| check_node(tree, r));
        assert_eq!(lh, rh, "unequal black heights");
        lh + usize::from(!n.red)
    }

    fn check_invariants(tree: &IntervalTree<u8, u32>) {
        if let Some(r) = tree.root {
            assert!(!tree.nodes[r].red, "red root");
            assert!(tree.nodes[r].parent.is_none());
            check_node(tree, r);
        }
    }

    #[test]
    fn empty_tree() {
        let tree: IntervalTree<u8, u32> = IntervalTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.find(3, 3), None);
        assert_eq!(tree.iter().count(), 0);
    }

    #[test]
    fn single_interval_containment() {
        let mut tree = IntervalTree::new();
        tree.insert(b'a', b'z', 7u32);
        assert_eq!(tree.find(b'm', b'm'), Some(&7));
        assert_eq!(tree.find(b'a', b'z'), Some(&7));
        assert_eq!(tree.find(b'a', b'{'), None);
        assert_eq!(tree.find(b'A', b'A'), None);
    }

    #[test]
    fn point_queries_over_disjoint_intervals() {
        let mut tree = IntervalTree::new();
        tree.insert(b'0', b'9', 0u32);
        tree.insert(b'a', b'z', 1);
        tree.insert(b'A', b'Z', 2);
        assert_eq!(tree.find(b'5', b'5'), Some(&0));
        assert_eq!(tree.find(b'q', b'q'), Some(&1));
        assert_eq!(tree.find(b'Q', b'Q'), Some(&2));
        assert_eq!(tree.find(b'!', b'!'), None);
        check_invariants(&tree);
    }

    #[test]
    fn overlapping_intervals_are_kept_distinct() {
        let mut tree = IntervalTree::new();
        tree.insert(10, 20, 1u32);
        tree.insert(15, 25, 2);
        tree.insert(10, 20, 3);
        assert_eq!(tree.len(), 3);
        let entries: Vec<_> = tree.iter().map(|(lo, hi, v)| (lo, hi, *v)).collect();
        assert_eq!(entries, vec![(10, 20, 1), (10, 20, 3), (15, 25, 2)]);
        // A stab in the shared region returns exactly one entry.
        assert!(tree.find(16, 16).is_some());
    }

    #[test]
    fn iteration_is_sorted_by_lower_bound() {
        let mut tree = IntervalTree::new();
        for (i, lo) in [40u8, 10, 30, 20, 50, 15, 45, 5, 35, 25].iter().enumerate() {
            tree.insert(*lo, lo + 5, i as u32);
        }
        let lowers: Vec<u8> = tree.iter().map(|(lo, _, _)| lo).collect();
        let mut sorted = lowers.clone();
        sorted.sort_unstable();
        assert_eq!(lowers, sorted);
        check_invariants(&tree);
    }

    #[test]
    fn ascending_insertion_stays_balanced() {
        let mut tree = IntervalTree::new();
        for i in 0u8..=200 {
            tree.insert(i, i, u32::from(i));
            check_invariants(&tree);
        }
        for i in 0u8..=200 {
            assert_eq!(tree.find(i, i), Some(&u32::from(i)));
        }
    }

    proptest! {
        #[test]
        fn randomized_inserts_keep_invariants(
            intervals in proptest::collection::vec((0u8..=250, 0u8..=5), 1..80)
        ) {
            let mut tree = IntervalTree::new();
            let mut entries = Vec::new();
            for (i, (lo, width)) in intervals.iter().enumerate() {
                let hi = lo.saturating_add(*width);
                tree.insert(*lo, hi, i as u32);
                entries.push((*lo, hi));
            }
            check_invariants(&tree);

            // Point stabs agree with a naive scan on hit/miss.
            for point in 0u8..=255 {
                let expected_hit = entries.iter().any(|&(lo, hi)| lo <= point && point <= hi);
                prop_assert_eq!(tree.find(point, point).is_some(), expected_hit);
            }
        }
    }
}
