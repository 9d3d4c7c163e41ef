//! Burkhard-Keller tree for nearest-word search under Levenshtein distance.
//!
//! Each child edge is labelled with the distance between the child and its
//! parent. Because Levenshtein distance is a metric, a query with tolerance
//! `t` at a node at distance `d` only needs to descend into edges labelled
//! `d - t ..= d + t`, which prunes most of the lexicon for small tolerances.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::spelling::levenshtein::levenshtein_distance;
use crate::spelling::lexicon::Lexicon;

#[derive(Debug, Clone)]
struct BkNode {
    word: String,
    children: BTreeMap<usize, BkNode>,
}

impl BkNode {
    fn new(word: String) -> Self {
        BkNode {
            word,
            children: BTreeMap::new(),
        }
    }
}

/// A BK-tree over lowercase words.
#[derive(Debug, Clone, Default)]
pub struct BkTree {
    root: Option<BkNode>,
    len: usize,
}

impl BkTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        BkTree::default()
    }

    /// Build a tree holding every entry of a lexicon.
    pub fn from_lexicon(lexicon: &Lexicon) -> Self {
        let mut tree = BkTree::new();
        for word in lexicon.entries() {
            tree.insert(word);
        }
        log::debug!("built BK-tree over {} words", tree.len());
        tree
    }

    /// Insert a word. Returns false if it was already present.
    pub fn insert(&mut self, word: &str) -> bool {
        if self.root.is_none() {
            self.root = Some(BkNode::new(word.to_string()));
            self.len = 1;
            return true;
        }
        let Some(mut node) = self.root.as_mut() else {
            return false;
        };

        loop {
            let distance = levenshtein_distance(word, &node.word);
            if distance == 0 {
                return false;
            }
            match node.children.entry(distance) {
                Entry::Occupied(child) => node = child.into_mut(),
                Entry::Vacant(slot) => {
                    slot.insert(BkNode::new(word.to_string()));
                    self.len += 1;
                    return true;
                }
            }
        }
    }

    /// Number of words in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check whether the tree holds no words.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Find every word within `max_distance` of `query`, as
    /// `(distance, word)` pairs sorted by distance then word.
    pub fn find_within(&self, query: &str, max_distance: usize) -> Vec<(usize, &str)> {
        let mut matches = Vec::new();
        let Some(root) = self.root.as_ref() else {
            return matches;
        };

        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let distance = levenshtein_distance(query, &node.word);
            if distance <= max_distance {
                matches.push((distance, node.word.as_str()));
            }

            let low = distance.saturating_sub(max_distance);
            let high = distance.saturating_add(max_distance);
            stack.extend(node.children.range(low..=high).map(|(_, child)| child));
        }

        matches.sort_unstable();
        matches
    }

    /// Find the closest word within `max_distance`, the alphabetically first
    /// one on ties.
    pub fn find_nearest(&self, query: &str, max_distance: usize) -> Option<(usize, &str)> {
        self.find_within(query, max_distance).into_iter().next()
    }
}
