//! A small framework for tree-rewriting passes.
//!
//! A pass implements [`Rule`] and is driven by [`rewrite`], which walks the tree bottom-up and
//! offers every node to the rule. Per-pass scratch data lives in a [`Flags`] side table keyed by
//! node id, created fresh for each [`rewrite`] call; nothing is stored on the nodes themselves,
//! so passes cannot observe each other's leftover state.

use std::collections::HashMap;
use super::{NodeId, Tree};

/// A per-pass side table of integer flags, keyed by node id. Nodes without an entry read as `0`.
#[derive(Debug, Default)]
pub struct Flags {
    values: HashMap<NodeId, i64>,
}

impl Flags {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the flag for a node, or `0` if none was set.
    pub fn get(&self, id: NodeId) -> i64 {
        self.values.get(&id).copied().unwrap_or(0)
    }

    /// Sets the flag for a node.
    pub fn set(&mut self, id: NodeId, value: i64) {
        self.values.insert(id, value);
    }

    /// Adds to the flag for a node.
    pub fn add(&mut self, id: NodeId, value: i64) {
        *self.values.entry(id).or_insert(0) += value;
    }
}

/// A rewriting pass over a tree.
pub trait Rule {
    /// Offers one node to the pass. Returns true if the pass changed the tree.
    ///
    /// The node is guaranteed to have been attached when the walk started, but an earlier
    /// rewrite in the same walk may have detached it since; passes that care must check through
    /// the node's parent links.
    fn apply(&mut self, tree: &mut Tree, node: NodeId, flags: &mut Flags) -> bool;
}

/// Runs one full bottom-up pass of the given rule over the tree. Returns true if anything
/// changed.
///
/// The visit order is fixed before the first rewrite, so a rule sees every node that existed at
/// the start of the pass exactly once; nodes created by the rule itself are picked up by the next
/// pass.
pub fn rewrite(tree: &mut Tree, rule: &mut impl Rule) -> bool {
    let order = tree.post_order(tree.root());
    let mut flags = Flags::new();
    let mut changed = false;
    for node in order {
        changed |= rule.apply(tree, node, &mut flags);
    }
    changed
}
