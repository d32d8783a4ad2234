// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selected node bookkeeping.

use arbor_tree::{Node, NodeId};
use hashbrown::HashSet;

/// Ordered set of selected node ids with a primary entry and a revision.
///
/// Keys are unique and kept in the order they were added. The revision is
/// bumped only when the contents or the primary change, so callers can
/// detect real changes cheaply.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    items: Vec<NodeId>,
    primary: Option<usize>,
    revision: u64,
}

impl Selection {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids in selection order.
    pub fn items(&self) -> &[NodeId] {
        &self.items
    }

    /// Most recently selected id.
    pub fn primary(&self) -> Option<&NodeId> {
        self.primary.map(|i| &self.items[i])
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether `id` is selected.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.items.contains(id)
    }

    /// Change counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the selection with `id` alone.
    pub fn select_only(&mut self, id: NodeId) {
        if self.items.len() == 1 && self.items[0] == id {
            return;
        }
        self.items.clear();
        self.items.push(id);
        self.primary = Some(0);
        self.bump();
    }

    /// Add `id` if absent, remove it otherwise.
    pub fn toggle(&mut self, id: NodeId) {
        if let Some(i) = self.items.iter().position(|k| *k == id) {
            self.items.remove(i);
            self.primary = self.items.len().checked_sub(1);
        } else {
            self.items.push(id);
            self.primary = Some(self.items.len() - 1);
        }
        self.bump();
    }

    /// Replace the selection with `ids`, dropping duplicates.
    pub fn replace_with(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        let mut seen = HashSet::new();
        let items: Vec<NodeId> = ids.into_iter().filter(|id| seen.insert(id.clone())).collect();
        if items == self.items {
            return;
        }
        self.primary = items.len().checked_sub(1);
        self.items = items;
        self.bump();
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.primary = None;
        self.bump();
    }

    /// Drop ids for which `keep` returns `false`.
    pub fn retain(&mut self, mut keep: impl FnMut(&NodeId) -> bool) {
        let before = self.items.len();
        self.items.retain(|id| keep(id));
        if self.items.len() != before {
            self.primary = self.items.len().checked_sub(1);
            self.bump();
        }
    }

    /// Write the `selected` flag of every node in `root` to match.
    pub fn apply(&self, root: &mut Node) {
        let selected: HashSet<&NodeId> = self.items.iter().collect();
        root.walk_mut(&mut |node, _| node.selected = selected.contains(&node.id));
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NodeId {
        NodeId::new(s)
    }

    #[test]
    fn select_only_is_idempotent() {
        let mut s = Selection::new();
        s.select_only(id("a"));
        let rev = s.revision();
        s.select_only(id("a"));
        assert_eq!(s.revision(), rev);
        assert_eq!(s.primary(), Some(&id("a")));
    }

    #[test]
    fn toggle_adds_and_removes() {
        let mut s = Selection::new();
        s.toggle(id("a"));
        s.toggle(id("b"));
        assert_eq!(s.items(), &[id("a"), id("b")]);
        assert_eq!(s.primary(), Some(&id("b")));
        s.toggle(id("a"));
        assert_eq!(s.items(), &[id("b")]);
    }

    #[test]
    fn replace_dedups_and_skips_noops() {
        let mut s = Selection::new();
        s.replace_with([id("a"), id("b"), id("a")]);
        assert_eq!(s.len(), 2);
        let rev = s.revision();
        s.replace_with([id("a"), id("b")]);
        assert_eq!(s.revision(), rev);
    }

    #[test]
    fn apply_syncs_flags() {
        let mut root = Node::new("r", "R").with_child(Node::new("c", "C"));
        root.selected = true;
        let mut s = Selection::new();
        s.select_only(id("c"));
        s.apply(&mut root);
        assert!(!root.selected);
        assert!(root.children[0].selected);
    }
}
