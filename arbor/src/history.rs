// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reversible tree edits.
//!
//! Every edit, once applied, yields the edit that reverts it. The log stores
//! those inverses: undoing applies one and files its own inverse for redo.

use std::collections::VecDeque;

use arbor_tree::{Node, NodeId, NodeStyle};

/// Most edits kept for undo.
pub const HISTORY_LIMIT: usize = 50;

/// Partial update of a node's content.
///
/// Unset fields are left alone. Geometry is not part of an update; it
/// belongs to layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeUpdate {
    /// New label.
    pub label: Option<String>,
    /// New style override; `Some(None)` removes the override.
    pub style: Option<Option<NodeStyle>>,
    /// New metadata.
    pub data: Option<serde_json::Value>,
    /// New collapsed flag.
    pub collapsed: Option<bool>,
}

impl NodeUpdate {
    /// An update that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the style override.
    #[must_use]
    pub fn style(mut self, style: NodeStyle) -> Self {
        self.style = Some(Some(style));
        self
    }

    /// Remove the style override.
    #[must_use]
    pub fn clear_style(mut self) -> Self {
        self.style = Some(None);
        self
    }

    /// Set the metadata.
    #[must_use]
    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Set the collapsed flag.
    #[must_use]
    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.style.is_none()
            && self.data.is_none()
            && self.collapsed.is_none()
    }

    /// Write the set fields onto `node` and return the update restoring
    /// their previous values.
    pub(crate) fn apply(self, node: &mut Node) -> Self {
        let mut previous = Self::new();
        if let Some(label) = self.label {
            previous.label = Some(core::mem::replace(&mut node.label, label));
        }
        if let Some(style) = self.style {
            previous.style = Some(core::mem::replace(&mut node.style, style));
        }
        if let Some(data) = self.data {
            previous.data = Some(core::mem::replace(&mut node.data, data));
        }
        if let Some(collapsed) = self.collapsed {
            previous.collapsed = Some(core::mem::replace(&mut node.collapsed, collapsed));
        }
        previous
    }
}

/// One structural or content change.
#[derive(Clone, Debug)]
pub(crate) enum Edit {
    /// Put `node` at `index` among `parent`'s children.
    Insert {
        parent: NodeId,
        index: usize,
        node: Node,
    },
    /// Take `id` out of `parent`'s children.
    Remove { parent: NodeId, id: NodeId },
    /// Change the content of `id`.
    Update { id: NodeId, update: NodeUpdate },
}

impl Edit {
    /// Perform the edit on `root`, returning its inverse. `None` when the
    /// nodes it addresses are gone, or an insert would duplicate an id.
    pub(crate) fn apply(self, root: &mut Node) -> Option<Self> {
        match self {
            Self::Insert {
                parent,
                index,
                node,
            } => {
                if root.contains(&node.id) {
                    return None;
                }
                let children = &mut root.find_mut(&parent)?.children;
                let index = index.min(children.len());
                let id = node.id.clone();
                children.insert(index, node);
                Some(Self::Remove { parent, id })
            }
            Self::Remove { parent, id } => {
                let children = &mut root.find_mut(&parent)?.children;
                let index = children.iter().position(|c| c.id == id)?;
                let node = children.remove(index);
                Some(Self::Insert {
                    parent,
                    index,
                    node,
                })
            }
            Self::Update { id, update } => {
                let node = root.find_mut(&id)?;
                let update = update.apply(node);
                Some(Self::Update { id, update })
            }
        }
    }
}

/// Bounded undo log with a redo stack.
#[derive(Clone, Debug, Default)]
pub(crate) struct History {
    undo: VecDeque<Edit>,
    redo: Vec<Edit>,
}

impl History {
    /// File the inverse of an edit that was just made. Clears redo.
    pub(crate) fn record(&mut self, inverse: Edit) {
        self.redo.clear();
        self.push_undo(inverse);
    }

    /// Revert the newest edit. `false` when there is none, or it no longer
    /// applies; such an edit is dropped.
    pub(crate) fn undo(&mut self, root: &mut Node) -> bool {
        let Some(edit) = self.undo.pop_back() else {
            return false;
        };
        match edit.apply(root) {
            Some(inverse) => {
                self.redo.push(inverse);
                true
            }
            None => false,
        }
    }

    /// Reapply the newest reverted edit.
    pub(crate) fn redo(&mut self, root: &mut Node) -> bool {
        let Some(edit) = self.redo.pop() else {
            return false;
        };
        match edit.apply(root) {
            Some(inverse) => {
                self.push_undo(inverse);
                true
            }
            None => false,
        }
    }

    pub(crate) fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub(crate) fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    fn push_undo(&mut self, edit: Edit) {
        if self.undo.len() == HISTORY_LIMIT {
            self.undo.pop_front();
        }
        self.undo.push_back(edit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Node {
        Node::new("r", "Root")
            .with_child(Node::new("a", "A"))
            .with_child(Node::new("b", "B"))
    }

    fn ids(node: &Node) -> Vec<&str> {
        node.children.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn remove_then_undo_restores_sibling_order() {
        let mut root = tree();
        let mut history = History::default();
        let inverse = Edit::Remove {
            parent: NodeId::new("r"),
            id: NodeId::new("a"),
        }
        .apply(&mut root)
        .unwrap();
        history.record(inverse);
        assert_eq!(ids(&root), ["b"]);

        assert!(history.undo(&mut root));
        assert_eq!(ids(&root), ["a", "b"]);
        assert!(history.redo(&mut root));
        assert_eq!(ids(&root), ["b"]);
    }

    #[test]
    fn update_inverse_restores_only_touched_fields() {
        let mut node = Node::new("n", "Old");
        node.collapsed = true;
        let back = NodeUpdate::new().label("New").apply(&mut node);
        assert_eq!(back, NodeUpdate::new().label("Old"));
        assert!(node.collapsed);
    }

    #[test]
    fn insert_refuses_duplicate_ids() {
        let mut root = tree();
        let edit = Edit::Insert {
            parent: NodeId::new("r"),
            index: 0,
            node: Node::new("b", "Again"),
        };
        assert!(edit.apply(&mut root).is_none());
        assert_eq!(root.count(), 3);
    }

    #[test]
    fn log_keeps_newest_edits() {
        let mut root = Node::new("r", "Root");
        let mut history = History::default();
        for i in 0..HISTORY_LIMIT + 5 {
            let update = NodeUpdate::new().label(format!("v{i}"));
            let inverse = Edit::Update {
                id: NodeId::new("r"),
                update,
            }
            .apply(&mut root)
            .unwrap();
            history.record(inverse);
        }
        let mut undone = 0;
        while history.undo(&mut root) {
            undone += 1;
        }
        assert_eq!(undone, HISTORY_LIMIT);
        assert_eq!(root.label, "v4");
    }

    #[test]
    fn new_edit_clears_redo() {
        let mut root = tree();
        let mut history = History::default();
        let inverse = Edit::Update {
            id: NodeId::new("a"),
            update: NodeUpdate::new().label("A2"),
        }
        .apply(&mut root)
        .unwrap();
        history.record(inverse);
        assert!(history.undo(&mut root));
        assert!(history.can_redo());
        history.record(Edit::Remove {
            parent: NodeId::new("r"),
            id: NodeId::new("zz"),
        });
        assert!(!history.can_redo());
    }
}
