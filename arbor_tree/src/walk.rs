// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traversal and lookup over a [`Node`] tree.
//!
//! Traversals are pre-order and report each node's depth, with the root at
//! depth 0. The `visible` variants do not descend below collapsed nodes.

use crate::node::{Node, NodeId};

impl Node {
    /// Visit every node in pre-order.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Self, usize)) {
        self.walk_from(0, false, f);
    }

    /// Visit every node not hidden by a collapsed ancestor.
    pub fn walk_visible<'a>(&'a self, f: &mut impl FnMut(&'a Self, usize)) {
        self.walk_from(0, true, f);
    }

    fn walk_from<'a>(&'a self, depth: usize, visible: bool, f: &mut impl FnMut(&'a Self, usize)) {
        f(self, depth);
        let children = if visible {
            self.visible_children()
        } else {
            &self.children
        };
        for child in children {
            child.walk_from(depth + 1, visible, f);
        }
    }

    /// Mutably visit every node in pre-order.
    pub fn walk_mut(&mut self, f: &mut impl FnMut(&mut Self, usize)) {
        self.walk_mut_from(0, f);
    }

    fn walk_mut_from(&mut self, depth: usize, f: &mut impl FnMut(&mut Self, usize)) {
        f(self, depth);
        for child in &mut self.children {
            child.walk_mut_from(depth + 1, f);
        }
    }

    /// Find a node by id.
    pub fn find(&self, id: &NodeId) -> Option<&Self> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Find a node by id, mutably.
    pub fn find_mut(&mut self, id: &NodeId) -> Option<&mut Self> {
        if &self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// Find the first node matching `predicate`, in pre-order.
    pub fn find_by(&self, predicate: &impl Fn(&Self) -> bool) -> Option<&Self> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by(predicate))
    }

    /// Parent of the node with `id`.
    pub fn parent_of(&self, id: &NodeId) -> Option<&Self> {
        if self.children.iter().any(|c| &c.id == id) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.parent_of(id))
    }

    /// Nodes from the root down to the node with `id`, inclusive.
    pub fn path_to(&self, id: &NodeId) -> Option<Vec<&Self>> {
        if &self.id == id {
            return Some(vec![self]);
        }
        self.children.iter().find_map(|c| {
            let mut path = c.path_to(id)?;
            path.insert(0, self);
            Some(path)
        })
    }

    /// Depth of the node with `id`.
    pub fn depth_of(&self, id: &NodeId) -> Option<usize> {
        self.path_to(id).map(|p| p.len() - 1)
    }

    /// Ancestors of the node with `id`, root first, excluding the node.
    pub fn ancestors_of(&self, id: &NodeId) -> Option<Vec<&Self>> {
        let mut path = self.path_to(id)?;
        path.pop();
        Some(path)
    }

    /// All nodes below this one, in pre-order.
    pub fn descendants(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        self.walk(&mut |n, depth| {
            if depth > 0 {
                out.push(n);
            }
        });
        out
    }

    /// Nodes without children.
    pub fn leaves(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        self.walk(&mut |n, _| {
            if n.children.is_empty() {
                out.push(n);
            }
        });
        out
    }

    /// Number of levels, counting this node as one.
    pub fn tree_depth(&self) -> usize {
        1 + self.children.iter().map(Self::tree_depth).max().unwrap_or(0)
    }

    /// Total number of nodes.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }

    /// Whether `id` appears anywhere in this tree.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.find(id).is_some()
    }

    /// Detach and return the descendant with `id`.
    ///
    /// The root itself is never removed.
    pub fn remove_descendant(&mut self, id: &NodeId) -> Option<Self> {
        if let Some(index) = self.children.iter().position(|c| &c.id == id) {
            return Some(self.children.remove(index));
        }
        self.children
            .iter_mut()
            .find_map(|c| c.remove_descendant(id))
    }
}
