// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use std::rc::Rc;

use arbor_tree::{Node, NodeId};
use hashbrown::HashMap;

use crate::sizing::Sizer;

/// Flat, detached view of one node handed to a custom placement.
///
/// Sizes are measured before the callback runs. Whatever the callback
/// leaves in `x`, `y`, `width` and `height` is written back to the node
/// with the same `id`.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSlot {
    /// Node id.
    pub id: NodeId,
    /// Parent id, `None` for the root.
    pub parent: Option<NodeId>,
    /// Depth below the root.
    pub depth: usize,
    /// Node label.
    pub label: String,
    /// Whether the node hides its children.
    pub collapsed: bool,
    /// Center x.
    pub x: Option<f64>,
    /// Center y.
    pub y: Option<f64>,
    /// Measured width.
    pub width: f64,
    /// Measured height.
    pub height: f64,
}

type PlaceFn = dyn Fn(&mut [NodeSlot], &NodeId);

/// Host-supplied placement that replaces the built-in strategies.
///
/// The callback receives every node in pre-order, collapsed subtrees
/// included, together with the root id.
#[derive(Clone)]
pub struct CustomLayout(Rc<PlaceFn>);

impl CustomLayout {
    /// Wrap a placement callback.
    pub fn new(place: impl Fn(&mut [NodeSlot], &NodeId) + 'static) -> Self {
        Self(Rc::new(place))
    }

    pub(crate) fn run(&self, root: &mut Node, sizer: &Sizer<'_>) {
        let mut slots = Vec::new();
        collect(root, None, 0, sizer, &mut slots);
        (self.0)(&mut slots, &root.id);

        let by_id: HashMap<&NodeId, &NodeSlot> = slots.iter().map(|s| (&s.id, s)).collect();
        root.walk_mut(&mut |node, _| {
            if let Some(slot) = by_id.get(&node.id) {
                node.x = slot.x;
                node.y = slot.y;
                node.width = Some(slot.width);
                node.height = Some(slot.height);
            }
        });
    }
}

fn collect(
    node: &mut Node,
    parent: Option<&NodeId>,
    depth: usize,
    sizer: &Sizer<'_>,
    out: &mut Vec<NodeSlot>,
) {
    let size = sizer.apply(node, depth);
    out.push(NodeSlot {
        id: node.id.clone(),
        parent: parent.cloned(),
        depth,
        label: node.label.clone(),
        collapsed: node.collapsed,
        x: node.x,
        y: node.y,
        width: size.width,
        height: size.height,
    });
    let id = node.id.clone();
    for child in &mut node.children {
        collect(child, Some(&id), depth + 1, sizer, out);
    }
}

impl fmt::Debug for CustomLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomLayout(..)")
    }
}

impl PartialEq for CustomLayout {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
