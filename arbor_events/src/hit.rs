// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometric queries against a laid-out tree, in world coordinates.
//!
//! Both queries walk the tree in pre-order without descending below
//! collapsed nodes. When several nodes match, the last one visited wins, so
//! descendants take precedence over their ancestors.

use arbor_tree::{Node, NodeId, indicator_center};
use kurbo::Point;
/// Radius of the area around a collapse indicator that accepts presses.
pub const INDICATOR_HIT_RADIUS: f64 = 10.0;

/// Node whose box contains `world`.
///
/// Boxes are axis-aligned and centered on the node position; edges count as
/// inside.
pub fn node_at(root: &Node, world: Point) -> Option<NodeId> {
    let mut found = None;
    root.walk_visible(&mut |node, _| {
        if node.bounds().is_some_and(|b| {
            world.x >= b.x0 && world.x <= b.x1 && world.y >= b.y0 && world.y <= b.y1
        }) {
            found = Some(&node.id);
        }
    });
    found.cloned()
}

/// Node with children whose collapse indicator is within `radius` of `world`.
pub fn indicator_at(root: &Node, world: Point, radius: f64) -> Option<NodeId> {
    let mut found = None;
    root.walk_visible(&mut |node, _| {
        if !node.has_children() {
            return;
        }
        let Some(b) = node.bounds() else {
            return;
        };
        if indicator_center(b).distance(world) <= radius {
            found = Some(&node.id);
        }
    });
    found.cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    fn placed(id: &str, x: f64, y: f64) -> Node {
        let mut n = Node::new(id, id);
        n.set_position(Point::new(x, y));
        n.set_size(Size::new(100.0, 40.0));
        n
    }

    #[test]
    fn descendants_win_over_overlapping_ancestors() {
        let root = placed("r", 0.0, 0.0).with_child(placed("c", 30.0, 0.0));
        assert_eq!(node_at(&root, Point::new(40.0, 0.0)), Some("c".into()));
        assert_eq!(node_at(&root, Point::new(-45.0, 0.0)), Some("r".into()));
        assert_eq!(node_at(&root, Point::new(500.0, 0.0)), None);
    }

    #[test]
    fn collapsed_nodes_hide_their_subtree() {
        let mut root = placed("r", 0.0, 0.0).with_child(placed("c", 300.0, 0.0));
        root.collapsed = true;
        assert_eq!(node_at(&root, Point::new(300.0, 0.0)), None);
        assert_eq!(
            indicator_at(&root, Point::new(58.0, 9.0), INDICATOR_HIT_RADIUS),
            Some("r".into())
        );
    }

    #[test]
    fn indicator_hits_around_its_drawn_center() {
        let root = placed("r", 0.0, 0.0).with_child(placed("c", 300.0, 0.0));
        let center = indicator_center(root.bounds().unwrap());
        for offset in [(0.0, 0.0), (0.0, 9.0), (-7.0, 7.0)] {
            let at = center + kurbo::Vec2::from(offset);
            assert_eq!(indicator_at(&root, at, INDICATOR_HIT_RADIUS), Some("r".into()));
        }
        let beyond = center + kurbo::Vec2::new(INDICATOR_HIT_RADIUS + 1.0, 0.0);
        assert_eq!(indicator_at(&root, beyond, INDICATOR_HIT_RADIUS), None);
    }

    #[test]
    fn indicator_requires_children() {
        let leaf = placed("leaf", 0.0, 0.0);
        assert_eq!(indicator_at(&leaf, Point::new(58.0, 0.0), INDICATOR_HIT_RADIUS), None);
    }
}
