// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Layout: node placement for diagram trees.
//!
//! [`LayoutEngine::layout`] sizes every visible node from its label and
//! resolved style, then places it under one of the strategies in
//! [`LayoutKind`]:
//!
//! - **Directional trees** grow right, left, down or up from the root.
//!   Sibling groups are centered on their parent and each sibling reserves
//!   `max(own cross size + node_spacing, subtree extent)`, so sibling spans
//!   never overlap.
//! - **Mindmap** alternates the root's children between the left (even
//!   indices) and right (odd indices) sides and lays each side out as a
//!   mirrored directional tree.
//! - **Radial** puts the root's children on a ring at equal angles and fans
//!   deeper levels out over narrowing sectors.
//!
//! Collapsed nodes are sized and placed, but nothing below them is touched,
//! so their descendants keep whatever geometry they had.
//!
//! ```rust
//! use arbor_layout::{LayoutConfig, LayoutEngine, LayoutKind};
//! use arbor_tree::{Node, Theme};
//!
//! let mut root = Node::new("r", "Root")
//!     .with_child(Node::new("a", "A"))
//!     .with_child(Node::new("b", "B"));
//! let engine = LayoutEngine::new(LayoutConfig::new(LayoutKind::TreeRight));
//! engine.layout(&mut root, &Theme::default());
//!
//! let a = &root.children[0];
//! let b = &root.children[1];
//! assert_eq!(root.position(), Some(kurbo::Point::ORIGIN));
//! assert!((a.y.unwrap() + b.y.unwrap()).abs() < 1e-9);
//! ```

mod config;
mod custom;
mod engine;
mod radial;
mod sizing;
mod tree;

pub use config::{
    BRANCH_SPACING, Direction, LEVEL_SPACING, LayoutConfig, LayoutKind, LayoutPatch, NODE_SPACING,
};
pub use custom::{CustomLayout, NodeSlot};
pub use engine::{LayoutEngine, has_positions};
pub use radial::{first_ring_radius, ring_increment, sector_width};
pub use sizing::{MIN_NODE_HEIGHT, MIN_NODE_WIDTH, node_size};
pub use tree::{MINDMAP_CROWDING, TREE_CROWDING};
