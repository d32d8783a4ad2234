// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Tree: the data model shared by every Arbor engine.
//!
//! A diagram is a single [`Node`] owning its children. Engines borrow the
//! tree per call and never hold on to it:
//! - layout writes `x`, `y`, `width` and `height`,
//! - interaction writes `selected`, `hovered`, and positions while dragging,
//! - animation writes interpolated geometry and `opacity`.
//!
//! Styling is a typed, optional [`NodeStyle`] record. [`Theme::resolve`]
//! merges a node's own style over the theme entry for its depth and then
//! over engine defaults, producing a [`ResolvedStyle`] with every field set.
//!
//! ```rust
//! use arbor_tree::{Node, NodeStyle, Shape, Theme};
//!
//! let root = Node::new("root", "Plans")
//!     .with_child(Node::new("a", "Garden"))
//!     .with_child(Node::new("b", "Kitchen").with_style(NodeStyle {
//!         shape: Some(Shape::Diamond),
//!         ..NodeStyle::default()
//!     }));
//!
//! let theme = Theme::default();
//! let kitchen = root.find(&"b".into()).unwrap();
//! assert_eq!(theme.resolve(kitchen.style.as_ref(), 1).shape, Shape::Diamond);
//! ```
//!
//! Trees, styles and themes serialize to the JSON shapes used by the host
//! application (camelCase keys, CSS color strings).

pub mod color;
mod node;
mod style;
mod theme;
mod walk;

pub use node::{INDICATOR_OFFSET, Node, NodeId, indicator_center};
pub use style::{CurveKind, EdgeStyle, LineStyle, NodeStyle, Padding, ResolvedStyle, Shape};
pub use theme::{GlobalStyle, LevelStyles, ParseError, Theme, ThemeRegistry};

pub use arbor_text::{FontSpec, FontWeight};
