// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor: an interactive mindmap and diagram engine.
//!
//! [`MindMap`] owns one tree of labeled nodes and wires together the engines
//! of the workspace:
//!
//! - [`arbor_layout`] places every visible node under the chosen strategy.
//! - [`arbor_render`] draws nodes and edges onto any [`arbor_imaging::Surface`].
//! - [`arbor_events`] turns pointer, wheel and keyboard input into events,
//!   which the map carries out where they ask for an action: collapse
//!   indicators toggle nodes and shortcuts delete, undo, redo or select.
//! - [`arbor_animation`] moves attributes over time; the host advances it
//!   through [`MindMap::frame`].
//!
//! Edits made through the map are recorded and can be undone. The tree can
//! be exported as a PNG image, JSON or a Markdown outline.
//!
//! The map draws on demand. Mutations and input mark it dirty, and
//! [`MindMap::frame`] ticks animations and then draws only if something
//! changed.
//!
//! ```rust
//! use arbor::{MindMap, MindMapConfig};
//! use arbor_imaging::RecordingSurface;
//! use arbor_tree::{Node, NodeId};
//!
//! let mut map = MindMap::new(MindMapConfig::new(800.0, 600.0)).unwrap();
//! map.set_data(Node::new("root", "Project").with_child(Node::new("a", "Research")));
//!
//! let added = map
//!     .add_node(&NodeId::new("root"), Node::new("b", "Design"))
//!     .unwrap();
//! assert!(map.node(&added).unwrap().position().is_some());
//!
//! let mut surface = RecordingSurface::default();
//! assert!(map.frame(0.0, &mut surface));
//!
//! assert!(map.undo());
//! assert!(map.node(&added).is_none());
//!
//! let outline = String::from_utf8(map.export_as("markdown").unwrap()).unwrap();
//! assert_eq!(outline, "- Project\n  - Research\n");
//! ```

mod config;
mod error;
mod export;
mod history;
mod mindmap;

pub use config::{FIT_PADDING, MindMapConfig};
pub use error::{Error, Result};
pub use export::{ExportFormat, ExportRequest, to_markdown};
pub use history::{HISTORY_LIMIT, NodeUpdate};
pub use mindmap::MindMap;

pub use arbor_animation;
pub use arbor_events;
pub use arbor_imaging;
pub use arbor_layout;
pub use arbor_render;
pub use arbor_tree;
pub use arbor_view;
