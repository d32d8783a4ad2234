// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Render: draws laid-out diagram trees.
//!
//! [`RenderEngine`] turns a tree whose nodes carry positions and sizes into
//! calls on an [`arbor_imaging::Surface`]. A frame is drawn in two passes:
//!
//! 1. Every connector between a node and its visible children, so that
//!    connectors never cover node faces.
//! 2. Every node face in depth-first order: the shape filled and outlined,
//!    the wrapped label centered inside it, and a collapse indicator to its
//!    right when it has children.
//!
//! Selected nodes get a dashed outline and hovered nodes a drop shadow. Line
//! widths, dash patterns and arrowheads are divided by the view scale, so
//! they keep a constant on-screen size at every zoom level.
//!
//! The live view is drawn with [`RenderEngine::render`]. Exports go through
//! [`RenderEngine::render_export`], which frames the content with an
//! [`ExportFrame`] instead of the live transform and otherwise shares every
//! drawing routine.
//!
//! ```rust
//! use arbor_imaging::RecordingSurface;
//! use arbor_render::RenderEngine;
//! use arbor_tree::{Node, Theme};
//! use arbor_view::ViewTransform;
//! use kurbo::{Point, Size};
//!
//! let mut root = Node::new("r", "Root");
//! root.set_position(Point::ORIGIN);
//! root.set_size(Size::new(100.0, 40.0));
//!
//! let mut surface = RecordingSurface::default();
//! let view = ViewTransform::new(Size::new(800.0, 600.0));
//! RenderEngine::new().render(&root, &Theme::default(), &view, &mut surface);
//! assert_eq!(surface.texts().next().map(|t| t.text.as_str()), Some("Root"));
//! ```

mod edge;
mod engine;
mod export;
mod shape;

pub use edge::{anchor, arrow_head, edge_path, end_tangent};
pub use engine::{
    INDICATOR_RADIUS, LABEL_INSET, LINE_HEIGHT, RenderEngine, SELECTION_COLOR, SELECTION_PADDING,
};
pub use export::{EXPORT_PADDING, EXPORT_PIXEL_RATIO, ExportFrame, content_bounds};
pub use shape::shape_path;
