// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor View: the pan/zoom mapping between diagram and screen.
//!
//! Diagram coordinates are centered: the world origin sits at the middle of
//! the viewport when the view is reset. A [`ViewTransform`] maps a world
//! point `w` to the screen as
//!
//! ```text
//! screen = viewport_center + offset + w * scale
//! ```
//!
//! Rendering uses [`ViewTransform::affine`] to place geometry and the input
//! layer uses [`ViewTransform::screen_to_world`] to hit test, so both always
//! agree.
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use arbor_view::ViewTransform;
//!
//! let mut view = ViewTransform::new(Size::new(800.0, 600.0));
//! let cursor = Point::new(600.0, 200.0);
//! let under_cursor = view.screen_to_world(cursor);
//!
//! view.zoom_about(cursor, 1.1);
//! let after = view.world_to_screen(under_cursor);
//! assert!((after - cursor).hypot() < 1e-9);
//! ```

mod transform;

pub use transform::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, Transform, ViewTransform};
