// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Events: input handling for laid-out diagram trees.
//!
//! [`EventManager`] receives raw pointer, wheel and keyboard input in screen
//! coordinates, hit-tests it against the tree through the current
//! [`arbor_view::ViewTransform`], and reports what happened as [`Event`]s.
//!
//! Pointer input follows a small state machine:
//!
//! - A primary press on a collapse indicator reports a collapse or expand and
//!   starts nothing else. Indicators are tested before node bodies.
//! - A primary press on a node starts dragging it; moves shift the node by
//!   the pointer delta divided by the view scale.
//! - A secondary press anywhere pans the view. Travel past the pan threshold
//!   suppresses the context menu that follows the release.
//! - A primary release close to its press is a click, which updates the
//!   selection and reports a node or canvas click.
//!
//! The wheel zooms about the pointer and keyboard chords are reported as
//! [`Intent`]s for the owner of the tree to carry out.
//!
//! ```rust
//! use arbor_events::{EventKind, EventManager, Modifiers, PointerButton};
//! use arbor_tree::Node;
//! use arbor_view::ViewTransform;
//! use kurbo::{Point, Size};
//!
//! let mut root = Node::new("r", "Root");
//! root.set_position(Point::ORIGIN);
//! root.set_size(Size::new(100.0, 40.0));
//! let mut view = ViewTransform::new(Size::new(800.0, 600.0));
//!
//! let mut events = EventManager::new();
//! let at = view.world_to_screen(Point::ORIGIN);
//! events.pointer_down(&root, &view, at, PointerButton::Primary, Modifiers::empty());
//! let out = events.pointer_up(&mut root, &view, at, PointerButton::Primary);
//! assert!(out.iter().any(|e| e.kind == EventKind::NodeClick));
//! assert!(root.selected);
//! ```

mod config;
mod drag;
mod event;
mod hit;
mod input;
mod manager;
mod selection;

pub use config::{InteractionConfig, PAN_THRESHOLD};
pub use drag::DragTracker;
pub use event::{Event, EventKind, Intent, ListenerId, Listeners, Payload};
pub use hit::{INDICATOR_HIT_RADIUS, indicator_at, node_at};
pub use input::{Modifiers, PointerButton, chord_intent};
pub use manager::{EventManager, Gesture, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT};
pub use selection::Selection;
