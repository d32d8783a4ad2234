// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Animation: time-based transitions of node attributes.
//!
//! An [`AnimationEngine`] interpolates the numeric attributes of nodes
//! (`x`, `y`, `width`, `height` and `opacity`) from their values when the
//! animation was created toward [`Targets`], shaped by an [`Easing`] curve.
//! The host calls [`AnimationEngine::tick`] once per frame with the current
//! time; the engine tells a [`TickSource`] when frames are wanted and when
//! they can stop.
//!
//! Every animation returns an [`AnimationHandle`], a future that resolves
//! when the animation finishes. Cancelled animations leave their handles
//! pending forever. A [`GroupHandle`] joins several handles, as returned by
//! the staggered [`AnimationEngine::cascade`] presets.
//!
//! ```rust
//! use arbor_animation::{AnimationEngine, AnimationOptions, Targets};
//! use arbor_tree::Node;
//!
//! let mut root = Node::new("r", "Root");
//! let mut engine = AnimationEngine::default();
//! let done = engine.animate(
//!     &mut root,
//!     Targets::new().opacity(0.0),
//!     AnimationOptions::default().duration(0.0),
//! );
//! engine.tick(&mut root, 16.0);
//! assert!(done.is_resolved());
//! assert_eq!(root.opacity, 0.0);
//! ```

mod easing;
mod engine;
mod handle;
mod target;
mod ticker;

pub use easing::Easing;
pub use engine::{
    AnimationConfig, AnimationEngine, AnimationOptions, BOUNCE_DROP, Cascade, DEFAULT_DURATION,
    EnterPreset, ExitPreset, SLIDE_DISTANCE,
};
pub use handle::{AnimationHandle, GroupHandle};
pub use target::{AnimField, Targets};
pub use ticker::{ManualTicker, TickSource};
