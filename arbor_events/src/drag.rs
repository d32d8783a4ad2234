// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer movement tracking for a single gesture.
//!
//! ```
//! use arbor_events::DragTracker;
//! use kurbo::{Point, Vec2};
//!
//! let mut drag = DragTracker::default();
//! drag.start(Point::new(10.0, 20.0));
//! assert_eq!(drag.update(Point::new(11.0, 20.0)), Some(Vec2::new(1.0, 0.0)));
//! assert!(!drag.exceeded(2.0));
//! drag.update(Point::new(14.0, 20.0));
//! assert!(drag.exceeded(2.0));
//! // Coming back does not undo it.
//! drag.update(Point::new(10.0, 20.0));
//! assert!(drag.exceeded(2.0));
//! ```

use kurbo::{Point, Vec2};

/// Start and last pointer positions of an active gesture, in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragTracker {
    origin: Option<Point>,
    last: Option<Point>,
    peak: Vec2,
}

impl DragTracker {
    /// Begin tracking at `pos`.
    pub fn start(&mut self, pos: Point) {
        self.origin = Some(pos);
        self.last = Some(pos);
        self.peak = Vec2::ZERO;
    }

    /// Record `pos` and return the movement since the previous position.
    ///
    /// Returns `None` when no gesture is active.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let origin = self.origin?;
        let previous = self.last.replace(pos)?;
        let offset = pos - origin;
        self.peak = Vec2::new(
            self.peak.x.max(offset.x.abs()),
            self.peak.y.max(offset.y.abs()),
        );
        Some(pos - previous)
    }

    /// Offset of the last recorded position from the start.
    pub fn total_offset(&self) -> Option<Vec2> {
        Some(self.last? - self.origin?)
    }

    /// Whether the pointer has at any point strayed more than `threshold`
    /// pixels from the start, on either axis.
    ///
    /// Once exceeded this stays true until the next [`start`](Self::start),
    /// even if the pointer returns to where it began.
    pub fn exceeded(&self, threshold: f64) -> bool {
        self.is_active() && (self.peak.x > threshold || self.peak.y > threshold)
    }

    /// Stop tracking.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Whether a gesture is active.
    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }
}
