// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use serde::{Deserialize, Serialize};

use crate::hit::INDICATOR_HIT_RADIUS;
use crate::input::Modifiers;

/// Default pointer travel, in screen pixels, before a press becomes a gesture.
pub const PAN_THRESHOLD: f64 = 2.0;

/// Which interactions the manager performs.
///
/// Disabled interactions are ignored entirely: no state change and no events.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InteractionConfig {
    /// Nodes follow the pointer while the primary button is held.
    pub draggable: bool,
    /// The wheel zooms the view.
    pub zoomable: bool,
    /// Clicks change the selection.
    pub selectable: bool,
    /// Collapse indicators respond to presses.
    pub collapsible: bool,
    /// Clicks with Ctrl or Meta held toggle nodes instead of replacing the
    /// selection.
    pub multi_select: bool,
    /// Pointer travel separating a click from a drag or pan.
    pub pan_threshold: f64,
    /// Radius of the press area around collapse indicators.
    pub indicator_hit_radius: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            draggable: true,
            zoomable: true,
            selectable: true,
            collapsible: true,
            multi_select: true,
            pan_threshold: PAN_THRESHOLD,
            indicator_hit_radius: INDICATOR_HIT_RADIUS,
        }
    }
}

impl InteractionConfig {
    /// Whether a click with `modifiers` should toggle rather than replace.
    pub fn toggles(&self, modifiers: Modifiers) -> bool {
        self.multi_select && modifiers.command()
    }
}
