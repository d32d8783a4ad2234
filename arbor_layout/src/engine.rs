// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use std::rc::Rc;

use arbor_text::{EstimatedMetrics, TextMeasurer};
use arbor_tree::{Node, Theme};

use crate::config::{LayoutConfig, LayoutKind, LayoutPatch};
use crate::sizing::Sizer;
use crate::{radial, tree};

/// Computes geometry for every visible node of a tree.
///
/// Layout is deterministic: the same tree, config, theme and measurer always
/// produce the same geometry. It never adds, removes or reorders nodes.
#[derive(Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
    measurer: Rc<dyn TextMeasurer>,
}

impl fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl LayoutEngine {
    /// Engine measuring labels with [`EstimatedMetrics`].
    pub fn new(config: LayoutConfig) -> Self {
        Self::with_measurer(config, Rc::new(EstimatedMetrics))
    }

    /// Engine measuring labels with `measurer`.
    pub fn with_measurer(config: LayoutConfig, measurer: Rc<dyn TextMeasurer>) -> Self {
        Self { config, measurer }
    }

    /// Active configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the fields set in `patch`.
    pub fn update_config(&mut self, patch: LayoutPatch) {
        self.config = self.config.merged(patch);
    }

    /// Replace the whole configuration.
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
    }

    /// Measurer used for label extents.
    pub fn measurer(&self) -> &Rc<dyn TextMeasurer> {
        &self.measurer
    }

    /// Assign `x`, `y`, `width` and `height` to every visible node of `root`.
    ///
    /// With `preserve_position` set and every visible node already placed,
    /// only sizes are refreshed. Otherwise a custom placement, when
    /// configured, replaces the built-in strategy.
    pub fn layout(&self, root: &mut Node, theme: &Theme) {
        let sizer = Sizer {
            theme,
            measurer: self.measurer.as_ref(),
        };
        if self.config.preserve_position && has_positions(root) {
            tracing::trace!(root = %root.id, "layout: keeping existing positions");
            sizer.apply_visible(root, 0);
            return;
        }
        if let Some(custom) = &self.config.custom {
            tracing::debug!(root = %root.id, "layout: custom placement");
            custom.run(root, &sizer);
            return;
        }
        tracing::debug!(root = %root.id, kind = ?self.config.kind, "layout");
        match self.config.kind {
            LayoutKind::Mindmap => tree::mindmap(root, &self.config, &sizer),
            LayoutKind::Radial => radial::radial(root, &sizer),
            LayoutKind::TreeRight
            | LayoutKind::TreeLeft
            | LayoutKind::TreeDown
            | LayoutKind::TreeUp
            | LayoutKind::OrgChart => {
                if let Some(direction) = self.config.kind.direction() {
                    tree::directional(root, direction, &self.config, &sizer);
                }
            }
        }
    }
}

/// Whether `node` and every node below it that is not hidden by a
/// collapsed ancestor has a position.
pub fn has_positions(node: &Node) -> bool {
    node.position().is_some() && node.visible_children().iter().all(has_positions)
}
