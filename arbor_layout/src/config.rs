// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_tree::ParseError;
use serde::{Deserialize, Serialize};

use crate::custom::CustomLayout;

/// Default gap between sibling subtrees.
pub const NODE_SPACING: f64 = 50.0;
/// Default distance between consecutive levels.
pub const LEVEL_SPACING: f64 = 240.0;
/// Default distance between top-level branches.
pub const BRANCH_SPACING: f64 = 80.0;

/// Growth direction of a directional tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Levels grow toward +x.
    Right,
    /// Levels grow toward -x.
    Left,
    /// Levels grow toward +y.
    Down,
    /// Levels grow toward -y.
    Up,
}

/// Placement strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    /// Single-sided tree growing right.
    TreeRight,
    /// Single-sided tree growing left.
    TreeLeft,
    /// Single-sided tree growing down.
    TreeDown,
    /// Single-sided tree growing up.
    TreeUp,
    /// Two-sided tree with children alternating left and right of the root.
    #[default]
    Mindmap,
    /// Concentric placement around the root.
    Radial,
    /// Downward tree, as used for organization charts.
    OrgChart,
}

impl LayoutKind {
    /// The directional tree this strategy reduces to, if any.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::TreeRight => Some(Direction::Right),
            Self::TreeLeft => Some(Direction::Left),
            Self::TreeDown | Self::OrgChart => Some(Direction::Down),
            Self::TreeUp => Some(Direction::Up),
            Self::Mindmap | Self::Radial => None,
        }
    }
}

/// Layout parameters.
///
/// `branch_spacing` is carried for hosts that place top-level branches
/// themselves; the built-in strategies space branches with `node_spacing`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Strategy.
    #[serde(rename = "type")]
    pub kind: LayoutKind,
    /// Gap between sibling subtrees.
    pub node_spacing: f64,
    /// Distance between consecutive levels.
    pub level_spacing: f64,
    /// Distance between top-level branches.
    pub branch_spacing: f64,
    /// Keep existing positions when every visible node already has one.
    pub preserve_position: bool,
    /// Replaces every built-in strategy when set.
    #[serde(skip)]
    pub custom: Option<CustomLayout>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            kind: LayoutKind::default(),
            node_spacing: NODE_SPACING,
            level_spacing: LEVEL_SPACING,
            branch_spacing: BRANCH_SPACING,
            preserve_position: false,
            custom: None,
        }
    }
}

impl LayoutConfig {
    /// Config with `kind` and default spacing.
    pub fn new(kind: LayoutKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(text)?)
    }

    /// A copy of `self` with every field set in `patch` replaced.
    #[must_use]
    pub fn merged(&self, patch: LayoutPatch) -> Self {
        Self {
            kind: patch.kind.unwrap_or(self.kind),
            node_spacing: patch.node_spacing.unwrap_or(self.node_spacing),
            level_spacing: patch.level_spacing.unwrap_or(self.level_spacing),
            branch_spacing: patch.branch_spacing.unwrap_or(self.branch_spacing),
            preserve_position: patch.preserve_position.unwrap_or(self.preserve_position),
            custom: patch.custom.unwrap_or_else(|| self.custom.clone()),
        }
    }
}

/// Partial update for a [`LayoutConfig`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPatch {
    /// New strategy.
    #[serde(rename = "type")]
    pub kind: Option<LayoutKind>,
    /// New sibling gap.
    pub node_spacing: Option<f64>,
    /// New level distance.
    pub level_spacing: Option<f64>,
    /// New branch distance.
    pub branch_spacing: Option<f64>,
    /// New preserve-position flag.
    pub preserve_position: Option<bool>,
    /// `Some(None)` clears the custom placement.
    #[serde(skip)]
    pub custom: Option<Option<CustomLayout>>,
}
