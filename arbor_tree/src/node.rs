// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::style::NodeStyle;

/// Distance from a node's right side to its collapse indicator's center.
pub const INDICATOR_OFFSET: f64 = 8.0;

/// Center of the collapse indicator of a node with the given box.
///
/// Drawing and hit testing both place the indicator here.
pub fn indicator_center(bounds: Rect) -> Point {
    Point::new(bounds.x1 + INDICATOR_OFFSET, bounds.center().y)
}

/// Stable identifier of a node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create an id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

fn full_opacity() -> f64 {
    1.0
}

fn is_full_opacity(v: &f64) -> bool {
    *v == 1.0
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// A labeled node owning its ordered children.
///
/// Geometry is expressed in world units: `x`/`y` is the node's center and
/// `width`/`height` its full extent. All four stay `None` until a layout
/// pass assigns them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique id within the tree.
    pub id: NodeId,
    /// Text drawn inside the node.
    pub label: String,
    /// Ordered children.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
    /// Style overrides for this node only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeStyle>,
    /// Center x.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// Center y.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Whether the children are hidden.
    #[serde(default, skip_serializing_if = "is_false")]
    pub collapsed: bool,
    /// Whether the node is part of the selection.
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
    /// Whether the pointer is over the node.
    #[serde(default, skip_serializing_if = "is_false")]
    pub hovered: bool,
    /// Compositing opacity in `0.0..=1.0`.
    #[serde(default = "full_opacity", skip_serializing_if = "is_full_opacity")]
    pub opacity: f64,
    /// Application metadata, carried but never interpreted.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: serde_json::Value,
}

impl Node {
    /// Create a childless node.
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
            style: None,
            x: None,
            y: None,
            width: None,
            height: None,
            collapsed: false,
            selected: false,
            hovered: false,
            opacity: 1.0,
            data: serde_json::Value::Null,
        }
    }

    /// Append a child and return `self`.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children and return `self`.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Set the style override and return `self`.
    #[must_use]
    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Center point, once laid out.
    pub fn position(&self) -> Option<Point> {
        Some(Point::new(self.x?, self.y?))
    }

    /// Extent, once laid out.
    pub fn size(&self) -> Option<Size> {
        Some(Size::new(self.width?, self.height?))
    }

    /// Axis-aligned box centered on the node, once laid out.
    pub fn bounds(&self) -> Option<Rect> {
        Some(Rect::from_center_size(self.position()?, self.size()?))
    }

    /// Set the center point.
    pub fn set_position(&mut self, p: Point) {
        self.x = Some(p.x);
        self.y = Some(p.y);
    }

    /// Set the extent.
    pub fn set_size(&mut self, size: Size) {
        self.width = Some(size.width);
        self.height = Some(size.height);
    }

    /// Whether the node has any children, visible or not.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Children that are drawn and hit tested: none when collapsed.
    pub fn visible_children(&self) -> &[Self] {
        if self.collapsed { &[] } else { &self.children }
    }

    /// Mutable access to the visible children.
    pub fn visible_children_mut(&mut self) -> &mut [Self] {
        if self.collapsed {
            &mut []
        } else {
            &mut self.children
        }
    }
}
