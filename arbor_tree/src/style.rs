// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node and edge style records.

use arbor_text::{FontSpec, FontWeight};
use peniko::Color;
use serde::{Deserialize, Serialize};

use crate::color::{css, css_opt};

/// Outline a node is drawn with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Sharp-cornered rectangle.
    Rect,
    /// Rectangle with rounded corners.
    #[default]
    Rounded,
    /// Circle inscribed in the node box.
    Circle,
    /// Ellipse filling the node box.
    Ellipse,
    /// Rhombus touching the midpoints of the node box.
    Diamond,
    /// Flat-sided hexagon with points at the left and right edges.
    Hexagon,
}

/// Stroke pattern for borders and edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    /// Continuous stroke.
    #[default]
    Solid,
    /// Dashes of 5 units with 5 unit gaps.
    Dashed,
    /// Dots of 2 units with 2 unit gaps.
    Dotted,
}

impl LineStyle {
    /// Dash pattern in unscaled units, empty for solid lines.
    pub fn dashes(self) -> &'static [f64] {
        match self {
            Self::Solid => &[],
            Self::Dashed => &[5.0, 5.0],
            Self::Dotted => &[2.0, 2.0],
        }
    }
}

/// Inner spacing between a node's border and its label.
///
/// Deserializes from a number, a `[vertical, horizontal]` pair, or
/// `[top, right, bottom, left]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Padding {
    /// Same spacing on all sides.
    Uniform(f64),
    /// `[vertical, horizontal]`.
    Symmetric([f64; 2]),
    /// `[top, right, bottom, left]`.
    Sides([f64; 4]),
}

impl Padding {
    /// Expand to `[top, right, bottom, left]`.
    pub fn sides(self) -> [f64; 4] {
        match self {
            Self::Uniform(v) => [v; 4],
            Self::Symmetric([v, h]) => [v, h, v, h],
            Self::Sides(s) => s,
        }
    }

    /// Sum of left and right padding.
    pub fn horizontal(self) -> f64 {
        let [_, right, _, left] = self.sides();
        left + right
    }

    /// Sum of top and bottom padding.
    pub fn vertical(self) -> f64 {
        let [top, _, bottom, _] = self.sides();
        top + bottom
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::Symmetric([8.0, 16.0])
    }
}

/// Per-node style overrides.
///
/// Every field is optional; unset fields fall through to the theme entry for
/// the node's depth and then to [`ResolvedStyle::default`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    /// Fill color.
    #[serde(default, with = "css_opt", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    /// Border color.
    #[serde(default, with = "css_opt", skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    /// Border width in world units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    /// Corner radius for rounded shapes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    /// Border stroke pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_style: Option<LineStyle>,
    /// Label font size in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Label font family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Label font weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    /// Label color.
    #[serde(default, with = "css_opt", skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Inner spacing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Padding>,
    /// Outline shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
}

impl NodeStyle {
    /// Fill unset fields of `self` from `fallback`.
    #[must_use]
    pub fn or(self, fallback: &Self) -> Self {
        Self {
            background_color: self.background_color.or(fallback.background_color),
            border_color: self.border_color.or(fallback.border_color),
            border_width: self.border_width.or(fallback.border_width),
            border_radius: self.border_radius.or(fallback.border_radius),
            border_style: self.border_style.or(fallback.border_style),
            font_size: self.font_size.or(fallback.font_size),
            font_family: self.font_family.or_else(|| fallback.font_family.clone()),
            font_weight: self.font_weight.or(fallback.font_weight),
            color: self.color.or(fallback.color),
            padding: self.padding.or(fallback.padding),
            shape: self.shape.or(fallback.shape),
        }
    }

    /// Resolve against engine defaults.
    pub fn resolve(&self) -> ResolvedStyle {
        let d = ResolvedStyle::default();
        ResolvedStyle {
            background_color: self.background_color.unwrap_or(d.background_color),
            border_color: self.border_color.unwrap_or(d.border_color),
            border_width: self.border_width.unwrap_or(d.border_width),
            border_radius: self.border_radius.unwrap_or(d.border_radius),
            border_style: self.border_style.unwrap_or(d.border_style),
            font_size: self.font_size.unwrap_or(d.font_size),
            font_family: self.font_family.clone().unwrap_or(d.font_family),
            font_weight: self.font_weight.unwrap_or(d.font_weight),
            color: self.color.unwrap_or(d.color),
            padding: self.padding.unwrap_or(d.padding),
            shape: self.shape.unwrap_or(d.shape),
        }
    }
}

/// A node style with every field decided.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedStyle {
    /// Fill color.
    pub background_color: Color,
    /// Border color.
    pub border_color: Color,
    /// Border width in world units.
    pub border_width: f64,
    /// Corner radius for rounded shapes.
    pub border_radius: f64,
    /// Border stroke pattern.
    pub border_style: LineStyle,
    /// Label font size in pixels.
    pub font_size: f64,
    /// Label font family.
    pub font_family: String,
    /// Label font weight.
    pub font_weight: FontWeight,
    /// Label color.
    pub color: Color,
    /// Inner spacing.
    pub padding: Padding,
    /// Outline shape.
    pub shape: Shape,
}

impl ResolvedStyle {
    /// The label font.
    pub fn font(&self) -> FontSpec {
        FontSpec::new(self.font_family.clone(), self.font_size).with_weight(self.font_weight)
    }
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        Self {
            background_color: Color::WHITE,
            border_color: Color::from_rgba8(0xdd, 0xdd, 0xdd, 0xff),
            border_width: 2.0,
            border_radius: 4.0,
            border_style: LineStyle::Solid,
            font_size: 14.0,
            font_family: "Arial, sans-serif".into(),
            font_weight: FontWeight::Normal,
            color: Color::from_rgba8(0x33, 0x33, 0x33, 0xff),
            padding: Padding::default(),
            shape: Shape::Rounded,
        }
    }
}

/// Geometry of the connector between a parent and a child.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveKind {
    /// Straight segment.
    Straight,
    /// Cubic bezier leaving and entering horizontally.
    #[default]
    Bezier,
    /// Horizontal, vertical, horizontal right-angled path.
    Polyline,
    /// Circular arc bulging upward.
    Arc,
}

fn default_edge_color() -> Color {
    Color::from_rgba8(0x99, 0x99, 0x99, 0xff)
}

fn default_edge_width() -> f64 {
    2.0
}

fn default_arrow_size() -> f64 {
    8.0
}

/// How connectors between nodes are stroked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    /// Stroke color.
    #[serde(default = "default_edge_color", with = "css")]
    pub color: Color,
    /// Stroke width in screen pixels.
    #[serde(default = "default_edge_width")]
    pub width: f64,
    /// Stroke pattern.
    #[serde(default)]
    pub style: LineStyle,
    /// Connector geometry.
    #[serde(default)]
    pub curve: CurveKind,
    /// Whether an arrowhead is drawn at the child end.
    #[serde(default)]
    pub arrow: bool,
    /// Arrowhead length in screen pixels.
    #[serde(default = "default_arrow_size")]
    pub arrow_size: f64,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            color: default_edge_color(),
            width: default_edge_width(),
            style: LineStyle::Solid,
            curve: CurveKind::Bezier,
            arrow: false,
            arrow_size: default_arrow_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_normalizes_to_four_sides() {
        assert_eq!(Padding::Uniform(5.0).sides(), [5.0; 4]);
        assert_eq!(Padding::Symmetric([8.0, 16.0]).sides(), [8.0, 16.0, 8.0, 16.0]);
        assert_eq!(
            Padding::Sides([1.0, 2.0, 3.0, 4.0]).sides(),
            [1.0, 2.0, 3.0, 4.0]
        );
        assert_eq!(Padding::Sides([1.0, 2.0, 3.0, 4.0]).horizontal(), 6.0);
        assert_eq!(Padding::Sides([1.0, 2.0, 3.0, 4.0]).vertical(), 4.0);
    }

    #[test]
    fn padding_accepts_all_json_forms() {
        let p: Padding = serde_json::from_str("12").unwrap();
        assert_eq!(p.sides(), [12.0; 4]);
        let p: Padding = serde_json::from_str("[10, 20]").unwrap();
        assert_eq!(p.sides(), [10.0, 20.0, 10.0, 20.0]);
        let p: Padding = serde_json::from_str("[1, 2, 3, 4]").unwrap();
        assert_eq!(p.sides(), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn override_wins_over_fallback() {
        let node = NodeStyle {
            font_size: Some(20.0),
            ..NodeStyle::default()
        };
        let theme = NodeStyle {
            font_size: Some(16.0),
            shape: Some(Shape::Diamond),
            ..NodeStyle::default()
        };
        let merged = node.or(&theme).resolve();
        assert_eq!(merged.font_size, 20.0);
        assert_eq!(merged.shape, Shape::Diamond);
        assert_eq!(merged.border_width, 2.0);
    }

    #[test]
    fn style_json_uses_css_colors() {
        let style: NodeStyle =
            serde_json::from_str(r##"{"backgroundColor":"#4a90e2","shape":"hexagon","fontWeight":"bold"}"##)
                .unwrap();
        assert_eq!(style.shape, Some(Shape::Hexagon));
        assert_eq!(style.font_weight, Some(FontWeight::Bold));
        let bg = style.background_color.map(|c| c.to_rgba8().b);
        assert_eq!(bg, Some(0xe2));
    }

    #[test]
    fn edge_style_defaults_fill_missing_fields() {
        let edge: EdgeStyle = serde_json::from_str(r#"{"curve":"arc"}"#).unwrap();
        assert_eq!(edge.curve, CurveKind::Arc);
        assert_eq!(edge.width, 2.0);
        assert!(!edge.arrow, "arrows are off by default");
    }

    #[test]
    fn line_style_dash_patterns() {
        assert!(LineStyle::Solid.dashes().is_empty());
        assert_eq!(LineStyle::Dashed.dashes(), &[5.0, 5.0]);
        assert_eq!(LineStyle::Dotted.dashes(), &[2.0, 2.0]);
    }
}
