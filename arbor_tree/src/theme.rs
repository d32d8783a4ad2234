// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Themes and the theme registry.

use hashbrown::HashMap;
use peniko::Color;
use serde::{Deserialize, Serialize};

use crate::color::{css_opt, css_vec};
use crate::style::{EdgeStyle, NodeStyle, Padding, ResolvedStyle};

/// Errors produced while reading or deriving themes and configuration.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The JSON was malformed or did not match the expected shape.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A theme was derived from an id that is not registered.
    #[error("no theme registered as `{0}`")]
    UnknownTheme(String),
}

/// Settings that apply to the whole canvas.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStyle {
    /// Canvas background.
    #[serde(default, with = "css_opt", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    /// Fallback label font family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

/// Node styles keyed by depth.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelStyles {
    /// Depth 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<NodeStyle>,
    /// Depth 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level1: Option<NodeStyle>,
    /// Depth 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level2: Option<NodeStyle>,
    /// Depth 3.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level3: Option<NodeStyle>,
    /// Any depth without a dedicated entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<NodeStyle>,
}

impl LevelStyles {
    /// The style used at `depth`, falling back to the `default` entry.
    pub fn at_depth(&self, depth: usize) -> Option<&NodeStyle> {
        let specific = match depth {
            0 => self.root.as_ref(),
            1 => self.level1.as_ref(),
            2 => self.level2.as_ref(),
            3 => self.level3.as_ref(),
            _ => None,
        };
        specific.or(self.default.as_ref())
    }
}

/// A named visual theme.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Display name.
    pub name: String,
    /// Canvas-wide settings.
    #[serde(default)]
    pub global: GlobalStyle,
    /// Node styles per depth.
    #[serde(default)]
    pub node_styles: LevelStyles,
    /// Connector style.
    #[serde(default)]
    pub edge_style: EdgeStyle,
    /// Branch palette.
    #[serde(default, with = "css_vec", skip_serializing_if = "Vec::is_empty")]
    pub color_scheme: Vec<Color>,
}

impl Theme {
    /// Parse a theme from JSON.
    ///
    /// Only the shape is checked; any combination of fields is accepted.
    pub fn from_json(text: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ParseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Resolve the style for a node at `depth`.
    ///
    /// Fields come from the node's own override first, then this theme's
    /// entry for the depth, then the global font family, then engine
    /// defaults.
    pub fn resolve(&self, node_style: Option<&NodeStyle>, depth: usize) -> ResolvedStyle {
        let global = NodeStyle {
            font_family: self.global.font_family.clone(),
            ..NodeStyle::default()
        };
        let level = self.node_styles.at_depth(depth).cloned().unwrap_or_default();
        node_style
            .cloned()
            .unwrap_or_default()
            .or(&level)
            .or(&global)
            .resolve()
    }

    /// Palette color for the `index`-th branch, cycling through the scheme.
    pub fn branch_color(&self, index: usize) -> Option<Color> {
        if self.color_scheme.is_empty() {
            None
        } else {
            Some(self.color_scheme[index % self.color_scheme.len()])
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        let rgb = |r, g, b| Some(Color::from_rgba8(r, g, b, 0xff));
        let white = rgb(0xff, 0xff, 0xff);
        Self {
            name: "default".into(),
            global: GlobalStyle {
                background_color: rgb(0xf5, 0xf5, 0xf5),
                font_family: Some("Arial, sans-serif".into()),
            },
            node_styles: LevelStyles {
                root: Some(NodeStyle {
                    background_color: rgb(0x4a, 0x90, 0xe2),
                    color: white,
                    font_size: Some(18.0),
                    font_weight: Some(arbor_text::FontWeight::Bold),
                    border_radius: Some(8.0),
                    padding: Some(Padding::Symmetric([12.0, 24.0])),
                    ..NodeStyle::default()
                }),
                level1: Some(NodeStyle {
                    background_color: rgb(0x7c, 0xb3, 0x42),
                    color: white,
                    font_size: Some(16.0),
                    border_radius: Some(6.0),
                    padding: Some(Padding::Symmetric([10.0, 20.0])),
                    ..NodeStyle::default()
                }),
                level2: Some(NodeStyle {
                    background_color: rgb(0xff, 0xa7, 0x26),
                    color: white,
                    font_size: Some(14.0),
                    border_radius: Some(4.0),
                    padding: Some(Padding::Symmetric([8.0, 16.0])),
                    ..NodeStyle::default()
                }),
                level3: None,
                default: Some(NodeStyle {
                    background_color: white,
                    color: rgb(0x33, 0x33, 0x33),
                    font_size: Some(14.0),
                    border_color: rgb(0xdd, 0xdd, 0xdd),
                    border_width: Some(1.0),
                    border_radius: Some(4.0),
                    padding: Some(Padding::Symmetric([8.0, 16.0])),
                    ..NodeStyle::default()
                }),
            },
            edge_style: EdgeStyle::default(),
            color_scheme: [
                (0x4a, 0x90, 0xe2),
                (0x7c, 0xb3, 0x42),
                (0xff, 0xa7, 0x26),
                (0xef, 0x53, 0x50),
                (0xab, 0x47, 0xbc),
                (0x26, 0xc6, 0xda),
            ]
            .into_iter()
            .map(|(r, g, b)| Color::from_rgba8(r, g, b, 0xff))
            .collect(),
        }
    }
}

/// Id-keyed collection of themes.
///
/// A fresh registry holds [`Theme::default`] under the id `"default"`.
#[derive(Clone, Debug)]
pub struct ThemeRegistry {
    themes: HashMap<String, Theme>,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeRegistry {
    /// Id of the built-in theme.
    pub const DEFAULT_ID: &'static str = "default";

    /// Create a registry holding the built-in theme.
    pub fn new() -> Self {
        let mut themes = HashMap::new();
        themes.insert(Self::DEFAULT_ID.to_owned(), Theme::default());
        Self { themes }
    }

    /// Add or replace the theme stored under `id`.
    pub fn register(&mut self, id: impl Into<String>, theme: Theme) {
        self.themes.insert(id.into(), theme);
    }

    /// The theme stored under `id`.
    pub fn get(&self, id: &str) -> Option<&Theme> {
        self.themes.get(id)
    }

    /// Remove and return the theme stored under `id`.
    pub fn remove(&mut self, id: &str) -> Option<Theme> {
        self.themes.remove(id)
    }

    /// Registered ids, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }

    /// Derive a new theme from the one stored under `base`.
    ///
    /// `overrides` is a partial theme in JSON form; objects are merged
    /// recursively and any other value replaces the base value.
    pub fn extend(&self, base: &str, overrides: &serde_json::Value) -> Result<Theme, ParseError> {
        let theme = self
            .get(base)
            .ok_or_else(|| ParseError::UnknownTheme(base.to_owned()))?;
        let mut merged = serde_json::to_value(theme)?;
        merge_json(&mut merged, overrides);
        Ok(serde_json::from_value(merged)?)
    }
}

fn merge_json(target: &mut serde_json::Value, source: &serde_json::Value) {
    match (target, source) {
        (serde_json::Value::Object(t), serde_json::Value::Object(s)) => {
            for (key, value) in s {
                match t.get_mut(key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        t.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Shape;

    #[test]
    fn depth_lookup_falls_back_to_default_entry() {
        let theme = Theme::default();
        assert_eq!(theme.resolve(None, 0).font_size, 18.0);
        assert_eq!(theme.resolve(None, 1).font_size, 16.0);
        // No level3 entry: the default entry applies.
        assert_eq!(theme.resolve(None, 3).border_width, 1.0);
        assert_eq!(theme.resolve(None, 9).border_width, 1.0);
    }

    #[test]
    fn node_override_merges_field_by_field() {
        let theme = Theme::default();
        let own = NodeStyle {
            shape: Some(Shape::Circle),
            ..NodeStyle::default()
        };
        let style = theme.resolve(Some(&own), 0);
        assert_eq!(style.shape, Shape::Circle);
        assert_eq!(style.font_size, 18.0, "unset fields come from the theme");
    }

    #[test]
    fn empty_theme_uses_engine_defaults() {
        let theme = Theme::from_json(r#"{"name":"bare"}"#).unwrap();
        assert_eq!(theme.resolve(None, 2), ResolvedStyle::default());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Theme::from_json("{ nope").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)), "unexpected {err}");
    }

    #[test]
    fn registry_register_get_remove() {
        let mut registry = ThemeRegistry::new();
        assert!(registry.get(ThemeRegistry::DEFAULT_ID).is_some());
        let mut dark = Theme::default();
        dark.name = "dark".into();
        registry.register("dark", dark);
        assert_eq!(registry.get("dark").map(|t| t.name.as_str()), Some("dark"));
        assert!(registry.remove("dark").is_some());
        assert!(registry.get("dark").is_none());
    }

    #[test]
    fn extend_merges_nested_overrides() {
        let registry = ThemeRegistry::new();
        let overrides = serde_json::json!({
            "name": "loud",
            "nodeStyles": { "root": { "fontSize": 30 } },
            "edgeStyle": { "arrow": true }
        });
        let loud = registry.extend("default", &overrides).unwrap();
        assert_eq!(loud.name, "loud");
        let root = loud.node_styles.root.as_ref().unwrap();
        assert_eq!(root.font_size, Some(30.0));
        assert!(root.background_color.is_some(), "sibling fields survive");
        assert!(loud.edge_style.arrow, "edge override applied");
    }

    #[test]
    fn extend_unknown_base_fails() {
        let registry = ThemeRegistry::new();
        let err = registry.extend("missing", &serde_json::json!({})).unwrap_err();
        assert!(matches!(err, ParseError::UnknownTheme(id) if id == "missing"));
    }

    #[test]
    fn branch_colors_cycle() {
        let theme = Theme::default();
        assert_eq!(theme.branch_color(0), theme.branch_color(6));
    }
}
