// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading host-supplied theme and tree JSON.

use arbor_tree::{CurveKind, FontWeight, Node, Padding, Theme, ThemeRegistry};

const MINIMAL: &str = r##"{
  "name": "minimal",
  "global": { "backgroundColor": "#fff", "fontFamily": "Helvetica" },
  "nodeStyles": {
    "root": {
      "backgroundColor": "transparent",
      "color": "#000",
      "fontSize": 20,
      "fontWeight": "bold",
      "borderColor": "#000",
      "borderWidth": 2,
      "borderRadius": 0,
      "padding": [10, 20]
    },
    "default": {
      "color": "#666",
      "fontSize": 14,
      "borderWidth": 1,
      "padding": [6, 12]
    }
  },
  "edgeStyle": { "color": "#000", "width": 1, "curve": "straight" },
  "colorScheme": ["#000", "#333", "#666"]
}"##;

#[test]
fn minimal_theme_parses_and_resolves() {
    let theme = Theme::from_json(MINIMAL).unwrap();
    assert_eq!(theme.edge_style.curve, CurveKind::Straight);
    assert_eq!(theme.edge_style.width, 1.0);
    assert_eq!(theme.color_scheme.len(), 3);

    let root = theme.resolve(None, 0);
    assert_eq!(root.font_weight, FontWeight::Bold);
    assert_eq!(root.padding, Padding::Symmetric([10.0, 20.0]));
    assert_eq!(root.background_color.to_rgba8().a, 0);

    let child = theme.resolve(None, 1);
    assert_eq!(child.font_family, "Helvetica", "global font applies");
    assert_eq!(child.border_width, 1.0);
}

#[test]
fn theme_survives_json_round_trip() {
    let theme = Theme::from_json(MINIMAL).unwrap();
    let again = Theme::from_json(&theme.to_json().unwrap()).unwrap();
    assert_eq!(again.resolve(None, 0), theme.resolve(None, 0));
    assert_eq!(again.resolve(None, 5), theme.resolve(None, 5));
}

#[test]
fn registered_json_theme_is_retrievable() {
    let mut registry = ThemeRegistry::new();
    registry.register("minimal", Theme::from_json(MINIMAL).unwrap());
    let mut ids: Vec<_> = registry.ids().collect();
    ids.sort_unstable();
    assert_eq!(ids, ["default", "minimal"]);
}

#[test]
fn tree_json_keeps_geometry_and_flags() {
    let json = r#"{
      "id": "r", "label": "Root", "x": 0, "y": 0, "width": 80, "height": 40,
      "children": [ { "id": "c", "label": "Child", "collapsed": true } ]
    }"#;
    let root: Node = serde_json::from_str(json).unwrap();
    assert_eq!(root.width, Some(80.0));
    assert!(root.children[0].collapsed);
    assert_eq!(root.children[0].x, None);
}
