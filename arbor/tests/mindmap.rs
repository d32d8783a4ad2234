// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of the `MindMap` orchestrator.

use std::cell::Cell;
use std::rc::Rc;

use arbor::{Error, ExportRequest, HISTORY_LIMIT, MindMap, MindMapConfig, NodeUpdate};
use arbor_events::{EventKind, Modifiers, PointerButton};
use arbor_imaging::RecordingSurface;
use arbor_tree::{Node, NodeId, Theme, indicator_center};
use kurbo::Point;
use peniko::Color;

fn id(s: &str) -> NodeId {
    NodeId::new(s)
}

fn sample() -> Node {
    Node::new("root", "Project")
        .with_child(
            Node::new("a", "Research")
                .with_child(Node::new("a1", "Papers"))
                .with_child(Node::new("a2", "Interviews")),
        )
        .with_child(Node::new("b", "Design"))
}

fn map() -> MindMap {
    let mut map = MindMap::new(MindMapConfig::default()).unwrap();
    map.set_data(sample());
    map
}

fn screen_of(map: &MindMap, node: &str) -> Point {
    let p = map.node(&id(node)).unwrap().position().unwrap();
    map.view().world_to_screen(p)
}

fn click(map: &mut MindMap, at: Point, modifiers: Modifiers) {
    map.pointer_down(at, PointerButton::Primary, modifiers);
    map.pointer_up(at, PointerButton::Primary);
}

#[test]
fn construction_rejects_unusable_viewports() {
    for (w, h) in [(0.0, 600.0), (800.0, f64::NAN)] {
        assert!(matches!(
            MindMap::new(MindMapConfig::new(w, h)),
            Err(Error::Configuration(_))
        ));
    }
    let config = MindMapConfig {
        theme: "missing".into(),
        ..MindMapConfig::default()
    };
    assert!(matches!(MindMap::new(config), Err(Error::Parse(_))));
}

#[test]
fn set_data_lays_out_and_centers_on_the_root() {
    let map = map();
    map.data().unwrap().walk_visible(&mut |node, _| {
        assert!(node.bounds().is_some(), "{} not placed", node.id);
    });
    let root = screen_of(&map, "root");
    assert!((root - Point::new(400.0, 300.0)).hypot() < 1e-9);
    assert!(map.transform().scale <= 1.0);
}

#[test]
fn reloaded_selection_flags_drive_the_selection() {
    let mut map = map();
    let at = screen_of(&map, "b");
    map.pointer_move(at);
    let json = map.export_as("json").unwrap();

    let mut data: Node = serde_json::from_slice(&json).unwrap();
    data.children[0].selected = true;
    map.set_data(data);
    assert_eq!(map.selected(), [id("a")]);
    assert!(!map.node(&id("b")).unwrap().hovered);

    map.key_down("Delete", Modifiers::empty());
    assert!(map.node(&id("a")).is_none());
}

#[test]
fn fit_view_shrinks_tall_content() {
    let mut map = MindMap::new(MindMapConfig::new(400.0, 300.0)).unwrap();
    let children = (0..30).map(|i| Node::new(format!("c{i}"), format!("Child {i}")));
    map.set_data(Node::new("root", "Root").with_children(children));
    assert!(map.transform().scale < 1.0);

    map.reset_view();
    assert_eq!(map.transform().scale, 1.0);
    map.fit_view();
    assert!(map.transform().scale < 1.0);
}

#[test]
fn zoom_is_clamped_to_the_limits() {
    let mut map = map();
    map.zoom(100.0);
    assert_eq!(map.transform().scale, 5.0);
    map.zoom(1e-6);
    assert_eq!(map.transform().scale, 0.1);
}

#[test]
fn add_remove_undo_redo() {
    let mut map = map();
    let added = map.add_node(&id("b"), Node::new("b1", "Sketches")).unwrap();
    assert_eq!(added, id("b1"));
    assert!(map.node(&added).unwrap().position().is_some());
    assert!(map.remove_node(&id("a")));
    assert!(map.node(&id("a1")).is_none());

    assert!(map.undo());
    assert_eq!(map.node(&id("a")).unwrap().children.len(), 2);
    assert_eq!(map.data().unwrap().children[0].id, id("a"));
    assert!(map.undo());
    assert!(map.node(&added).is_none());
    assert!(!map.undo());

    assert!(map.redo());
    assert!(map.node(&added).is_some());
    assert!(map.redo());
    assert!(map.node(&id("a")).is_none());
    assert!(!map.redo());
}

#[test]
fn lookups_of_missing_ids_fail_softly() {
    let mut map = map();
    assert!(!map.remove_node(&id("root")));
    assert!(!map.remove_node(&id("nope")));
    assert!(map.add_node(&id("nope"), Node::new("x", "X")).is_none());
    assert!(!map.update_node(&id("nope"), NodeUpdate::new().label("X")));
    assert!(!map.toggle_collapse(&id("b")));
    assert!(!map.can_undo());
}

#[test]
fn add_node_guards_ids() {
    let mut map = map();
    assert!(map.add_node(&id("root"), Node::new("a1", "Dup")).is_none());
    let fresh = map.add_node(&id("root"), Node::new("", "Fresh")).unwrap();
    assert_eq!(fresh, id("node-1"));
    let next = map.add_node(&id("root"), Node::new("", "Fresh")).unwrap();
    assert_eq!(next, id("node-2"));
}

#[test]
fn update_relayouts_and_undoes() {
    let mut map = map();
    let before = map.node(&id("b")).unwrap().width.unwrap();
    let long = "A much longer label that needs far more room";
    assert!(map.update_node(&id("b"), NodeUpdate::new().label(long)));
    assert!(map.node(&id("b")).unwrap().width.unwrap() > before);

    assert!(map.undo());
    let node = map.node(&id("b")).unwrap();
    assert_eq!(node.label, "Design");
    assert_eq!(node.width, Some(before));
}

#[test]
fn history_is_bounded() {
    let mut map = map();
    for i in 0..HISTORY_LIMIT + 10 {
        map.update_node(&id("b"), NodeUpdate::new().label(format!("v{i}")));
    }
    let mut undone = 0;
    while map.undo() {
        undone += 1;
    }
    assert_eq!(undone, HISTORY_LIMIT);
}

#[test]
fn pressing_an_indicator_toggles_collapse() {
    let mut map = map();
    let bounds = map.node(&id("a")).unwrap().bounds().unwrap();
    let at = map.view().world_to_screen(indicator_center(bounds));

    let events = map.pointer_down(at, PointerButton::Primary, Modifiers::empty());
    assert!(events.iter().any(|e| e.kind == EventKind::NodeCollapse));
    assert!(map.node(&id("a")).unwrap().collapsed);
    let hidden = screen_of(&map, "a1");
    assert_ne!(map.hit_test(hidden), Some(id("a1")));
    map.pointer_up(at, PointerButton::Primary);

    let events = map.pointer_down(at, PointerButton::Primary, Modifiers::empty());
    assert!(events.iter().any(|e| e.kind == EventKind::NodeExpand));
    assert!(!map.node(&id("a")).unwrap().collapsed);
}

#[test]
fn delete_shortcut_removes_selection_and_undo_restores() {
    let mut map = map();
    let changes = Rc::new(Cell::new(0));
    let seen = Rc::clone(&changes);
    map.on(EventKind::SelectionChange, move |_| seen.set(seen.get() + 1));

    let at = screen_of(&map, "b");
    click(&mut map, at, Modifiers::empty());
    assert_eq!(map.selected(), [id("b")]);
    assert_eq!(changes.get(), 1);

    let events = map.key_down("Delete", Modifiers::empty());
    assert!(events.iter().any(|e| e.kind == EventKind::Shortcut));
    assert!(map.node(&id("b")).is_none());
    assert!(map.selected().is_empty());
    assert_eq!(changes.get(), 2);

    map.key_down("z", Modifiers::CTRL);
    assert!(map.node(&id("b")).is_some());
    map.key_down("Z", Modifiers::CTRL | Modifiers::SHIFT);
    assert!(map.node(&id("b")).is_none());
}

#[test]
fn root_survives_delete_shortcut() {
    let mut map = map();
    let at = screen_of(&map, "root");
    click(&mut map, at, Modifiers::empty());
    let at = screen_of(&map, "b");
    click(&mut map, at, Modifiers::CTRL);
    assert_eq!(map.selected().len(), 2);
    map.key_down("Backspace", Modifiers::empty());
    assert!(map.data().is_some());
    assert!(map.node(&id("b")).is_none());
    assert_eq!(map.selected(), [id("root")]);
}

#[test]
fn select_all_shortcut_selects_visible_nodes() {
    let mut map = map();
    map.toggle_collapse(&id("a"));
    map.key_down("a", Modifiers::META);
    assert_eq!(map.selected().len(), 3);
    assert!(map.node(&id("b")).unwrap().selected);
    assert!(!map.node(&id("a1")).unwrap().selected);
}

#[test]
fn frames_draw_only_when_dirty() {
    let mut map = map();
    let mut surface = RecordingSurface::default();
    assert!(map.frame(0.0, &mut surface));
    assert!(!surface.commands().is_empty());
    assert!(!map.frame(16.0, &mut surface));

    map.zoom(1.1);
    assert!(map.is_dirty());
    assert!(map.frame(32.0, &mut surface));
    assert!(!map.frame(48.0, &mut surface));
}

#[test]
fn enter_animation_keeps_frames_coming_until_done() {
    let mut map = map();
    let mut surface = RecordingSurface::default();
    map.frame(0.0, &mut surface);

    map.add_node(&id("b"), Node::new("b1", "New")).unwrap();
    assert_eq!(map.node(&id("b1")).unwrap().opacity, 0.0);
    assert!(map.animation().ticker().is_active());

    assert!(map.frame(100.0, &mut surface));
    assert!(map.frame(250.0, &mut surface));
    let midway = map.node(&id("b1")).unwrap().opacity;
    assert!(midway > 0.0 && midway < 1.0);
    assert!(map.frame(400.0, &mut surface));
    assert_eq!(map.node(&id("b1")).unwrap().opacity, 1.0);
    assert!(!map.animation().ticker().is_active());
    assert!(!map.frame(500.0, &mut surface));
}

#[test]
fn removing_an_animating_node_abandons_its_animation() {
    let mut map = map();
    map.add_node(&id("b"), Node::new("b1", "New")).unwrap();
    assert!(map.animation().is_animating());
    assert!(map.remove_node(&id("b")));
    assert!(!map.animation().is_animating());
}

#[test]
fn export_formats() {
    let mut map = map();
    let md = String::from_utf8(map.export_as("md").unwrap()).unwrap();
    assert_eq!(
        md,
        "- Project\n  - Research\n    - Papers\n    - Interviews\n  - Design\n"
    );

    let json = map.export_as("json").unwrap();
    let back: Node = serde_json::from_slice(&json).unwrap();
    assert_eq!(back.count(), 5);
    assert_eq!(back.children[0].children[1].label, "Interviews");
    assert!(back.x.is_some());

    let png = map
        .export(ExportRequest::parse("png").unwrap().with_pixel_ratio(1.0))
        .unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    assert!(matches!(map.export_as("svg"), Err(Error::UnsupportedFormat(f)) if f == "svg"));
    let bad_ratio = ExportRequest::parse("png").unwrap().with_pixel_ratio(0.0);
    assert!(matches!(map.export(bad_ratio), Err(Error::Configuration(_))));

    let lossy = ExportRequest::parse("md").unwrap().with_quality(0.5);
    assert_eq!(map.export(lossy).unwrap(), md.as_bytes());
    let bad_quality = ExportRequest::parse("json").unwrap().with_quality(f64::NAN);
    assert!(matches!(map.export(bad_quality), Err(Error::Configuration(_))));
}

#[test]
fn exporting_nothing_fails() {
    let mut map = MindMap::new(MindMapConfig::default()).unwrap();
    assert!(matches!(map.export_as("json"), Err(Error::Empty)));
}

#[test]
fn themes_switch_and_register() {
    let mut map = map();
    assert!(!map.set_theme("dark"));
    assert_eq!(map.theme_id(), "default");

    let mut dark = Theme {
        name: "Dark".into(),
        ..Theme::default()
    };
    dark.global.background_color = Some(Color::BLACK);
    map.register_theme("dark", dark);
    assert!(map.set_theme("dark"));
    assert_eq!(map.theme().name, "Dark");
    assert!(map.is_dirty());

    assert!(matches!(
        map.register_theme_json("broken", "{ name: }"),
        Err(Error::Parse(_))
    ));
}
