// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pointer, wheel and keyboard state machine.

use arbor_tree::{Node, NodeId};
use arbor_view::ViewTransform;
use kurbo::{Point, Vec2};

use crate::config::InteractionConfig;
use crate::drag::DragTracker;
use crate::event::{Event, EventKind, Intent, ListenerId, Listeners, Payload};
use crate::hit::{indicator_at, node_at};
use crate::input::{Modifiers, PointerButton, chord_intent};
use crate::selection::Selection;

/// Zoom factor applied per wheel notch toward the user.
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
/// Zoom factor applied per wheel notch away from the user.
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Pointer gesture in progress.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Gesture {
    /// No button held.
    #[default]
    Idle,
    /// Primary button held without dragging anything.
    Pressed {
        /// Node under the press, if any.
        node: Option<NodeId>,
        /// Modifiers held at the press.
        modifiers: Modifiers,
    },
    /// Primary button held on a draggable node.
    DraggingNode {
        /// Node being dragged.
        id: NodeId,
        /// Modifiers held at the press.
        modifiers: Modifiers,
    },
    /// Secondary or auxiliary button held.
    Panning {
        /// Whether the pointer has travelled past the pan threshold.
        moved: bool,
    },
}

/// Turns raw input into [`Event`]s, hit-tested against a laid-out tree.
///
/// The manager keeps no reference to the tree or the view; every entry point
/// receives them. It writes only `x`/`y` of a dragged node, the `selected`
/// and `hovered` flags, and the view transform when panning or zooming.
/// Collapse toggles and keyboard intents are reported, not performed.
///
/// Every entry point returns the events it produced, after delivering them
/// to the listeners registered with [`EventManager::on`].
#[derive(Debug, Default)]
pub struct EventManager {
    config: InteractionConfig,
    listeners: Listeners,
    selection: Selection,
    gesture: Gesture,
    drag: DragTracker,
    hovered: Option<NodeId>,
    suppress_context_menu: bool,
}

impl EventManager {
    /// Manager with the default interaction config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager with `config`.
    pub fn with_config(config: InteractionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Active interaction config.
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Replace the interaction config. Any gesture in progress is dropped.
    pub fn set_config(&mut self, config: InteractionConfig) {
        self.config = config;
        self.reset_gesture();
    }

    /// Subscribe to events of `kind`.
    pub fn on(&mut self, kind: EventKind, handler: impl FnMut(&Event) + 'static) -> ListenerId {
        self.listeners.on(kind, handler)
    }

    /// Unsubscribe. Returns `false` if `id` was not subscribed to `kind`.
    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        self.listeners.off(kind, id)
    }

    /// Current gesture.
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Node under the pointer after the last move.
    pub fn hovered(&self) -> Option<&NodeId> {
        self.hovered.as_ref()
    }

    /// Selected ids in selection order.
    pub fn selected(&self) -> &[NodeId] {
        self.selection.items()
    }

    /// Selection bookkeeping.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Node under a screen point.
    pub fn hit_test(&self, root: &Node, view: &ViewTransform, screen: Point) -> Option<NodeId> {
        node_at(root, view.screen_to_world(screen))
    }

    /// A button went down.
    pub fn pointer_down(
        &mut self,
        root: &Node,
        view: &ViewTransform,
        screen: Point,
        button: PointerButton,
        modifiers: Modifiers,
    ) -> Vec<Event> {
        self.reset_gesture();
        let world = view.screen_to_world(screen);
        let mut out = Vec::new();
        match button {
            PointerButton::Secondary | PointerButton::Auxiliary => {
                self.suppress_context_menu = false;
                self.gesture = Gesture::Panning { moved: false };
                self.drag.start(screen);
            }
            PointerButton::Primary => {
                if self.config.collapsible {
                    if let Some(id) = indicator_at(root, world, self.config.indicator_hit_radius) {
                        let collapsed = root.find(&id).is_some_and(|n| n.collapsed);
                        let kind = if collapsed {
                            EventKind::NodeExpand
                        } else {
                            EventKind::NodeCollapse
                        };
                        out.push(Event::new(kind).on(id).at(world));
                        return self.dispatch(out);
                    }
                }
                let node = node_at(root, world);
                self.drag.start(screen);
                self.gesture = match node {
                    Some(id) if self.config.draggable => {
                        out.push(
                            Event::new(EventKind::NodeDragStart)
                                .on(id.clone())
                                .at(world),
                        );
                        Gesture::DraggingNode { id, modifiers }
                    }
                    node => Gesture::Pressed { node, modifiers },
                };
            }
        }
        self.dispatch(out)
    }

    /// The pointer moved.
    pub fn pointer_move(
        &mut self,
        root: &mut Node,
        view: &mut ViewTransform,
        screen: Point,
    ) -> Vec<Event> {
        let world = view.screen_to_world(screen);
        let mut out = Vec::new();
        let under = node_at(root, world);
        self.set_hovered(root, under, world, &mut out);

        let delta = self.drag.update(screen).unwrap_or(Vec2::ZERO);
        match &mut self.gesture {
            Gesture::DraggingNode { id, .. } => {
                if delta != Vec2::ZERO {
                    if let Some(node) = root.find_mut(id) {
                        if let Some(p) = node.position() {
                            node.set_position(p + delta / view.scale());
                            out.push(
                                Event::new(EventKind::NodeDrag)
                                    .on(id.clone())
                                    .at(world)
                                    .with(Payload::Delta(delta)),
                            );
                        }
                    }
                }
            }
            Gesture::Panning { moved } => {
                if !*moved && self.drag.exceeded(self.config.pan_threshold) {
                    *moved = true;
                    self.suppress_context_menu = true;
                }
                if delta != Vec2::ZERO {
                    view.pan_by(delta);
                    out.push(
                        Event::new(EventKind::CanvasPan)
                            .at(world)
                            .with(Payload::Delta(delta)),
                    );
                }
            }
            Gesture::Idle | Gesture::Pressed { .. } => {}
        }
        self.dispatch(out)
    }

    /// A button was released.
    ///
    /// A release of the primary button counts as a click only if the pointer
    /// never strayed past the pan threshold since the press.
    pub fn pointer_up(
        &mut self,
        root: &mut Node,
        view: &ViewTransform,
        screen: Point,
        button: PointerButton,
    ) -> Vec<Event> {
        let world = view.screen_to_world(screen);
        let clicked = !self.drag.exceeded(self.config.pan_threshold);
        let (dragged, modifiers) = match (&self.gesture, button) {
            (Gesture::Panning { .. }, PointerButton::Secondary | PointerButton::Auxiliary) => {
                (None, None)
            }
            (Gesture::DraggingNode { id, modifiers }, PointerButton::Primary) => {
                (Some(id.clone()), Some(*modifiers))
            }
            (Gesture::Pressed { modifiers, .. }, PointerButton::Primary) => (None, Some(*modifiers)),
            _ => return Vec::new(),
        };
        self.reset_gesture();
        let mut out = Vec::new();
        if let Some(id) = dragged {
            out.push(Event::new(EventKind::NodeDragEnd).on(id).at(world));
        }
        if let Some(modifiers) = modifiers {
            if clicked {
                self.click(root, world, modifiers, &mut out);
            }
        }
        self.dispatch(out)
    }

    /// The pointer left the surface. Hover is cleared and any gesture is
    /// abandoned without a drag-end.
    pub fn pointer_leave(&mut self, root: &mut Node) -> Vec<Event> {
        let mut out = Vec::new();
        if let Some(id) = self.hovered.take() {
            if let Some(node) = root.find_mut(&id) {
                node.hovered = false;
            }
            out.push(Event::new(EventKind::NodeHoverLeave).on(id));
        }
        self.reset_gesture();
        self.suppress_context_menu = false;
        self.dispatch(out)
    }

    /// A double click landed at `screen`.
    pub fn double_click(&mut self, root: &Node, view: &ViewTransform, screen: Point) -> Vec<Event> {
        let world = view.screen_to_world(screen);
        let out = node_at(root, world)
            .map(|id| Event::new(EventKind::NodeDoubleClick).on(id).at(world))
            .into_iter()
            .collect();
        self.dispatch(out)
    }

    /// A context menu was requested at `screen`.
    ///
    /// Nothing is emitted right after a pan that moved the view.
    pub fn context_menu(&mut self, root: &Node, view: &ViewTransform, screen: Point) -> Vec<Event> {
        if core::mem::take(&mut self.suppress_context_menu) {
            return Vec::new();
        }
        let world = view.screen_to_world(screen);
        let event = match node_at(root, world) {
            Some(id) => Event::new(EventKind::NodeContextMenu).on(id),
            None => Event::new(EventKind::CanvasContextMenu),
        };
        self.dispatch(vec![event.at(world)])
    }

    /// The wheel turned; positive `delta_y` scrolls toward the user and
    /// zooms out.
    ///
    /// The world point under `screen` stays under it.
    pub fn wheel(&mut self, view: &mut ViewTransform, screen: Point, delta_y: f64) -> Vec<Event> {
        if !self.config.zoomable {
            return Vec::new();
        }
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        if !view.zoom_about(screen, factor) {
            return Vec::new();
        }
        let event = Event::new(EventKind::CanvasZoom)
            .at(view.screen_to_world(screen))
            .with(Payload::Zoom {
                scale: view.scale(),
                anchor: screen,
            });
        self.dispatch(vec![event])
    }

    /// A key went down.
    ///
    /// Recognized chords are reported as [`EventKind::Shortcut`] events with
    /// an [`Intent`] payload. Deleting is only reported with a non-empty
    /// selection.
    pub fn key_down(&mut self, key: &str, modifiers: Modifiers) -> Vec<Event> {
        let Some(intent) = chord_intent(key, modifiers) else {
            return Vec::new();
        };
        if intent == Intent::DeleteSelection && self.selection.is_empty() {
            return Vec::new();
        }
        self.dispatch(vec![Event::new(EventKind::Shortcut).with(Payload::Intent(intent))])
    }

    /// Select every node reachable without crossing a collapsed node.
    pub fn select_all(&mut self, root: &mut Node) -> Vec<Event> {
        let mut ids = Vec::new();
        root.walk_visible(&mut |node, _| ids.push(node.id.clone()));
        let before = self.selection.revision();
        self.selection.replace_with(ids);
        self.finish_selection(root, before)
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self, root: &mut Node) -> Vec<Event> {
        let before = self.selection.revision();
        self.selection.clear();
        self.finish_selection(root, before)
    }

    /// Select exactly `ids`, ignoring ones not in `root`.
    pub fn set_selection(
        &mut self,
        root: &mut Node,
        ids: impl IntoIterator<Item = NodeId>,
    ) -> Vec<Event> {
        let before = self.selection.revision();
        self.selection
            .replace_with(ids.into_iter().filter(|id| root.contains(id)));
        self.finish_selection(root, before)
    }

    /// Take over a freshly loaded tree.
    ///
    /// Any gesture is dropped and `hovered` flags are cleared. The nodes
    /// flagged `selected` become the selection, in pre-order.
    pub fn adopt(&mut self, root: &mut Node) -> Vec<Event> {
        self.reset_gesture();
        self.hovered = None;
        self.suppress_context_menu = false;
        let mut ids = Vec::new();
        root.walk_mut(&mut |node, _| {
            node.hovered = false;
            if node.selected {
                ids.push(node.id.clone());
            }
        });
        let before = self.selection.revision();
        self.selection.replace_with(ids);
        let events = self.finish_selection(root, before);
        self.selection.apply(root);
        events
    }

    /// Forget selected and hovered ids that are no longer in `root`.
    pub fn retain_existing(&mut self, root: &mut Node) -> Vec<Event> {
        if self.hovered.as_ref().is_some_and(|id| !root.contains(id)) {
            self.hovered = None;
        }
        if let Gesture::DraggingNode { id, .. } = &self.gesture {
            if !root.contains(id) {
                self.reset_gesture();
            }
        }
        let before = self.selection.revision();
        self.selection.retain(|id| root.contains(id));
        self.finish_selection(root, before)
    }

    fn click(&mut self, root: &mut Node, world: Point, modifiers: Modifiers, out: &mut Vec<Event>) {
        let hit = node_at(root, world);
        if self.config.selectable {
            let before = self.selection.revision();
            match &hit {
                Some(id) if self.config.toggles(modifiers) => self.selection.toggle(id.clone()),
                Some(id) => self.selection.select_only(id.clone()),
                None => self.selection.clear(),
            }
            out.extend(self.selection_changed(root, before));
        }
        out.push(match hit {
            Some(id) => Event::new(EventKind::NodeClick).on(id).at(world),
            None => Event::new(EventKind::CanvasClick).at(world),
        });
    }

    fn set_hovered(
        &mut self,
        root: &mut Node,
        under: Option<NodeId>,
        world: Point,
        out: &mut Vec<Event>,
    ) {
        if under == self.hovered {
            return;
        }
        if let Some(old) = self.hovered.take() {
            if let Some(node) = root.find_mut(&old) {
                node.hovered = false;
            }
            out.push(Event::new(EventKind::NodeHoverLeave).on(old).at(world));
        }
        if let Some(new) = under {
            if let Some(node) = root.find_mut(&new) {
                node.hovered = true;
            }
            out.push(Event::new(EventKind::NodeHoverEnter).on(new.clone()).at(world));
            self.hovered = Some(new);
        }
    }

    fn selection_changed(&self, root: &mut Node, before: u64) -> Option<Event> {
        if self.selection.revision() == before {
            return None;
        }
        self.selection.apply(root);
        Some(
            Event::new(EventKind::SelectionChange)
                .with(Payload::Selection(self.selection.items().to_vec())),
        )
    }

    fn finish_selection(&mut self, root: &mut Node, before: u64) -> Vec<Event> {
        let out = self.selection_changed(root, before).into_iter().collect();
        self.dispatch(out)
    }

    fn reset_gesture(&mut self) {
        self.gesture = Gesture::Idle;
        self.drag.end();
    }

    fn dispatch(&mut self, events: Vec<Event>) -> Vec<Event> {
        for event in &events {
            self.listeners.emit(event);
        }
        events
    }
}
