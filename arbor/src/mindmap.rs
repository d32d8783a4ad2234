// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use std::rc::Rc;

use arbor_animation::{
    AnimationConfig, AnimationEngine, AnimationHandle, AnimationOptions, Cascade, GroupHandle,
    ManualTicker, Targets, TickSource,
};
use arbor_events::{
    Event, EventKind, EventManager, Intent, InteractionConfig, ListenerId, Modifiers, Payload,
    PointerButton,
};
use arbor_imaging::Surface;
use arbor_imaging_vello_cpu::VelloCpuSurface;
use arbor_layout::{LayoutConfig, LayoutEngine, LayoutPatch};
use arbor_render::{ExportFrame, RenderEngine, content_bounds};
use arbor_text::{FontMetrics, TextMeasurer};
use arbor_tree::{Node, NodeId, ParseError, Theme, ThemeRegistry};
use arbor_view::{Transform, ViewTransform};
use kurbo::{Point, Size};
use peniko::Color;

use crate::config::{FIT_PADDING, MindMapConfig};
use crate::error::{Error, Result};
use crate::export::{ExportFormat, ExportRequest, to_markdown};
use crate::history::{Edit, History, NodeUpdate};

/// An interactive mindmap: one tree plus the engines that lay it out, draw
/// it, react to input and animate it.
///
/// Every mutation re-runs layout where geometry can change and marks the
/// map dirty; [`MindMap::frame`] draws only when something changed.
pub struct MindMap<T = ManualTicker> {
    root: Option<Node>,
    themes: ThemeRegistry,
    theme_id: String,
    theme: Theme,
    layout: LayoutEngine,
    render: RenderEngine,
    events: EventManager,
    animation: AnimationEngine<T>,
    view: ViewTransform,
    history: History,
    font: Option<FontMetrics>,
    fit_on_data: bool,
    dirty: bool,
    generated: u64,
}

impl<T> fmt::Debug for MindMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MindMap")
            .field("nodes", &self.root.as_ref().map_or(0, Node::count))
            .field("theme", &self.theme_id)
            .field("view", &self.view)
            .field("font", &self.font)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl MindMap {
    /// Create an empty map driven by a [`ManualTicker`].
    pub fn new(config: MindMapConfig) -> Result<Self> {
        Self::with_ticker(config, ManualTicker::default())
    }
}

impl<T: TickSource> MindMap<T> {
    /// Create an empty map whose animations request frames from `ticker`.
    ///
    /// Fails when the viewport or zoom limits are unusable, or the theme id
    /// is not one of the built-in themes.
    pub fn with_ticker(config: MindMapConfig, ticker: T) -> Result<Self> {
        config.validate()?;
        let themes = ThemeRegistry::new();
        let theme = themes
            .get(&config.theme)
            .cloned()
            .ok_or_else(|| ParseError::UnknownTheme(config.theme.clone()))?;
        let mut view = ViewTransform::new(config.viewport());
        view.set_zoom_limits(config.min_zoom, config.max_zoom);
        tracing::debug!(
            width = config.width,
            height = config.height,
            theme = %config.theme,
            "mindmap created"
        );
        Ok(Self {
            root: None,
            themes,
            theme_id: config.theme,
            theme,
            layout: LayoutEngine::new(config.layout),
            render: RenderEngine::new(),
            events: EventManager::with_config(config.interaction),
            animation: AnimationEngine::with_ticker(config.animation, ticker),
            view,
            history: History::default(),
            font: None,
            fit_on_data: config.fit_on_data,
            dirty: true,
            generated: 0,
        })
    }

    // --- data ---

    /// Replace the tree.
    ///
    /// In-flight animations are cancelled and the history is cleared. Nodes
    /// flagged `selected` in `data` become the selection and `hovered` flags
    /// are dropped. The new tree is laid out (and fitted, if configured).
    pub fn set_data(&mut self, data: Node) {
        tracing::debug!(root = %data.id, nodes = data.count(), "set data");
        self.animation.cancel_all();
        self.history.clear();
        let root = self.root.insert(data);
        self.events.adopt(root);
        self.relayout();
        if self.fit_on_data {
            self.fit_view();
        }
    }

    /// The current tree.
    pub fn data(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    /// Remove and return the tree.
    pub fn take_data(&mut self) -> Option<Node> {
        self.animation.cancel_all();
        self.history.clear();
        self.dirty = true;
        self.root.take()
    }

    /// Lay the tree out again with the current config and theme.
    pub fn layout(&mut self) {
        self.relayout();
    }

    /// Node with `id`.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.root.as_ref()?.find(id)
    }

    /// First node, in pre-order, matching `predicate`.
    pub fn find_node(&self, predicate: impl Fn(&Node) -> bool) -> Option<&Node> {
        self.root.as_ref()?.find_by(&predicate)
    }

    // --- editing ---

    /// Append `node` as the last child of `parent` and play the enter
    /// animation on it.
    ///
    /// A node with an empty id is given a fresh one. Returns the id, or
    /// `None` when `parent` is missing or any id in `node`'s subtree is
    /// already in the tree.
    pub fn add_node(&mut self, parent: &NodeId, mut node: Node) -> Option<NodeId> {
        let root = self.root.as_mut()?;
        if node.id.as_str().is_empty() {
            node.id = fresh_id(root, &mut self.generated);
        }
        let mut clash = false;
        node.walk(&mut |n, _| clash |= root.contains(&n.id));
        if clash {
            tracing::warn!(id = %node.id, "add_node: id already in tree");
            return None;
        }
        let index = root.find(parent)?.children.len();
        let id = node.id.clone();
        let inverse = Edit::Insert {
            parent: parent.clone(),
            index,
            node,
        }
        .apply(root)?;
        self.history.record(inverse);
        self.relayout();

        let preset = self.animation.config().node_enter;
        if let Some(added) = self.root.as_mut().and_then(|r| r.find_mut(&id)) {
            self.animation.enter(added, preset, 0.0);
        }
        Some(id)
    }

    /// Remove the node with `id` and its subtree. The root cannot be
    /// removed.
    pub fn remove_node(&mut self, id: &NodeId) -> bool {
        let removed = self.detach(id);
        if removed {
            self.settle();
        }
        removed
    }

    /// Change the content of the node with `id`.
    pub fn update_node(&mut self, id: &NodeId, update: NodeUpdate) -> bool {
        let Some(root) = self.root.as_mut() else {
            return false;
        };
        if update.is_empty() {
            return root.contains(id);
        }
        let edit = Edit::Update {
            id: id.clone(),
            update,
        };
        let Some(inverse) = edit.apply(root) else {
            return false;
        };
        self.history.record(inverse);
        self.relayout();
        true
    }

    /// Collapse an expanded node or expand a collapsed one.
    ///
    /// Fails for missing nodes and nodes without children.
    pub fn toggle_collapse(&mut self, id: &NodeId) -> bool {
        let Some(node) = self.root.as_mut().and_then(|r| r.find_mut(id)) else {
            return false;
        };
        if !node.has_children() {
            return false;
        }
        node.collapsed = !node.collapsed;
        tracing::trace!(node = %id, collapsed = node.collapsed, "toggle collapse");
        self.relayout();
        true
    }

    /// Revert the newest edit.
    pub fn undo(&mut self) -> bool {
        self.replay(false).is_some()
    }

    /// Reapply the newest reverted edit.
    pub fn redo(&mut self) -> bool {
        self.replay(true).is_some()
    }

    /// Whether there is an edit to revert.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether there is an edit to reapply.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- layout and theme ---

    /// Current layout config.
    pub fn layout_config(&self) -> &LayoutConfig {
        self.layout.config()
    }

    /// Merge `patch` into the layout config and lay out again.
    pub fn set_layout(&mut self, patch: LayoutPatch) {
        self.layout.update_config(patch);
        self.relayout();
    }

    /// Replace the layout config and lay out again.
    pub fn set_layout_config(&mut self, config: LayoutConfig) {
        self.layout.set_config(config);
        self.relayout();
    }

    /// Use the registered theme `id`. Returns `false`, changing nothing,
    /// when no such theme exists.
    pub fn set_theme(&mut self, id: &str) -> bool {
        let Some(theme) = self.themes.get(id).cloned() else {
            tracing::warn!(theme = id, "set_theme: unknown theme");
            return false;
        };
        self.theme_id = id.to_owned();
        self.apply_theme(theme);
        true
    }

    /// Register `theme` under `id`, replacing any theme of that id. Takes
    /// effect at once when `id` is the active theme.
    pub fn register_theme(&mut self, id: impl Into<String>, theme: Theme) {
        let id = id.into();
        if id == self.theme_id {
            self.apply_theme(theme.clone());
        }
        self.themes.register(id, theme);
    }

    /// Parse a theme from JSON and register it under `id`.
    pub fn register_theme_json(&mut self, id: impl Into<String>, json: &str) -> Result<()> {
        let theme = Theme::from_json(json)?;
        self.register_theme(id, theme);
        Ok(())
    }

    /// Active theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Id of the active theme.
    pub fn theme_id(&self) -> &str {
        &self.theme_id
    }

    /// Registered themes.
    pub fn themes(&self) -> &ThemeRegistry {
        &self.themes
    }

    /// Measure and draw text with `font` instead of estimated metrics, and
    /// lay out again.
    pub fn set_font(&mut self, font: FontMetrics) {
        let measurer: Rc<dyn TextMeasurer> = Rc::new(font.clone());
        self.layout = LayoutEngine::with_measurer(self.layout.config().clone(), measurer.clone());
        self.render = RenderEngine::with_measurer(measurer);
        self.font = Some(font);
        self.relayout();
    }

    // --- view ---

    /// Pan/zoom mapping.
    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Current pan and zoom.
    pub fn transform(&self) -> Transform {
        self.view.state()
    }

    /// Restore a pan and zoom, clamping the zoom to the limits.
    pub fn set_transform(&mut self, transform: Transform) {
        self.view.set_state(transform);
        self.dirty = true;
    }

    /// Change the viewport size.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        MindMapConfig::new(width, height).validate()?;
        self.view.set_viewport(Size::new(width, height));
        self.dirty = true;
        Ok(())
    }

    /// Fit the visible content into the viewport with the default padding.
    pub fn fit_view(&mut self) {
        self.fit_view_with_padding(FIT_PADDING);
    }

    /// Zoom so the visible content fits inside the viewport less `padding`
    /// on every side, never magnifying past 1, and center on the root.
    pub fn fit_view_with_padding(&mut self, padding: f64) {
        let Some(root) = self.root.as_ref() else {
            return;
        };
        let Some(bounds) = content_bounds(root) else {
            return;
        };
        let viewport = self.view.viewport();
        let avail_w = viewport.width - 2.0 * padding;
        let avail_h = viewport.height - 2.0 * padding;
        if avail_w <= 0.0 || avail_h <= 0.0 {
            return;
        }
        let sx = avail_w / bounds.width().max(f64::MIN_POSITIVE);
        let sy = avail_h / bounds.height().max(f64::MIN_POSITIVE);
        let center = root.position().unwrap_or(Point::ORIGIN);
        self.view.set_scale(sx.min(sy).min(1.0));
        self.view.center_on(center);
        self.dirty = true;
    }

    /// Multiply the zoom by `factor`, within the limits.
    pub fn zoom(&mut self, factor: f64) {
        self.view.zoom_by(factor);
        self.dirty = true;
    }

    /// Restore the identity view.
    pub fn reset_view(&mut self) {
        self.view.reset();
        self.dirty = true;
    }

    // --- input ---

    /// A pointer button went down at `screen`.
    pub fn pointer_down(
        &mut self,
        screen: Point,
        button: PointerButton,
        modifiers: Modifiers,
    ) -> Vec<Event> {
        let Some(root) = self.root.as_ref() else {
            return Vec::new();
        };
        let events = self
            .events
            .pointer_down(root, &self.view, screen, button, modifiers);
        self.handle(events)
    }

    /// The pointer moved to `screen`.
    pub fn pointer_move(&mut self, screen: Point) -> Vec<Event> {
        let Some(root) = self.root.as_mut() else {
            return Vec::new();
        };
        let events = self.events.pointer_move(root, &mut self.view, screen);
        self.handle(events)
    }

    /// A pointer button went up at `screen`.
    pub fn pointer_up(&mut self, screen: Point, button: PointerButton) -> Vec<Event> {
        let Some(root) = self.root.as_mut() else {
            return Vec::new();
        };
        let events = self.events.pointer_up(root, &self.view, screen, button);
        self.handle(events)
    }

    /// The pointer left the canvas.
    pub fn pointer_leave(&mut self) -> Vec<Event> {
        let Some(root) = self.root.as_mut() else {
            return Vec::new();
        };
        let events = self.events.pointer_leave(root);
        self.handle(events)
    }

    /// Double click at `screen`.
    pub fn double_click(&mut self, screen: Point) -> Vec<Event> {
        let Some(root) = self.root.as_ref() else {
            return Vec::new();
        };
        let events = self.events.double_click(root, &self.view, screen);
        self.handle(events)
    }

    /// Context menu requested at `screen`. Empty right after a pan.
    pub fn context_menu(&mut self, screen: Point) -> Vec<Event> {
        let Some(root) = self.root.as_ref() else {
            return Vec::new();
        };
        let events = self.events.context_menu(root, &self.view, screen);
        self.handle(events)
    }

    /// Wheel scrolled by `delta_y` over `screen`.
    pub fn wheel(&mut self, screen: Point, delta_y: f64) -> Vec<Event> {
        let events = self.events.wheel(&mut self.view, screen, delta_y);
        self.handle(events)
    }

    /// A key went down. Recognized chords are carried out.
    pub fn key_down(&mut self, key: &str, modifiers: Modifiers) -> Vec<Event> {
        let events = self.events.key_down(key, modifiers);
        self.handle(events)
    }

    /// Selected ids, in selection order.
    pub fn selected(&self) -> &[NodeId] {
        self.events.selected()
    }

    /// Select exactly the existing nodes among `ids`.
    pub fn select(&mut self, ids: impl IntoIterator<Item = NodeId>) -> Vec<Event> {
        let Some(root) = self.root.as_mut() else {
            return Vec::new();
        };
        let events = self.events.set_selection(root, ids);
        self.handle(events)
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) -> Vec<Event> {
        let Some(root) = self.root.as_mut() else {
            return Vec::new();
        };
        let events = self.events.clear_selection(root);
        self.handle(events)
    }

    /// Id of the node under `screen`, if any.
    pub fn hit_test(&self, screen: Point) -> Option<NodeId> {
        self.events
            .hit_test(self.root.as_ref()?, &self.view, screen)
    }

    /// Enabled interactions.
    pub fn interaction(&self) -> &InteractionConfig {
        self.events.config()
    }

    /// Change the enabled interactions. Aborts any gesture in progress.
    pub fn set_interaction(&mut self, config: InteractionConfig) {
        self.events.set_config(config);
    }

    /// Call `handler` for every event of `kind`.
    pub fn on(&mut self, kind: EventKind, handler: impl FnMut(&Event) + 'static) -> ListenerId {
        self.events.on(kind, handler)
    }

    /// Remove a listener added with [`MindMap::on`].
    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        self.events.off(kind, id)
    }

    // --- animation ---

    /// Animation engine.
    pub fn animation(&self) -> &AnimationEngine<T> {
        &self.animation
    }

    /// Animation engine, mutably.
    pub fn animation_mut(&mut self) -> &mut AnimationEngine<T> {
        &mut self.animation
    }

    /// Replace the animation defaults.
    pub fn set_animation_config(&mut self, config: AnimationConfig) {
        self.animation.set_config(config);
    }

    /// Animate the node with `id` toward `targets`.
    pub fn animate(
        &mut self,
        id: &NodeId,
        targets: Targets,
        options: AnimationOptions,
    ) -> Option<AnimationHandle> {
        let node = self.root.as_mut()?.find_mut(id)?;
        let handle = self.animation.animate(node, targets, options);
        self.dirty = true;
        Some(handle)
    }

    /// Play the configured enter or exit preset over every visible node.
    pub fn cascade(&mut self, direction: Cascade) -> Option<GroupHandle> {
        let root = self.root.as_mut()?;
        let group = self.animation.cascade(root, direction);
        self.dirty = true;
        Some(group)
    }

    // --- output ---

    /// Whether the next [`MindMap::frame`] will draw.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force the next [`MindMap::frame`] to draw.
    pub fn request_redraw(&mut self) {
        self.dirty = true;
    }

    /// Advance animations to `now` (milliseconds) and, if anything changed,
    /// draw onto `surface`. Returns whether it drew.
    pub fn frame(&mut self, now: f64, surface: &mut (impl Surface + ?Sized)) -> bool {
        let Some(root) = self.root.as_mut() else {
            if !self.dirty {
                return false;
            }
            surface.clear(self.render.background(&self.theme));
            self.dirty = false;
            return true;
        };
        if self.animation.tick(root, now) {
            self.dirty = true;
        }
        if !self.dirty {
            return false;
        }
        self.render.render(root, &self.theme, &self.view, surface);
        self.dirty = false;
        true
    }

    /// Export the tree.
    ///
    /// Images cover the visible, laid-out content at the requested pixel
    /// ratio; text formats cover the whole tree. A quality outside
    /// `0.0..=1.0` is rejected for every format.
    pub fn export(&mut self, request: ExportRequest) -> Result<Vec<u8>> {
        let root = self.root.as_ref().ok_or(Error::Empty)?;
        tracing::debug!(format = %request.format, quality = request.quality, "export");
        if !(0.0..=1.0).contains(&request.quality) {
            return Err(Error::Configuration(format!(
                "quality must be within 0..=1, got {}",
                request.quality
            )));
        }
        match request.format {
            ExportFormat::Json => Ok(serde_json::to_vec_pretty(root)?),
            ExportFormat::Markdown => Ok(to_markdown(root).into_bytes()),
            ExportFormat::Png => {
                if !(request.pixel_ratio.is_finite() && request.pixel_ratio > 0.0) {
                    return Err(Error::Configuration(format!(
                        "pixel ratio must be finite and positive, got {}",
                        request.pixel_ratio
                    )));
                }
                let background = request
                    .background
                    .or(self.theme.global.background_color)
                    .unwrap_or(Color::WHITE);
                let frame = ExportFrame::fit(root)
                    .ok_or(Error::Empty)?
                    .with_pixel_ratio(request.pixel_ratio)
                    .with_background(Some(background));
                let (width, height) = frame.pixel_size();
                let mut surface = VelloCpuSurface::new(width, height)?;
                if let Some(font) = &self.font {
                    surface = surface.with_font(font.clone());
                }
                self.render
                    .render_export(root, &self.theme, &frame, &mut surface);
                Ok(surface.encode_png()?)
            }
        }
    }

    /// Export in the format named `format`.
    pub fn export_as(&mut self, format: &str) -> Result<Vec<u8>> {
        self.export(ExportRequest::parse(format)?)
    }

    // --- internals ---

    fn relayout(&mut self) {
        if let Some(root) = self.root.as_mut() {
            self.layout.layout(root, &self.theme);
        }
        self.dirty = true;
    }

    fn apply_theme(&mut self, theme: Theme) {
        tracing::debug!(theme = %self.theme_id, "theme applied");
        self.theme = theme;
        self.render.invalidate_cache();
        self.relayout();
    }

    /// Take `id` out of the tree and record it, without laying out.
    fn detach(&mut self, id: &NodeId) -> bool {
        let Some(root) = self.root.as_mut() else {
            return false;
        };
        if root.id == *id {
            return false;
        }
        let Some(parent) = root.parent_of(id).map(|p| p.id.clone()) else {
            return false;
        };
        let edit = Edit::Remove {
            parent,
            id: id.clone(),
        };
        let Some(inverse) = edit.apply(root) else {
            return false;
        };
        if let Edit::Insert { node, .. } = &inverse {
            node.walk(&mut |n, _| {
                self.animation.cancel_node(&n.id);
            });
        }
        self.history.record(inverse);
        true
    }

    /// Drop stale selection and hover state and lay out after a structural
    /// change.
    fn settle(&mut self) -> Vec<Event> {
        let events = match self.root.as_mut() {
            Some(root) => self.events.retain_existing(root),
            None => Vec::new(),
        };
        self.relayout();
        events
    }

    fn replay(&mut self, redo: bool) -> Option<Vec<Event>> {
        let root = self.root.as_mut()?;
        let applied = if redo {
            self.history.redo(root)
        } else {
            self.history.undo(root)
        };
        applied.then(|| self.settle())
    }

    /// Mark dirty and carry out the actions `events` request.
    fn handle(&mut self, mut events: Vec<Event>) -> Vec<Event> {
        if events.is_empty() {
            return events;
        }
        self.dirty = true;
        let mut follow = Vec::new();
        for event in &events {
            match (event.kind, &event.payload) {
                (EventKind::NodeCollapse | EventKind::NodeExpand, _) => {
                    if let Some(id) = &event.node {
                        self.toggle_collapse(id);
                    }
                }
                (EventKind::Shortcut, Payload::Intent(intent)) => {
                    follow.extend(self.execute(*intent));
                }
                _ => {}
            }
        }
        events.extend(follow);
        events
    }

    fn execute(&mut self, intent: Intent) -> Vec<Event> {
        tracing::debug!(?intent, "shortcut");
        match intent {
            Intent::DeleteSelection => {
                let ids = self.events.selected().to_vec();
                let mut removed = false;
                for id in &ids {
                    removed |= self.detach(id);
                }
                if removed { self.settle() } else { Vec::new() }
            }
            Intent::Undo => self.replay(false).unwrap_or_default(),
            Intent::Redo => self.replay(true).unwrap_or_default(),
            Intent::SelectAll => match self.root.as_mut() {
                Some(root) => self.events.select_all(root),
                None => Vec::new(),
            },
        }
    }
}

/// First `node-N` id not in `root`.
fn fresh_id(root: &Node, counter: &mut u64) -> NodeId {
    loop {
        *counter += 1;
        let id = NodeId::new(format!("node-{counter}"));
        if !root.contains(&id) {
            return id;
        }
    }
}
