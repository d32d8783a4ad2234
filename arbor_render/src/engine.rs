// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use std::rc::Rc;

use arbor_imaging::{Layer, Shadow, StrokeStyle, Surface, SurfaceExt, TextRun};
use arbor_text::{EstimatedMetrics, FontSpec, FontWeight, TextMeasurer, wrap_text};
use arbor_tree::{EdgeStyle, Node, ResolvedStyle, Theme, indicator_center};
use arbor_view::ViewTransform;
use hashbrown::HashMap;
use kurbo::{BezPath, Circle, Point, Rect, Shape as _};
use peniko::Color;

use crate::edge::{anchor, arrow_head, edge_path};
use crate::export::ExportFrame;
use crate::shape::{TOLERANCE, shape_path};

/// Outline color of selected nodes.
pub const SELECTION_COLOR: Color = Color::from_rgb8(0x4a, 0x90, 0xe2);
/// Gap between a selected node and its selection outline, in world units.
pub const SELECTION_PADDING: f64 = 4.0;
/// Radius of the collapse indicator, in world units.
pub const INDICATOR_RADIUS: f64 = 6.0;
/// Horizontal room a label leaves inside its node.
pub const LABEL_INSET: f64 = 20.0;
/// Line height as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.2;

const INDICATOR_COLLAPSED: Color = Color::from_rgb8(0x99, 0x99, 0x99);
const HOVER_SHADOW: Color = Color::from_rgba8(0, 0, 0, 51);
const WRAP_CACHE_LIMIT: usize = 4096;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct WrapKey {
    text: String,
    family: String,
    size: u64,
    weight: FontWeight,
    max_width: u64,
}

impl WrapKey {
    fn new(text: &str, font: &FontSpec, max_width: f64) -> Self {
        Self {
            text: text.to_owned(),
            family: font.family.clone(),
            size: font.size.to_bits(),
            weight: font.weight,
            max_width: max_width.to_bits(),
        }
    }
}

/// Draws a laid-out tree onto a [`Surface`].
///
/// Rendering never mutates the tree. Nodes without a position or size are
/// skipped, along with connectors touching them.
pub struct RenderEngine {
    measurer: Rc<dyn TextMeasurer>,
    background: Option<Color>,
    wrapped: HashMap<WrapKey, Rc<[String]>>,
}

impl fmt::Debug for RenderEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderEngine")
            .field("background", &self.background)
            .field("wrapped", &self.wrapped.len())
            .finish_non_exhaustive()
    }
}

impl Default for RenderEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderEngine {
    /// Engine wrapping labels with [`EstimatedMetrics`].
    pub fn new() -> Self {
        Self::with_measurer(Rc::new(EstimatedMetrics))
    }

    /// Engine wrapping labels with `measurer`.
    ///
    /// Use the same measurer the layout engine sizes nodes with, so wrapped
    /// labels fit the boxes they were measured for.
    pub fn with_measurer(measurer: Rc<dyn TextMeasurer>) -> Self {
        Self {
            measurer,
            background: None,
            wrapped: HashMap::new(),
        }
    }

    /// Override the background. `None` falls back to the theme's background.
    pub fn set_background(&mut self, color: Option<Color>) {
        self.background = color;
    }

    /// Background a frame is cleared to under `theme`.
    pub fn background(&self, theme: &Theme) -> Option<Color> {
        self.background.or(theme.global.background_color)
    }

    /// Drop cached label layouts.
    pub fn invalidate_cache(&mut self) {
        tracing::trace!(entries = self.wrapped.len(), "render cache invalidated");
        self.wrapped.clear();
    }

    /// Clear `surface` and draw `root` under the live `view`.
    ///
    /// Stroke widths and dash patterns are divided by the view scale so they
    /// keep their on-screen size at every zoom level.
    pub fn render(
        &mut self,
        root: &Node,
        theme: &Theme,
        view: &ViewTransform,
        surface: &mut (impl Surface + ?Sized),
    ) {
        surface.clear(self.background(theme));
        surface.set_transform(view.affine());
        self.draw_tree(root, theme, view.scale(), surface);
    }

    /// Clear `surface` and draw `root` framed by `frame`.
    ///
    /// The surface is expected to be [`ExportFrame::pixel_size`] pixels.
    /// Strokes keep their unscaled world widths.
    pub fn render_export(
        &mut self,
        root: &Node,
        theme: &Theme,
        frame: &ExportFrame,
        surface: &mut (impl Surface + ?Sized),
    ) {
        surface.clear(frame.background);
        surface.set_transform(frame.affine());
        self.draw_tree(root, theme, 1.0, surface);
    }

    fn draw_tree(
        &mut self,
        root: &Node,
        theme: &Theme,
        scale: f64,
        surface: &mut (impl Surface + ?Sized),
    ) {
        draw_edges(root, &theme.edge_style, scale, surface);
        self.draw_nodes(root, 0, theme, scale, surface);
    }

    fn draw_nodes(
        &mut self,
        node: &Node,
        depth: usize,
        theme: &Theme,
        scale: f64,
        surface: &mut (impl Surface + ?Sized),
    ) {
        if let Some(bounds) = node.bounds() {
            let style = theme.resolve(node.style.as_ref(), depth);
            #[expect(clippy::cast_possible_truncation, reason = "opacity is a unit fraction")]
            let opacity = node.opacity.clamp(0.0, 1.0) as f32;
            surface.with_optional_layer(Layer::opacity(opacity), |s| {
                self.draw_node(node, bounds, &style, scale, s);
            });
        }
        for child in node.visible_children() {
            self.draw_nodes(child, depth + 1, theme, scale, surface);
        }
    }

    fn draw_node(
        &mut self,
        node: &Node,
        bounds: Rect,
        style: &ResolvedStyle,
        scale: f64,
        surface: &mut (impl Surface + ?Sized),
    ) {
        if node.selected {
            let outline = shape_path(
                style.shape,
                bounds.inflate(SELECTION_PADDING, SELECTION_PADDING),
                style.border_radius + SELECTION_PADDING,
            );
            let stroke = StrokeStyle::new(3.0 / scale).with_dashes(0.0, [5.0 / scale, 5.0 / scale]);
            surface.stroke(&outline, &stroke, SELECTION_COLOR);
        }

        let mut face = Layer::default();
        if node.hovered {
            face.shadow = Some(Shadow {
                dx: 0.0,
                dy: 2.0 / scale,
                blur: 10.0 / scale,
                color: HOVER_SHADOW,
            });
        }
        surface.with_optional_layer(face, |s| {
            let outline = shape_path(style.shape, bounds, style.border_radius);
            s.fill(&outline, style.background_color);
            if style.border_width > 0.0 {
                let dashes = style.border_style.dashes().iter().map(|d| d / scale);
                let stroke = StrokeStyle::new(style.border_width / scale).with_dashes(0.0, dashes);
                s.stroke(&outline, &stroke, style.border_color);
            }
            self.draw_label(node, bounds, style, s);
            if node.has_children() {
                draw_indicator(bounds, node.collapsed, scale, s);
            }
        });
    }

    fn draw_label(
        &mut self,
        node: &Node,
        bounds: Rect,
        style: &ResolvedStyle,
        surface: &mut (impl Surface + ?Sized),
    ) {
        let font = style.font();
        let lines = self.wrap(&node.label, &font, bounds.width() - LABEL_INSET);
        let line_height = font.size * LINE_HEIGHT;
        let center = bounds.center();
        let first = center.y - (lines.len() as f64 * line_height) / 2.0 + line_height / 2.0;
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            surface.draw_text(&TextRun {
                text: line.clone(),
                font: font.clone(),
                center: Point::new(center.x, first + i as f64 * line_height),
                color: style.color,
            });
        }
    }

    fn wrap(&mut self, text: &str, font: &FontSpec, max_width: f64) -> Rc<[String]> {
        let key = WrapKey::new(text, font, max_width);
        if let Some(lines) = self.wrapped.get(&key) {
            return lines.clone();
        }
        if self.wrapped.len() >= WRAP_CACHE_LIMIT {
            self.wrapped.clear();
        }
        let lines: Rc<[String]> = wrap_text(text, max_width, font, self.measurer.as_ref()).into();
        self.wrapped.insert(key, lines.clone());
        lines
    }
}

fn draw_indicator(bounds: Rect, collapsed: bool, scale: f64, surface: &mut (impl Surface + ?Sized)) {
    let c = indicator_center(bounds);
    let fill = if collapsed {
        INDICATOR_COLLAPSED
    } else {
        SELECTION_COLOR
    };
    surface.fill(&Circle::new(c, INDICATOR_RADIUS).to_path(TOLERANCE), fill);

    let mut glyph = BezPath::new();
    glyph.move_to((c.x - 3.0, c.y));
    glyph.line_to((c.x + 3.0, c.y));
    if collapsed {
        glyph.move_to((c.x, c.y - 3.0));
        glyph.line_to((c.x, c.y + 3.0));
    }
    surface.stroke(&glyph, &StrokeStyle::new(2.0 / scale), Color::WHITE);
}

/// Connectors from `node` to its visible children, depth-first.
fn draw_edges(node: &Node, style: &EdgeStyle, scale: f64, surface: &mut (impl Surface + ?Sized)) {
    let Some(from) = node.bounds() else {
        for child in node.visible_children() {
            draw_edges(child, style, scale, surface);
        }
        return;
    };
    let dashes = style.style.dashes().iter().map(|d| d / scale);
    let stroke = StrokeStyle::new(style.width / scale).with_dashes(0.0, dashes);
    for child in node.visible_children() {
        if let Some(to) = child.bounds() {
            let start = anchor(from, to.center());
            let end = anchor(to, from.center());
            let path = edge_path(style.curve, start, end);
            surface.stroke(&path, &stroke, style.color);
            if style.arrow {
                if let Some(head) = arrow_head(&path, style.arrow_size / scale) {
                    surface.fill(&head, style.color);
                }
            }
        }
        draw_edges(child, style, scale, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_imaging::RecordingSurface;

    #[test]
    fn wrapped_labels_are_cached_until_invalidated() {
        let mut engine = RenderEngine::new();
        let font = FontSpec::new("Arial", 14.0);
        let a = engine.wrap("a fairly long label", &font, 40.0);
        let b = engine.wrap("a fairly long label", &font, 40.0);
        assert!(Rc::ptr_eq(&a, &b));
        engine.invalidate_cache();
        let c = engine.wrap("a fairly long label", &font, 40.0);
        assert!(!Rc::ptr_eq(&a, &c));
        assert_eq!(a, c);
    }

    #[test]
    fn background_override_wins_over_theme() {
        let mut engine = RenderEngine::new();
        let theme = Theme::default();
        assert_eq!(engine.background(&theme), theme.global.background_color);
        engine.set_background(Some(Color::BLACK));
        assert_eq!(engine.background(&theme), Some(Color::BLACK));
    }

    #[test]
    fn indicator_draws_bar_only_when_collapsed() {
        let bounds = Rect::from_center_size((0.0, 0.0), (100.0, 40.0));
        let mut s = RecordingSurface::default();
        draw_indicator(bounds, false, 1.0, &mut s);
        let (path, _, _, _) = s.strokes().next().unwrap();
        assert_eq!(path.elements().len(), 2);

        let mut s = RecordingSurface::default();
        draw_indicator(bounds, true, 2.0, &mut s);
        let (fill_path, color, _) = s.fills().next().unwrap();
        assert_eq!(color, INDICATOR_COLLAPSED);
        assert!(fill_path.contains(Point::new(58.0, 0.0)));
        let (path, stroke, _, _) = s.strokes().next().unwrap();
        assert_eq!(path.elements().len(), 4);
        assert_eq!(stroke.width, 1.0);
    }
}
