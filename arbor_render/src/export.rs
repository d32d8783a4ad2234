// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_tree::Node;
use kurbo::{Affine, Rect};
use peniko::Color;

/// Margin around exported content, in world units.
pub const EXPORT_PADDING: f64 = 50.0;
/// Device pixels per world unit in exported images.
pub const EXPORT_PIXEL_RATIO: f64 = 2.0;

/// Union of the boxes of every laid-out node not hidden by a collapsed
/// ancestor, or `None` when nothing is laid out.
pub fn content_bounds(root: &Node) -> Option<Rect> {
    let mut bounds: Option<Rect> = None;
    root.walk_visible(&mut |node, _| {
        if let Some(b) = node.bounds() {
            bounds = Some(bounds.map_or(b, |acc| acc.union(b)));
        }
    });
    bounds
}

/// Off-screen framing of a diagram, independent of the live view.
///
/// The content box is centered on an image `content + 2 × padding` world
/// units wide and tall, rendered at `pixel_ratio` device pixels per unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportFrame {
    /// World-space box to capture.
    pub content: Rect,
    /// Margin on every side, in world units.
    pub padding: f64,
    /// Device pixels per world unit.
    pub pixel_ratio: f64,
    /// Fill behind the diagram. `None` leaves the image transparent.
    pub background: Option<Color>,
}

impl ExportFrame {
    /// Frame around the visible, laid-out part of `root` with the default
    /// padding and pixel ratio and a white background.
    pub fn fit(root: &Node) -> Option<Self> {
        content_bounds(root).map(|content| Self {
            content,
            padding: EXPORT_PADDING,
            pixel_ratio: EXPORT_PIXEL_RATIO,
            background: Some(Color::WHITE),
        })
    }

    /// Return this frame with a different pixel ratio.
    #[must_use]
    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// Return this frame with a different background.
    #[must_use]
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    /// Image size in world units.
    pub fn logical_size(&self) -> kurbo::Size {
        self.content.size() + kurbo::Size::new(2.0 * self.padding, 2.0 * self.padding)
    }

    /// Image size in device pixels, rounded up.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "pixel dimensions are clamped to the u32 range"
    )]
    pub fn pixel_size(&self) -> (u32, u32) {
        let s = self.logical_size() * self.pixel_ratio;
        let px = |v: f64| v.ceil().clamp(1.0, f64::from(u32::MAX)) as u32;
        (px(s.width), px(s.height))
    }

    /// Map from world coordinates to image pixels.
    pub fn affine(&self) -> Affine {
        let half = self.logical_size().to_vec2() / 2.0;
        Affine::scale(self.pixel_ratio)
            * Affine::translate(half - self.content.center().to_vec2())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn placed(id: &str, x: f64, y: f64) -> Node {
        let mut n = Node::new(id, id);
        n.set_position(Point::new(x, y));
        n.set_size(kurbo::Size::new(100.0, 40.0));
        n
    }

    #[test]
    fn bounds_skip_hidden_and_unplaced_nodes() {
        let mut root = placed("r", 0.0, 0.0)
            .with_child(placed("a", 300.0, 0.0).with_child(placed("deep", 900.0, 0.0)))
            .with_child(Node::new("u", "unplaced"));
        root.children[0].collapsed = true;
        let b = content_bounds(&root).unwrap();
        assert_eq!(b, Rect::new(-50.0, -20.0, 350.0, 20.0));
        assert!(content_bounds(&Node::new("x", "x")).is_none());
    }

    #[test]
    fn frame_centers_content_with_padding() {
        let frame = ExportFrame::fit(&placed("r", 10.0, 10.0)).unwrap();
        assert_eq!(frame.pixel_size(), (400, 280));
        let xf = frame.affine();
        assert_eq!(xf * Point::new(10.0, 10.0), Point::new(200.0, 140.0));
        assert_eq!(xf * Point::new(-40.0, -10.0), Point::new(100.0, 100.0));
    }
}
