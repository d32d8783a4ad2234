// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Default lower zoom bound.
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;
/// Default upper zoom bound.
pub const DEFAULT_MAX_ZOOM: f64 = 5.0;

/// Plain pan/zoom values, as carried in events and snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Horizontal pan in screen pixels.
    pub x: f64,
    /// Vertical pan in screen pixels.
    pub y: f64,
    /// Uniform zoom factor.
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale: 1.0,
        }
    }
}

/// Pan and zoom over a viewport of known size.
///
/// The zoom factor always stays within `[min_zoom, max_zoom]`.
#[derive(Clone, Debug)]
pub struct ViewTransform {
    viewport: Size,
    offset: Vec2,
    scale: f64,
    min_zoom: f64,
    max_zoom: f64,
    world_to_screen: Affine,
    screen_to_world: Affine,
}

impl ViewTransform {
    /// Identity view over a viewport of `viewport` pixels.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        let mut view = Self {
            viewport,
            offset: Vec2::ZERO,
            scale: 1.0,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            world_to_screen: Affine::IDENTITY,
            screen_to_world: Affine::IDENTITY,
        };
        view.rebuild();
        view
    }

    /// Viewport size in pixels.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resize the viewport, keeping pan and zoom.
    pub fn set_viewport(&mut self, viewport: Size) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.rebuild();
        }
    }

    /// Pan offset in screen pixels.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Zoom factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Lower and upper zoom bounds.
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Set the zoom bounds, normalizing their order and clamping the
    /// current zoom into them.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (lo, hi) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = lo;
        self.max_zoom = hi;
        self.set_scale(self.scale);
    }

    /// Current values as a plain [`Transform`].
    pub fn state(&self) -> Transform {
        Transform {
            x: self.offset.x,
            y: self.offset.y,
            scale: self.scale,
        }
    }

    /// Replace pan and zoom. The scale is clamped.
    pub fn set_state(&mut self, state: Transform) {
        self.offset = Vec2::new(state.x, state.y);
        self.scale = state.scale.clamp(self.min_zoom, self.max_zoom);
        self.rebuild();
    }

    /// Set the zoom factor without moving the pan offset.
    pub fn set_scale(&mut self, scale: f64) {
        let clamped = scale.clamp(self.min_zoom, self.max_zoom);
        if (self.scale - clamped).abs() < f64::EPSILON {
            return;
        }
        self.scale = clamped;
        self.rebuild();
    }

    /// Multiply the zoom factor, keeping the pan offset.
    pub fn zoom_by(&mut self, factor: f64) {
        if factor > 0.0 {
            self.set_scale(self.scale * factor);
        }
    }

    /// Restore the identity view.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.scale = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
        self.rebuild();
    }

    /// Pan by a delta in screen pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        self.offset += delta;
        self.rebuild();
    }

    /// Zoom by `factor` around a screen point.
    ///
    /// The world point under `anchor` stays under `anchor`. Returns `false`
    /// when the clamped zoom does not change.
    pub fn zoom_about(&mut self, anchor: Point, factor: f64) -> bool {
        if factor <= 0.0 {
            return false;
        }
        let new_scale = (self.scale * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return false;
        }
        let world = self.screen_to_world(anchor);
        self.scale = new_scale;
        self.offset = anchor.to_vec2() - self.center() - world.to_vec2() * new_scale;
        self.rebuild();
        true
    }

    /// Fit `rect` into the viewport with `padding` pixels on each side.
    ///
    /// The scale never exceeds `max_scale` and the rect's center lands on
    /// the viewport center. Empty rects and viewports are ignored.
    pub fn fit_rect(&mut self, rect: Rect, padding: f64, max_scale: f64) {
        if rect.width() <= 0.0 && rect.height() <= 0.0 {
            return;
        }
        let avail_w = self.viewport.width - padding * 2.0;
        let avail_h = self.viewport.height - padding * 2.0;
        if avail_w <= 0.0 || avail_h <= 0.0 {
            return;
        }
        let sx = avail_w / rect.width().max(f64::MIN_POSITIVE);
        let sy = avail_h / rect.height().max(f64::MIN_POSITIVE);
        self.scale = sx.min(sy).min(max_scale).clamp(self.min_zoom, self.max_zoom);
        self.offset = -rect.center().to_vec2() * self.scale;
        self.rebuild();
    }

    /// Pan so that `world` is at the viewport center.
    pub fn center_on(&mut self, world: Point) {
        self.offset = -world.to_vec2() * self.scale;
        self.rebuild();
    }

    /// World to screen mapping.
    pub fn affine(&self) -> Affine {
        self.world_to_screen
    }

    /// Map a world point to the screen.
    pub fn world_to_screen(&self, p: Point) -> Point {
        self.world_to_screen * p
    }

    /// Map a screen point into the world.
    pub fn screen_to_world(&self, p: Point) -> Point {
        self.screen_to_world * p
    }

    /// World-space region covered by the viewport.
    pub fn visible_world_rect(&self) -> Rect {
        let a = self.screen_to_world(Point::ORIGIN);
        let b = self.screen_to_world(Point::new(self.viewport.width, self.viewport.height));
        Rect::from_points(a, b)
    }

    fn center(&self) -> Vec2 {
        Vec2::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    fn rebuild(&mut self) {
        self.world_to_screen =
            Affine::translate(self.center() + self.offset) * Affine::scale(self.scale);
        self.screen_to_world = self.world_to_screen.inverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn origin_maps_to_viewport_center() {
        let view = ViewTransform::new(Size::new(800.0, 600.0));
        assert!(close(view.world_to_screen(Point::ORIGIN), Point::new(400.0, 300.0)));
    }

    #[test]
    fn world_screen_round_trip_under_pan_and_zoom() {
        let mut view = ViewTransform::new(Size::new(800.0, 600.0));
        view.pan_by(Vec2::new(35.0, -12.0));
        view.set_scale(2.5);
        let p = Point::new(-17.0, 44.0);
        assert!(close(view.screen_to_world(view.world_to_screen(p)), p));
    }

    #[test]
    fn screen_formula_matches_affine() {
        let mut view = ViewTransform::new(Size::new(400.0, 200.0));
        view.set_state(Transform {
            x: 10.0,
            y: 20.0,
            scale: 2.0,
        });
        let p = Point::new(3.0, 4.0);
        let expected = Point::new(200.0 + 10.0 + 3.0 * 2.0, 100.0 + 20.0 + 4.0 * 2.0);
        assert!(close(view.world_to_screen(p), expected));
    }

    #[test]
    fn zoom_about_keeps_anchor_fixed() {
        let mut view = ViewTransform::new(Size::new(800.0, 600.0));
        view.pan_by(Vec2::new(50.0, 20.0));
        for (anchor, factor) in [
            (Point::new(100.0, 100.0), 1.1),
            (Point::new(700.0, 20.0), 0.9),
            (Point::new(400.0, 300.0), 1.1),
        ] {
            let world = view.screen_to_world(anchor);
            assert!(view.zoom_about(anchor, factor), "zoom should change");
            assert!(close(view.world_to_screen(world), anchor));
        }
    }

    #[test]
    fn zoom_is_clamped_to_limits() {
        let mut view = ViewTransform::new(Size::new(800.0, 600.0));
        for _ in 0..100 {
            view.zoom_about(Point::new(10.0, 10.0), 1.1);
        }
        assert_eq!(view.scale(), DEFAULT_MAX_ZOOM);
        assert!(!view.zoom_about(Point::new(10.0, 10.0), 1.1), "already at max");
        for _ in 0..100 {
            view.zoom_by(0.5);
        }
        assert_eq!(view.scale(), DEFAULT_MIN_ZOOM);
    }

    #[test]
    fn fit_rect_respects_padding_and_max_scale() {
        let mut view = ViewTransform::new(Size::new(500.0, 300.0));
        view.fit_rect(Rect::new(0.0, 0.0, 800.0, 100.0), 50.0, 1.0);
        assert!((view.scale() - 0.5).abs() < 1e-9, "scale = {}", view.scale());
        assert!(close(view.world_to_screen(Point::new(400.0, 50.0)), Point::new(250.0, 150.0)));

        // Small content never zooms in past `max_scale`.
        view.fit_rect(Rect::new(0.0, 0.0, 10.0, 10.0), 50.0, 1.0);
        assert_eq!(view.scale(), 1.0);
    }

    #[test]
    fn center_on_and_reset() {
        let mut view = ViewTransform::new(Size::new(200.0, 200.0));
        view.set_scale(2.0);
        view.center_on(Point::new(30.0, -10.0));
        assert!(close(view.world_to_screen(Point::new(30.0, -10.0)), Point::new(100.0, 100.0)));
        view.reset();
        assert_eq!(view.state(), Transform::default());
    }

    #[test]
    fn visible_rect_covers_viewport() {
        let mut view = ViewTransform::new(Size::new(200.0, 100.0));
        view.set_scale(2.0);
        let r = view.visible_world_rect();
        assert!((r.width() - 100.0).abs() < 1e-9);
        assert!((r.height() - 50.0).abs() < 1e-9);
    }
}
