// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Imaging: the drawing surface diagram renderers target.
//!
//! A diagram frame needs only a handful of primitives: solid fills and
//! strokes of Bézier paths, a current transform, isolated layers for group
//! opacity and drop shadows, and centered single-line text. [`Surface`]
//! captures exactly that, so the renderer stays independent of any raster or
//! vector backend.
//!
//! State is explicit and ordered. A call to [`Surface::set_transform`]
//! affects every later draw until the next call; [`Surface::push_layer`] and
//! [`Surface::pop_layer`] must nest. [`SurfaceExt`] adds closure helpers that
//! keep pushes and pops balanced.
//!
//! [`RecordingSurface`] records every call as a [`Command`] together with the
//! transform in effect, which is what tests assert on.
//!
//! ```rust
//! use arbor_imaging::{Command, Layer, RecordingSurface, Surface, SurfaceExt};
//! use kurbo::{Affine, Rect, Shape};
//! use peniko::color::palette;
//!
//! let mut surface = RecordingSurface::default();
//! surface.set_transform(Affine::scale(2.0));
//! surface.with_layer(Layer::opacity(0.5), |s| {
//!     s.fill(&Rect::new(0.0, 0.0, 10.0, 10.0).to_path(0.1), palette::css::RED);
//! });
//!
//! assert_eq!(surface.fills().count(), 1);
//! assert!(matches!(surface.commands().last(), Some(Command::PopLayer)));
//! ```

mod recording;

pub use recording::{Command, RecordingSurface};

use arbor_text::FontSpec;
use kurbo::{Affine, BezPath, Point};
use peniko::Color;

/// Stroke parameters: width, joins, caps and dash pattern.
pub type StrokeStyle = kurbo::Stroke;

/// Blurred, offset copy of a layer's content drawn beneath it.
///
/// Offsets and blur are in the coordinate space of the transform active when
/// the layer is pushed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Horizontal offset.
    pub dx: f64,
    /// Vertical offset.
    pub dy: f64,
    /// Gaussian standard deviation of the blur.
    pub blur: f64,
    /// Shadow color, alpha included.
    pub color: Color,
}

/// Parameters of an isolated compositing layer.
///
/// A layer with neither effect is a no-op group; backends may skip it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Layer {
    /// Group opacity applied when the layer is composited.
    pub opacity: Option<f32>,
    /// Drop shadow cast by the layer's content.
    pub shadow: Option<Shadow>,
}

impl Layer {
    /// Layer that only applies group opacity.
    pub fn opacity(opacity: f32) -> Self {
        Self {
            opacity: Some(opacity),
            shadow: None,
        }
    }

    /// Layer that only casts a shadow.
    pub fn shadow(shadow: Shadow) -> Self {
        Self {
            opacity: None,
            shadow: Some(shadow),
        }
    }

    /// Whether compositing this layer changes anything.
    pub fn has_effect(&self) -> bool {
        self.opacity.is_some_and(|o| o < 1.0) || self.shadow.is_some()
    }
}

/// One line of text, centered on a point.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    /// Text to draw. Never contains a line break.
    pub text: String,
    /// Font to set it in.
    pub font: FontSpec,
    /// Center of the line box in the current coordinate space.
    ///
    /// Horizontally the run is centered on `x`; vertically its ascent and
    /// descent are centered on `y`.
    pub center: Point,
    /// Fill color.
    pub color: Color,
}

/// Target of diagram drawing.
pub trait Surface {
    /// Fill the whole target with `color`, or reset it to transparent.
    ///
    /// Ignores the current transform.
    fn clear(&mut self, color: Option<Color>);

    /// Replace the transform applied to subsequent drawing.
    fn set_transform(&mut self, transform: Affine);

    /// Fill `path` (non-zero winding) with a solid color.
    fn fill(&mut self, path: &BezPath, color: Color);

    /// Stroke `path` with a solid color.
    fn stroke(&mut self, path: &BezPath, style: &StrokeStyle, color: Color);

    /// Begin an isolated layer. Must be balanced by [`Surface::pop_layer`].
    fn push_layer(&mut self, layer: Layer);

    /// Composite and close the innermost layer.
    fn pop_layer(&mut self);

    /// Draw a single line of text.
    ///
    /// Surfaces without a usable font may skip text entirely.
    fn draw_text(&mut self, run: &TextRun);
}

/// Convenience helpers for [`Surface`] implementations.
pub trait SurfaceExt: Surface {
    /// Run `f` inside a pushed layer, popping it afterwards.
    ///
    /// Note: if `f` panics, the layer will not be popped.
    #[inline]
    fn with_layer<R>(&mut self, layer: Layer, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push_layer(layer);
        let out = f(self);
        self.pop_layer();
        out
    }

    /// Run `f` inside a layer only when `layer` has a visible effect.
    #[inline]
    fn with_optional_layer<R>(&mut self, layer: Layer, f: impl FnOnce(&mut Self) -> R) -> R {
        if layer.has_effect() {
            self.with_layer(layer, f)
        } else {
            f(self)
        }
    }

    /// Run `f` with `transform` active, restoring `restore` afterwards.
    #[inline]
    fn with_transform<R>(
        &mut self,
        transform: Affine,
        restore: Affine,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.set_transform(transform);
        let out = f(self);
        self.set_transform(restore);
        out
    }
}

impl<S: Surface + ?Sized> SurfaceExt for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use peniko::color::palette;

    #[test]
    fn layers_without_effect_are_detected() {
        assert!(!Layer::default().has_effect());
        assert!(!Layer::opacity(1.0).has_effect());
        assert!(Layer::opacity(0.4).has_effect());
        assert!(
            Layer::shadow(Shadow {
                dx: 0.0,
                dy: 2.0,
                blur: 10.0,
                color: palette::css::BLACK,
            })
            .has_effect()
        );
    }

    #[test]
    fn optional_layer_skips_noop_groups() {
        let mut s = RecordingSurface::default();
        s.with_optional_layer(Layer::opacity(1.0), |s| {
            s.fill(&BezPath::new(), palette::css::RED);
        });
        assert_eq!(s.commands().len(), 1);
        s.with_optional_layer(Layer::opacity(0.5), |s| {
            s.fill(&BezPath::new(), palette::css::RED);
        });
        assert_eq!(s.commands().len(), 4);
        assert_eq!(s.max_layer_depth(), 1);
    }
}
