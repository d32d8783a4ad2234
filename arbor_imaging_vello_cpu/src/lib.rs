// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vello CPU–backed implementation of the Arbor drawing surface.
//!
//! [`VelloCpuSurface`] owns a sparse-strips [`vello_cpu::RenderContext`] and
//! implements [`Surface`] on top of it, so diagrams can be rasterized without
//! a GPU. Once a frame is drawn, [`VelloCpuSurface::to_rgba8`] returns
//! straight-alpha pixels and [`VelloCpuSurface::encode_png`] wraps them in a
//! PNG.
//!
//! Text is drawn as filled glyph outlines and therefore needs a font; see
//! [`VelloCpuSurface::with_font`]. Without one, text runs are skipped.
//!
//! ```rust
//! use arbor_imaging::Surface;
//! use arbor_imaging_vello_cpu::VelloCpuSurface;
//! use peniko::color::palette;
//!
//! let mut surface = VelloCpuSurface::new(4, 4).unwrap();
//! surface.clear(Some(palette::css::WHITE));
//! let pixels = surface.to_rgba8();
//! assert_eq!(pixels.len(), 4 * 4 * 4);
//! assert_eq!(&pixels[..4], &[255, 255, 255, 255]);
//! ```

use core::fmt;

use arbor_imaging::{Layer, Shadow, StrokeStyle, Surface, TextRun};
use arbor_text::{FontMetrics, FontWeight, TextMeasurer};
use kurbo::{Affine, BezPath, Cap, Join, PathEl};
use peniko::Color;
use png::{BitDepth, ColorType, Encoder};
use vello_common::filter_effects::{EdgeMode, Filter, FilterPrimitive};
use vello_cpu::kurbo::{
    Affine as CpuAffine, BezPath as CpuBezPath, Cap as CpuCap, Join as CpuJoin, Point as CpuPoint,
    Rect as CpuRect, Stroke as CpuStroke,
};
use vello_cpu::{Pixmap, RenderContext};

/// Stroke width of the outline added to bold text, as a fraction of the font size.
const FAUX_BOLD: f64 = 1.0 / 30.0;

/// Errors produced by [`VelloCpuSurface`].
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// The requested dimensions are zero or exceed what the rasterizer accepts.
    #[error("invalid surface size {width}x{height}")]
    InvalidSize {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// PNG encoding failed.
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] png::EncodingError),
}

/// CPU raster surface.
pub struct VelloCpuSurface {
    ctx: RenderContext,
    width: u16,
    height: u16,
    font: Option<FontMetrics>,
    transform: Affine,
    /// Whether each open [`Surface::push_layer`] pushed a real layer.
    stack: Vec<bool>,
}

impl fmt::Debug for VelloCpuSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VelloCpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("font", &self.font)
            .field("transform", &self.transform)
            .finish_non_exhaustive()
    }
}

impl VelloCpuSurface {
    /// Create a transparent surface of `width` by `height` pixels.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let invalid = SurfaceError::InvalidSize { width, height };
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(invalid);
        };
        if w == 0 || h == 0 {
            return Err(invalid);
        }
        Ok(Self {
            ctx: RenderContext::new(w, h),
            width: w,
            height: h,
            font: None,
            transform: Affine::IDENTITY,
            stack: Vec::new(),
        })
    }

    /// Use `font` for every text run.
    #[must_use]
    pub fn with_font(mut self, font: FontMetrics) -> Self {
        self.font = Some(font);
        self
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Rasterize everything drawn so far and return straight-alpha RGBA8
    /// pixels, row-major from the top-left corner.
    ///
    /// Layers still open are left out of the result.
    pub fn to_rgba8(&mut self) -> Vec<u8> {
        let mut pixmap = Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        let pixels = pixmap.take_unpremultiplied();
        let mut bytes = Vec::with_capacity(pixels.len() * 4);
        for p in pixels {
            bytes.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        bytes
    }

    /// Rasterize and encode as an 8-bit RGBA PNG.
    pub fn encode_png(&mut self) -> Result<Vec<u8>, SurfaceError> {
        let pixels = self.to_rgba8();
        let mut out = Vec::new();
        {
            let mut encoder = Encoder::new(&mut out, self.width(), self.height());
            encoder.set_color(ColorType::Rgba);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&pixels)?;
        }
        tracing::debug!(
            width = self.width,
            height = self.height,
            bytes = out.len(),
            "encoded PNG"
        );
        Ok(out)
    }

    fn affine_to_cpu(xf: Affine) -> CpuAffine {
        CpuAffine::new(xf.as_coeffs())
    }

    fn path_to_cpu(elements: impl IntoIterator<Item = PathEl>) -> CpuBezPath {
        let pt = |p: kurbo::Point| CpuPoint::new(p.x, p.y);
        let mut out = CpuBezPath::new();
        for el in elements {
            match el {
                PathEl::MoveTo(p) => out.move_to(pt(p)),
                PathEl::LineTo(p) => out.line_to(pt(p)),
                PathEl::QuadTo(c, p) => out.quad_to(pt(c), pt(p)),
                PathEl::CurveTo(c1, c2, p) => out.curve_to(pt(c1), pt(c2), pt(p)),
                PathEl::ClosePath => out.close_path(),
            }
        }
        out
    }

    /// Solid stroke parameters. Dashing is applied to the path beforehand.
    fn stroke_to_cpu(style: &StrokeStyle) -> CpuStroke {
        let mut stroke = CpuStroke::new(style.width);
        stroke.miter_limit = style.miter_limit;
        stroke.join = match style.join {
            Join::Bevel => CpuJoin::Bevel,
            Join::Miter => CpuJoin::Miter,
            Join::Round => CpuJoin::Round,
        };
        stroke.start_cap = match style.start_cap {
            Cap::Butt => CpuCap::Butt,
            Cap::Round => CpuCap::Round,
            Cap::Square => CpuCap::Square,
        };
        stroke.end_cap = match style.end_cap {
            Cap::Butt => CpuCap::Butt,
            Cap::Round => CpuCap::Round,
            Cap::Square => CpuCap::Square,
        };
        stroke
    }

    #[expect(clippy::cast_possible_truncation, reason = "filter parameters are f32")]
    fn shadow_to_vello(shadow: Shadow) -> Filter {
        // `vello_cpu` scales filter parameters by the layer transform, which
        // matches the user-space convention of `Shadow`.
        Filter::from_primitive(FilterPrimitive::DropShadow {
            dx: shadow.dx as f32,
            dy: shadow.dy as f32,
            std_deviation: shadow.blur as f32,
            color: shadow.color,
            edge_mode: EdgeMode::None,
        })
    }
}

impl Surface for VelloCpuSurface {
    fn clear(&mut self, color: Option<Color>) {
        self.ctx.reset();
        self.stack.clear();
        if let Some(color) = color {
            self.ctx.set_transform(CpuAffine::IDENTITY);
            self.ctx.set_paint(color);
            self.ctx.fill_rect(&CpuRect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
        self.ctx.set_transform(Self::affine_to_cpu(self.transform));
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
        self.ctx.set_transform(Self::affine_to_cpu(transform));
    }

    fn fill(&mut self, path: &BezPath, color: Color) {
        self.ctx.set_paint(color);
        self.ctx.fill_path(&Self::path_to_cpu(path.elements().iter().copied()));
    }

    fn stroke(&mut self, path: &BezPath, style: &StrokeStyle, color: Color) {
        let elements = path.elements().iter().copied();
        let path = if style.dash_pattern.is_empty() {
            Self::path_to_cpu(elements)
        } else {
            Self::path_to_cpu(kurbo::dash(elements, style.dash_offset, &style.dash_pattern))
        };
        self.ctx.set_paint(color);
        self.ctx.set_stroke(Self::stroke_to_cpu(style));
        self.ctx.stroke_path(&path);
    }

    fn push_layer(&mut self, layer: Layer) {
        let opacity = layer.opacity.filter(|o| *o < 1.0);
        let filter = layer.shadow.map(Self::shadow_to_vello);
        if opacity.is_some() || filter.is_some() {
            self.ctx.push_layer(None, None, opacity, None, filter);
            self.stack.push(true);
        } else {
            self.stack.push(false);
        }
    }

    fn pop_layer(&mut self) {
        match self.stack.pop() {
            Some(true) => self.ctx.pop_layer(),
            Some(false) => {}
            None => tracing::warn!("pop_layer with no open layer"),
        }
    }

    fn draw_text(&mut self, run: &TextRun) {
        let Some(font) = &self.font else {
            tracing::trace!(text = %run.text, "no font loaded, skipping text");
            return;
        };
        let width = font.measure(&run.text, &run.font);
        let metrics = font.line_metrics(&run.font);
        let baseline = (
            run.center.x - width / 2.0,
            run.center.y + (metrics.ascent - metrics.descent) / 2.0,
        );
        let outline = font.outline(&run.text, run.font.size);
        let glyphs = Self::path_to_cpu(outline.elements().iter().copied());

        self.ctx.set_transform(Self::affine_to_cpu(
            self.transform * Affine::translate(baseline),
        ));
        self.ctx.set_paint(run.color);
        self.ctx.fill_path(&glyphs);
        if run.font.weight == FontWeight::Bold {
            self.ctx
                .set_stroke(CpuStroke::new(run.font.size * FAUX_BOLD));
            self.ctx.stroke_path(&glyphs);
        }
        self.ctx.set_transform(Self::affine_to_cpu(self.transform));
    }
}
