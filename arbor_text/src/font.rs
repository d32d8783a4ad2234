// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use std::sync::Arc;

use kurbo::{BezPath, Point};
use skrifa::instance::{LocationRef, Size};
use skrifa::metrics::GlyphMetrics;
use skrifa::outline::OutlinePen;
use skrifa::raw::ReadError;
use skrifa::{FontRef, GlyphId, MetadataProvider};

use crate::{FontSpec, LineMetrics, TextMeasurer};

/// Fallback advance for glyphs without horizontal metrics.
const MISSING_ADVANCE: f32 = 0.6;

/// Errors produced while loading font data.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// The bytes are not a readable font, or the collection index is out of range.
    #[error("failed to read font data: {0}")]
    Read(ReadError),
}

/// Measurer backed by a single font face.
///
/// The face is used for every [`FontSpec`], whatever its family or weight;
/// only the size is honored.
#[derive(Clone)]
pub struct FontMetrics {
    data: Arc<[u8]>,
    index: u32,
}

impl fmt::Debug for FontMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontMetrics")
            .field("bytes", &self.data.len())
            .field("index", &self.index)
            .finish()
    }
}

impl FontMetrics {
    /// Load face `index` from `data`.
    pub fn new(data: impl Into<Arc<[u8]>>, index: u32) -> Result<Self, FontError> {
        let data = data.into();
        FontRef::from_index(&data, index).map_err(FontError::Read)?;
        Ok(Self { data, index })
    }

    fn font(&self) -> Option<FontRef<'_>> {
        FontRef::from_index(&self.data, self.index).ok()
    }

    /// Glyph ids and pen positions for `text` laid out on a single line.
    fn layout(&self, font: &FontRef<'_>, text: &str, size: f32) -> (Vec<(GlyphId, f32)>, f32) {
        let charmap = font.charmap();
        let metrics = GlyphMetrics::new(font, Size::new(size), LocationRef::default());
        let mut x = 0.0_f32;
        let mut placed = Vec::with_capacity(text.len());
        for gid in text.chars().filter_map(|ch| charmap.map(ch)) {
            placed.push((gid, x));
            x += metrics
                .advance_width(gid)
                .unwrap_or(size * MISSING_ADVANCE);
        }
        (placed, x)
    }

    /// Outline of `text` at `size` pixels.
    ///
    /// The run starts at the origin with its baseline on `y = 0`; y grows
    /// downward, so glyph bodies extend into negative y.
    pub fn outline(&self, text: &str, size: f64) -> BezPath {
        let mut pen = PathPen::default();
        let Some(font) = self.font() else {
            return pen.path;
        };
        #[expect(clippy::cast_possible_truncation, reason = "font sizes fit in f32")]
        let size = size as f32;
        let outlines = font.outline_glyphs();
        let (placed, _) = self.layout(&font, text, size);
        for (gid, x) in placed {
            let Some(glyph) = outlines.get(gid) else {
                continue;
            };
            pen.origin_x = f64::from(x);
            // A glyph that fails to draw is left out of the run.
            let _ = glyph.draw(Size::new(size), &mut pen);
        }
        pen.path
    }
}

impl TextMeasurer for FontMetrics {
    fn measure(&self, text: &str, font: &FontSpec) -> f64 {
        let Some(face) = self.font() else {
            return 0.0;
        };
        #[expect(clippy::cast_possible_truncation, reason = "font sizes fit in f32")]
        let size = font.size as f32;
        f64::from(self.layout(&face, text, size).1)
    }

    fn line_metrics(&self, font: &FontSpec) -> LineMetrics {
        let Some(face) = self.font() else {
            return LineMetrics {
                ascent: font.size * 0.8,
                descent: font.size * 0.2,
            };
        };
        #[expect(clippy::cast_possible_truncation, reason = "font sizes fit in f32")]
        let metrics = face.metrics(Size::new(font.size as f32), LocationRef::default());
        LineMetrics {
            ascent: f64::from(metrics.ascent),
            descent: f64::from(-metrics.descent),
        }
    }
}

/// Collects Skrifa outline commands into a y-down [`BezPath`].
#[derive(Default)]
struct PathPen {
    path: BezPath,
    origin_x: f64,
}

impl PathPen {
    fn map(&self, x: f32, y: f32) -> Point {
        Point::new(self.origin_x + f64::from(x), -f64::from(y))
    }
}

impl OutlinePen for PathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (c, p) = (self.map(x1, y1), self.map(x, y));
        self.path.quad_to(c, p);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (c1, c2, p) = (self.map(x1, y1), self.map(x2, y2), self.map(x, y));
        self.path.curve_to(c1, c2, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
