// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Text: measurement and wrapping for diagram labels.
//!
//! Diagram nodes size themselves around their labels, and renderers wrap
//! those labels inside the node interior. Both need the same notion of how
//! wide a run of text is, so this crate centralizes it behind
//! [`TextMeasurer`].
//!
//! Two measurers are provided:
//! - [`EstimatedMetrics`] needs no font data. It derives advances from the
//!   Unicode display width of each character, which keeps layout stable and
//!   deterministic in tests and headless environments.
//! - [`FontMetrics`] reads real advances from a TrueType/OpenType font using
//!   Skrifa and can also produce glyph outlines as [`kurbo::BezPath`] for
//!   raster backends.
//!
//! ```rust
//! use arbor_text::{EstimatedMetrics, FontSpec, TextMeasurer, wrap_text};
//!
//! let font = FontSpec::new("Arial", 14.0);
//! let measurer = EstimatedMetrics;
//! assert!(measurer.measure("hello", &font) > 0.0);
//!
//! let lines = wrap_text("a fairly long label", 40.0, &font, &measurer);
//! assert!(lines.len() > 1);
//! ```
//!
//! No shaping is performed. Labels are laid out one character at a time,
//! which is adequate for the short strings diagrams carry.

mod estimate;
mod font;
mod wrap;

pub use estimate::EstimatedMetrics;
pub use font::{FontError, FontMetrics};
pub use wrap::wrap_text;

use serde::{Deserialize, Serialize};

/// Font weight used when measuring and drawing a label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

/// Description of the font a label is set in.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    /// Family name. Measurers that carry a single face ignore it.
    pub family: String,
    /// Font size in pixels.
    pub size: f64,
    /// Font weight.
    pub weight: FontWeight,
}

impl FontSpec {
    /// Create a normal-weight font description.
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            weight: FontWeight::Normal,
        }
    }

    /// Return this font with the given weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }
}

/// Vertical extent of a line of text, relative to its baseline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    /// Distance from the baseline to the top of the line (positive).
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the line (positive).
    pub descent: f64,
}

/// Measures single-line text runs.
pub trait TextMeasurer {
    /// Advance width of `text` set in `font`, in pixels.
    fn measure(&self, text: &str, font: &FontSpec) -> f64;

    /// Ascent and descent for `font`.
    ///
    /// The default splits the font size 80/20 around the baseline.
    fn line_metrics(&self, font: &FontSpec) -> LineMetrics {
        LineMetrics {
            ascent: font.size * 0.8,
            descent: font.size * 0.2,
        }
    }
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    fn measure(&self, text: &str, font: &FontSpec) -> f64 {
        (**self).measure(text, font)
    }

    fn line_metrics(&self, font: &FontSpec) -> LineMetrics {
        (**self).line_metrics(font)
    }
}
