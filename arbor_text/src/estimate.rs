// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use unicode_width::UnicodeWidthChar;

use crate::{FontSpec, FontWeight, TextMeasurer};

/// Advance of a single-column character, as a fraction of the font size.
const NARROW_ADVANCE: f64 = 0.55;
/// Advance of a double-column (East Asian wide) character.
const WIDE_ADVANCE: f64 = 1.0;
/// Widening applied to bold runs.
const BOLD_FACTOR: f64 = 1.05;

/// Font-free measurer based on Unicode display width.
///
/// Results depend only on the text and the font size and weight, never on
/// the platform, which makes layouts reproducible.
#[derive(Clone, Copy, Debug, Default)]
pub struct EstimatedMetrics;

impl TextMeasurer for EstimatedMetrics {
    fn measure(&self, text: &str, font: &FontSpec) -> f64 {
        let ems: f64 = text
            .chars()
            .map(|ch| match ch.width() {
                Some(2) => WIDE_ADVANCE,
                Some(0) | None => 0.0,
                Some(_) => NARROW_ADVANCE,
            })
            .sum();
        let width = ems * font.size;
        match font.weight {
            FontWeight::Normal => width,
            FontWeight::Bold => width * BOLD_FACTOR,
        }
    }
}
