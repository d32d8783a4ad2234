// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{FontSpec, TextMeasurer};

/// Break `text` into lines no wider than `max_width`.
///
/// Characters are appended greedily; a line is closed as soon as the next
/// character would push it past `max_width`. Every line receives at least
/// one character, so a single glyph wider than `max_width` still occupies
/// its own line. Explicit newlines always break.
///
/// Empty input yields a single empty line.
pub fn wrap_text(
    text: &str,
    max_width: f64,
    font: &FontSpec,
    measurer: &(impl TextMeasurer + ?Sized),
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for ch in paragraph.chars() {
            let mut candidate = line.clone();
            candidate.push(ch);
            if !line.is_empty() && measurer.measure(&candidate, font) > max_width {
                lines.push(core::mem::take(&mut line));
                line.push(ch);
            } else {
                line = candidate;
            }
        }
        lines.push(line);
    }
    lines
}
