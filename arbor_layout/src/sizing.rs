// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_text::TextMeasurer;
use arbor_tree::{Node, ResolvedStyle, Theme};
use kurbo::Size;

/// Smallest width a node is given.
pub const MIN_NODE_WIDTH: f64 = 60.0;
/// Smallest height a node is given.
pub const MIN_NODE_HEIGHT: f64 = 30.0;

/// Extent of a node showing `label` in `style`.
///
/// The label is measured on one line. Height allows one and a half font
/// sizes of line box. Both dimensions include padding and are clamped to
/// [`MIN_NODE_WIDTH`] and [`MIN_NODE_HEIGHT`].
pub fn node_size(label: &str, style: &ResolvedStyle, measurer: &dyn TextMeasurer) -> Size {
    let text_width = measurer.measure(label, &style.font());
    Size::new(
        (text_width + style.padding.horizontal()).max(MIN_NODE_WIDTH),
        (style.font_size * 1.5 + style.padding.vertical()).max(MIN_NODE_HEIGHT),
    )
}

/// Resolves styles and writes measured sizes onto nodes.
pub(crate) struct Sizer<'a> {
    pub(crate) theme: &'a Theme,
    pub(crate) measurer: &'a dyn TextMeasurer,
}

impl Sizer<'_> {
    pub(crate) fn apply(&self, node: &mut Node, depth: usize) -> Size {
        let style = self.theme.resolve(node.style.as_ref(), depth);
        let size = node_size(&node.label, &style, self.measurer);
        node.set_size(size);
        size
    }

    /// Size every node not hidden by a collapsed ancestor.
    pub(crate) fn apply_visible(&self, node: &mut Node, depth: usize) {
        self.apply(node, depth);
        for child in node.visible_children_mut() {
            self.apply_visible(child, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use arbor_text::{EstimatedMetrics, FontSpec};
    use arbor_tree::{NodeStyle, Padding};

    use super::*;

    struct PerChar(f64);

    impl TextMeasurer for PerChar {
        fn measure(&self, text: &str, _font: &FontSpec) -> f64 {
            text.chars().count() as f64 * self.0
        }
    }

    #[test]
    fn size_is_text_plus_padding() {
        let style = ResolvedStyle::default();
        let size = node_size("abcdefghij", &style, &PerChar(10.0));
        // 100 text + 16 + 16 padding; 14 * 1.5 + 8 + 8.
        assert_eq!(size, Size::new(132.0, 37.0));
    }

    #[test]
    fn size_is_clamped_to_minimums() {
        let style = NodeStyle {
            padding: Some(Padding::Uniform(0.0)),
            font_size: Some(8.0),
            ..NodeStyle::default()
        }
        .resolve();
        let size = node_size("", &style, &EstimatedMetrics);
        assert_eq!(size, Size::new(MIN_NODE_WIDTH, MIN_NODE_HEIGHT));
    }

    #[test]
    fn four_sided_padding_is_respected() {
        let style = NodeStyle {
            padding: Some(Padding::Sides([1.0, 30.0, 2.0, 40.0])),
            font_size: Some(40.0),
            ..NodeStyle::default()
        }
        .resolve();
        let size = node_size("x", &style, &PerChar(5.0));
        assert_eq!(size, Size::new(75.0, 63.0));
    }
}
