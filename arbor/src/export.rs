// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::str::FromStr;

use arbor_render::EXPORT_PIXEL_RATIO;
use arbor_tree::Node;
use peniko::Color;

use crate::error::Error;

/// Output formats of [`MindMap::export`](crate::MindMap::export).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// PNG image of the visible tree.
    Png,
    /// The tree as pretty-printed JSON, metadata included.
    Json,
    /// The tree as a nested bullet list.
    Markdown,
}

impl ExportFormat {
    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Json => "json",
            Self::Markdown => "markdown",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    /// Accepts the canonical names plus `image` and `md`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" | "image" => Ok(Self::Png),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(Error::UnsupportedFormat(s.to_owned())),
        }
    }
}

/// What to export and how.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportRequest {
    /// Output format.
    pub format: ExportFormat,
    /// Device pixels per world unit, for images.
    pub pixel_ratio: f64,
    /// Image background. Defaults to the theme background, then white.
    pub background: Option<Color>,
    /// Encoder quality in `0.0..=1.0`.
    ///
    /// Checked for range, then ignored: PNG is lossless and the text formats
    /// have no quality setting.
    pub quality: f64,
}

impl ExportRequest {
    /// Request `format` at the default pixel ratio.
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            pixel_ratio: EXPORT_PIXEL_RATIO,
            background: None,
            quality: 1.0,
        }
    }

    /// Request a format by name.
    ///
    /// ```
    /// use arbor::{Error, ExportFormat, ExportRequest};
    ///
    /// assert_eq!(ExportRequest::parse("md").unwrap().format, ExportFormat::Markdown);
    /// assert!(matches!(ExportRequest::parse("svg"), Err(Error::UnsupportedFormat(_))));
    /// ```
    pub fn parse(format: &str) -> Result<Self, Error> {
        format.parse().map(Self::new)
    }

    /// Use `pixel_ratio` device pixels per world unit.
    #[must_use]
    pub fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// Ask for encoder quality `quality`.
    #[must_use]
    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = quality;
        self
    }

    /// Paint the image over `background`.
    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }
}

/// Flatten `root` into a bullet list, two spaces of indent per level.
///
/// Collapsed subtrees are included.
///
/// ```
/// use arbor::to_markdown;
/// use arbor_tree::Node;
///
/// let root = Node::new("r", "Plan").with_child(Node::new("a", "Research"));
/// assert_eq!(to_markdown(&root), "- Plan\n  - Research\n");
/// ```
pub fn to_markdown(root: &Node) -> String {
    let mut out = String::new();
    root.walk(&mut |node, depth| {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str("- ");
        out.push_str(&node.label);
        out.push('\n');
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_are_case_insensitive() {
        assert_eq!("PNG".parse::<ExportFormat>().unwrap(), ExportFormat::Png);
        assert_eq!("Json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
    }

    #[test]
    fn unknown_format_keeps_its_name() {
        match "pdf".parse::<ExportFormat>() {
            Err(Error::UnsupportedFormat(name)) => assert_eq!(name, "pdf"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn requests_default_to_full_quality() {
        let request = ExportRequest::parse("image").unwrap();
        assert_eq!(request.quality, 1.0);
        assert_eq!(request.with_quality(0.4).quality, 0.4);
    }

    #[test]
    fn markdown_follows_pre_order() {
        let mut root = Node::new("r", "R")
            .with_child(Node::new("a", "A").with_child(Node::new("a1", "A1")))
            .with_child(Node::new("b", "B"));
        root.children[0].collapsed = true;
        assert_eq!(to_markdown(&root), "- R\n  - A\n    - A1\n  - B\n");
    }
}
