// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_animation::AnimationConfig;
use arbor_events::InteractionConfig;
use arbor_layout::LayoutConfig;
use arbor_tree::{ParseError, ThemeRegistry};
use arbor_view::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};
use kurbo::Size;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Padding, in screen pixels, kept around the content by
/// [`MindMap::fit_view`](crate::MindMap::fit_view).
pub const FIT_PADDING: f64 = 50.0;

/// Everything a [`MindMap`](crate::MindMap) is built from.
///
/// Every field has a default, so JSON configs only name what they change:
///
/// ```
/// use arbor::MindMapConfig;
/// use arbor_layout::LayoutKind;
///
/// let config = MindMapConfig::from_json(
///     r#"{ "width": 1024, "layout": { "type": "radial" }, "maxZoom": 3 }"#,
/// )
/// .unwrap();
/// assert_eq!(config.width, 1024.0);
/// assert_eq!(config.height, 600.0);
/// assert_eq!(config.layout.kind, LayoutKind::Radial);
/// assert_eq!(config.max_zoom, 3.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MindMapConfig {
    /// Viewport width in screen pixels.
    pub width: f64,
    /// Viewport height in screen pixels.
    pub height: f64,
    /// Layout strategy and spacing.
    pub layout: LayoutConfig,
    /// Id of the active theme.
    pub theme: String,
    /// Animation defaults.
    pub animation: AnimationConfig,
    /// Enabled interactions.
    pub interaction: InteractionConfig,
    /// Smallest zoom factor.
    pub min_zoom: f64,
    /// Largest zoom factor.
    pub max_zoom: f64,
    /// Fit the view to the content whenever new data is set.
    pub fit_on_data: bool,
}

impl Default for MindMapConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            layout: LayoutConfig::default(),
            theme: ThemeRegistry::DEFAULT_ID.to_owned(),
            animation: AnimationConfig::default(),
            interaction: InteractionConfig::default(),
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            fit_on_data: true,
        }
    }
}

impl MindMapConfig {
    /// Default config for a viewport of `width` by `height` pixels.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Viewport size.
    pub fn viewport(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Reject viewports and zoom limits that cannot be rendered.
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(Error::Configuration(format!(
                "viewport must be finite and non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !positive(self.min_zoom) || !positive(self.max_zoom) || self.min_zoom > self.max_zoom {
            return Err(Error::Configuration(format!(
                "zoom limits must satisfy 0 < min <= max, got [{}, {}]",
                self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(MindMapConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_viewports() {
        for (w, h) in [(0.0, 600.0), (800.0, -1.0), (f64::NAN, 600.0), (f64::INFINITY, 1.0)] {
            let err = MindMapConfig::new(w, h).validate().unwrap_err();
            assert!(matches!(err, Error::Configuration(_)), "{w}x{h}");
        }
    }

    #[test]
    fn rejects_inverted_zoom_limits() {
        let config = MindMapConfig {
            min_zoom: 2.0,
            max_zoom: 1.0,
            ..MindMapConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            MindMapConfig::from_json("{ width: }"),
            Err(ParseError::Json(_))
        ));
    }
}
