// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSS color strings for serde.
//!
//! Colors are read with [`peniko::color::parse_color`], so any CSS color
//! syntax is accepted, and written back as `#rrggbbaa`.

use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

/// Parse a CSS color string.
pub fn parse_css(text: &str) -> Option<Color> {
    parse_color(text)
        .ok()
        .map(|c| c.to_alpha_color::<Srgb>())
}

/// Format a color as `#rrggbbaa`.
pub fn to_hex(color: Color) -> String {
    let c = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
}

fn de_str<'de, D: Deserializer<'de>>(text: &str) -> Result<Color, D::Error> {
    parse_css(text).ok_or_else(|| D::Error::custom(format!("invalid color `{text}`")))
}

pub(crate) mod css {
    use super::*;

    pub(crate) fn serialize<S: Serializer>(color: &Color, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&to_hex(*color))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Color, D::Error> {
        let text = String::deserialize(d)?;
        de_str::<D>(&text)
    }
}

pub(crate) mod css_opt {
    use super::*;

    pub(crate) fn serialize<S: Serializer>(color: &Option<Color>, s: S) -> Result<S::Ok, S::Error> {
        match color {
            Some(c) => s.serialize_some(&to_hex(*c)),
            None => s.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Color>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|text| de_str::<D>(&text))
            .transpose()
    }
}

pub(crate) mod css_vec {
    use serde::ser::SerializeSeq;

    use super::*;

    pub(crate) fn serialize<S: Serializer>(colors: &[Color], s: S) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(colors.len()))?;
        for c in colors {
            seq.serialize_element(&to_hex(*c))?;
        }
        seq.end()
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Color>, D::Error> {
        Vec::<String>::deserialize(d)?
            .iter()
            .map(|text| de_str::<D>(text))
            .collect()
    }
}
