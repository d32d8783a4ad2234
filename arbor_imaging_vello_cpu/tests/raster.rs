// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel-level checks for `VelloCpuSurface`.

use arbor_imaging::{Layer, Surface, SurfaceExt};
use arbor_imaging_vello_cpu::{SurfaceError, VelloCpuSurface};
use kurbo::{Affine, Rect, Shape};
use peniko::color::palette;

fn pixel(pixels: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * width + x) * 4) as usize;
    [pixels[i], pixels[i + 1], pixels[i + 2], pixels[i + 3]]
}

#[test]
fn zero_or_oversized_dimensions_are_rejected() {
    assert!(matches!(
        VelloCpuSurface::new(0, 10),
        Err(SurfaceError::InvalidSize { width: 0, .. })
    ));
    assert!(VelloCpuSurface::new(70_000, 10).is_err());
}

#[test]
fn fill_respects_transform() {
    let mut s = VelloCpuSurface::new(20, 20).unwrap();
    s.clear(Some(palette::css::WHITE));
    s.set_transform(Affine::translate((10.0, 10.0)));
    s.fill(
        &Rect::new(0.0, 0.0, 10.0, 10.0).to_path(0.1),
        palette::css::BLUE,
    );
    let px = s.to_rgba8();
    assert_eq!(pixel(&px, 20, 15, 15), [0, 0, 255, 255]);
    assert_eq!(pixel(&px, 20, 5, 5), [255, 255, 255, 255]);
}

#[test]
fn opacity_layer_blends_with_background() {
    let mut s = VelloCpuSurface::new(8, 8).unwrap();
    s.clear(Some(palette::css::WHITE));
    s.with_layer(Layer::opacity(0.5), |s| {
        s.fill(&Rect::new(0.0, 0.0, 8.0, 8.0).to_path(0.1), palette::css::BLACK);
    });
    let [r, g, b, a] = pixel(&s.to_rgba8(), 8, 4, 4);
    assert_eq!(a, 255);
    assert!((120..=136).contains(&r), "expected mid gray, got {r}");
    assert_eq!((r, g), (g, b));
}

#[test]
fn text_without_font_draws_nothing() {
    let mut s = VelloCpuSurface::new(8, 8).unwrap();
    s.draw_text(&arbor_imaging::TextRun {
        text: "x".into(),
        font: arbor_text::FontSpec::new("Arial", 12.0),
        center: kurbo::Point::new(4.0, 4.0),
        color: palette::css::BLACK,
    });
    assert!(s.to_rgba8().iter().all(|b| *b == 0));
}

#[test]
fn png_output_has_signature() {
    let mut s = VelloCpuSurface::new(3, 2).unwrap();
    s.clear(Some(palette::css::RED));
    let png = s.encode_png().unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}
