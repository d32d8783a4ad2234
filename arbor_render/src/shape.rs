// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outlines for the node shapes.

use arbor_tree::Shape;
use kurbo::{BezPath, Circle, Ellipse, Rect, Shape as _};

/// Flattening tolerance for curved outlines, in world units.
pub(crate) const TOLERANCE: f64 = 0.1;

/// Outline of `shape` inscribed in `rect`.
///
/// `radius` is only used by [`Shape::Rounded`]; it is clamped to half the
/// shorter side.
pub fn shape_path(shape: Shape, rect: Rect, radius: f64) -> BezPath {
    match shape {
        Shape::Rect => rect.to_path(TOLERANCE),
        Shape::Rounded => rounded(rect, radius),
        Shape::Circle => {
            let r = rect.width().min(rect.height()) / 2.0;
            Circle::new(rect.center(), r).to_path(TOLERANCE)
        }
        Shape::Ellipse => Ellipse::from_rect(rect).to_path(TOLERANCE),
        Shape::Diamond => {
            let c = rect.center();
            let mut p = BezPath::new();
            p.move_to((c.x, rect.y0));
            p.line_to((rect.x1, c.y));
            p.line_to((c.x, rect.y1));
            p.line_to((rect.x0, c.y));
            p.close_path();
            p
        }
        Shape::Hexagon => {
            let inset = rect.width() / 4.0;
            let cy = rect.center().y;
            let mut p = BezPath::new();
            p.move_to((rect.x0 + inset, rect.y0));
            p.line_to((rect.x1 - inset, rect.y0));
            p.line_to((rect.x1, cy));
            p.line_to((rect.x1 - inset, rect.y1));
            p.line_to((rect.x0 + inset, rect.y1));
            p.line_to((rect.x0, cy));
            p.close_path();
            p
        }
    }
}

/// Rectangle with quadratic corners.
fn rounded(rect: Rect, radius: f64) -> BezPath {
    let r = radius.clamp(0.0, rect.width().min(rect.height()) / 2.0);
    let Rect { x0, y0, x1, y1 } = rect;
    let mut p = BezPath::new();
    p.move_to((x0 + r, y0));
    p.line_to((x1 - r, y0));
    p.quad_to((x1, y0), (x1, y0 + r));
    p.line_to((x1, y1 - r));
    p.quad_to((x1, y1), (x1 - r, y1));
    p.line_to((x0 + r, y1));
    p.quad_to((x0, y1), (x0, y1 - r));
    p.line_to((x0, y0 + r));
    p.quad_to((x0, y0), (x0 + r, y0));
    p.close_path();
    p
}
