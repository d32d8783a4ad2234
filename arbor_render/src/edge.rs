// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connector geometry between a parent and a child.

use arbor_tree::CurveKind;
use kurbo::{Affine, Arc, BezPath, PathEl, PathSeg, Point, Rect, Vec2};

use crate::shape::TOLERANCE;

/// Point on the boundary of `node` where a connector toward `toward` attaches.
///
/// When the horizontal distance dominates the connector leaves from the
/// middle of the left or right side, otherwise from the middle of the top or
/// bottom side. Ties go to top/bottom.
pub fn anchor(node: Rect, toward: Point) -> Point {
    let c = node.center();
    let d = toward - c;
    if d.x.abs() > d.y.abs() {
        let x = if d.x > 0.0 { node.x1 } else { node.x0 };
        Point::new(x, c.y)
    } else {
        let y = if d.y > 0.0 { node.y1 } else { node.y0 };
        Point::new(c.x, y)
    }
}

/// Connector path from `start` to `end`.
pub fn edge_path(curve: CurveKind, start: Point, end: Point) -> BezPath {
    let mut p = BezPath::new();
    p.move_to(start);
    match curve {
        CurveKind::Straight => p.line_to(end),
        CurveKind::Bezier => {
            let dx = end.x - start.x;
            p.curve_to(
                Point::new(start.x + dx * 0.5, start.y),
                Point::new(end.x - dx * 0.5, end.y),
                end,
            );
        }
        CurveKind::Polyline => {
            let mid_x = (start.x + end.x) / 2.0;
            p.line_to((mid_x, start.y));
            p.line_to((mid_x, end.y));
            p.line_to(end);
        }
        CurveKind::Arc => {
            let d = end - start;
            let dist = d.hypot();
            let corner = start + d / 2.0 - Vec2::new(0.0, dist / 4.0);
            arc_to(&mut p, start, corner, end, dist / 2.0);
            p.line_to(end);
        }
    }
    p
}

/// Append a circular arc of `radius` tangent to the lines `from → corner`
/// and `corner → to`, preceded by a line to the first tangent point.
///
/// Degenerate inputs (coincident or collinear points, zero radius) produce a
/// straight line to `corner`.
fn arc_to(path: &mut BezPath, from: Point, corner: Point, to: Point, radius: f64) {
    let (a, b) = (from - corner, to - corner);
    let (la, lb) = (a.hypot(), b.hypot());
    if la < 1e-9 || lb < 1e-9 || radius <= 0.0 {
        path.line_to(corner);
        return;
    }
    let (ua, ub) = (a / la, b / lb);
    let cos = ua.dot(ub).clamp(-1.0, 1.0);
    let theta = cos.acos();
    if theta < 1e-9 || (core::f64::consts::PI - theta) < 1e-9 {
        path.line_to(corner);
        return;
    }
    let half = theta / 2.0;
    let tangent = radius / half.tan();
    let t1 = corner + ua * tangent;
    let t2 = corner + ub * tangent;
    let bisector = (ua + ub).normalize();
    let center = corner + bisector * (radius / half.sin());

    let (r1, r2) = (t1 - center, t2 - center);
    let sweep = r1.cross(r2).atan2(r1.dot(r2));
    path.line_to(t1);
    let arc = Arc::new(center, (radius, radius), r1.atan2(), sweep, 0.0);
    path.extend(arc.append_iter(TOLERANCE));
}

/// Direction `path` is heading where it ends.
///
/// Read from the last segment, skipping control points that sit on the end
/// point, then from the chord back to the path's start. `None` when the path
/// has no extent.
pub fn end_tangent(path: &BezPath) -> Option<Vec2> {
    let (end, back) = match path.segments().last()? {
        PathSeg::Line(l) => (l.p1, [l.p0; 3]),
        PathSeg::Quad(q) => (q.p2, [q.p1, q.p0, q.p0]),
        PathSeg::Cubic(c) => (c.p3, [c.p2, c.p1, c.p0]),
    };
    let start = match path.elements().first() {
        Some(PathEl::MoveTo(p)) => Some(*p),
        _ => None,
    };
    back.into_iter()
        .chain(start)
        .map(|p| end - p)
        .find(|d| d.hypot() > 1e-9)
}

/// Filled triangle with its tip on the end of `path`, pointing along the
/// path's [`end_tangent`].
///
/// `size` is the triangle's length; its base is half as wide.
pub fn arrow_head(path: &BezPath, size: f64) -> Option<BezPath> {
    let end = path.elements().last()?.end_point()?;
    let angle = end_tangent(path)?.atan2();
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((-size, -size / 2.0));
    p.line_to((-size, size / 2.0));
    p.close_path();
    p.apply_affine(Affine::translate(end.to_vec2()) * Affine::rotate(angle));
    Some(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Shape;

    fn approx(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-6
    }

    #[test]
    fn anchor_picks_side_by_dominant_axis() {
        let r = Rect::from_center_size((0.0, 0.0), (100.0, 40.0));
        assert_eq!(anchor(r, Point::new(300.0, 10.0)), Point::new(50.0, 0.0));
        assert_eq!(anchor(r, Point::new(-300.0, 10.0)), Point::new(-50.0, 0.0));
        assert_eq!(anchor(r, Point::new(10.0, 300.0)), Point::new(0.0, 20.0));
        assert_eq!(anchor(r, Point::new(10.0, -300.0)), Point::new(0.0, -20.0));
    }

    #[test]
    fn bezier_controls_are_horizontal() {
        let p = edge_path(CurveKind::Bezier, Point::new(0.0, 0.0), Point::new(100.0, 50.0));
        assert_eq!(
            p.elements()[1],
            PathEl::CurveTo(
                Point::new(50.0, 0.0),
                Point::new(50.0, 50.0),
                Point::new(100.0, 50.0)
            )
        );
    }

    #[test]
    fn polyline_turns_at_mid_x() {
        let p = edge_path(CurveKind::Polyline, Point::new(0.0, 0.0), Point::new(100.0, 50.0));
        assert_eq!(p.elements()[1], PathEl::LineTo(Point::new(50.0, 0.0)));
        assert_eq!(p.elements()[2], PathEl::LineTo(Point::new(50.0, 50.0)));
    }

    #[test]
    fn every_curve_joins_the_anchors() {
        let (s, e) = (Point::new(10.0, 20.0), Point::new(210.0, 120.0));
        for curve in [
            CurveKind::Straight,
            CurveKind::Bezier,
            CurveKind::Polyline,
            CurveKind::Arc,
        ] {
            let p = edge_path(curve, s, e);
            let els = p.elements();
            assert_eq!(els[0], PathEl::MoveTo(s), "{curve:?}");
            let last = els.last().and_then(PathEl::end_point);
            assert!(last.is_some_and(|l| approx(l, e)), "{curve:?} ends at {last:?}");
        }
    }

    #[test]
    fn arc_bulges_upward() {
        let p = edge_path(CurveKind::Arc, Point::new(0.0, 0.0), Point::new(200.0, 0.0));
        assert!(p.bounding_box().y0 < -1.0);
    }

    #[test]
    fn arrow_tip_sits_on_the_end_point() {
        let tip = Point::new(100.0, 100.0);
        let head = arrow_head(&edge_path(CurveKind::Straight, Point::new(0.0, 100.0), tip), 8.0)
            .unwrap();
        assert!(approx(head.elements()[0].end_point().unwrap_or_default(), tip));
        let bbox = head.bounding_box();
        assert!((bbox.x0 - 92.0).abs() < 1e-6 && (bbox.height() - 8.0).abs() < 1e-6);
    }

    fn heading(curve: CurveKind, start: Point, end: Point) -> f64 {
        end_tangent(&edge_path(curve, start, end)).unwrap().atan2()
    }

    #[test]
    fn arrows_follow_the_curve_not_the_chord() {
        let (s, e) = (Point::new(0.0, 0.0), Point::new(100.0, 50.0));
        let chord = (e - s).atan2();
        assert!((heading(CurveKind::Straight, s, e) - chord).abs() < 1e-9);
        assert!(heading(CurveKind::Bezier, s, e).abs() < 1e-9);
        assert!(heading(CurveKind::Polyline, s, e).abs() < 1e-9);

        // The arc meets its end along the line from its bulge corner.
        let (s, e) = (Point::new(0.0, 0.0), Point::new(200.0, 0.0));
        assert!((heading(CurveKind::Arc, s, e) - 0.5_f64.atan()).abs() < 1e-6);
    }

    #[test]
    fn arrow_head_is_rotated_to_the_end_tangent() {
        let path = edge_path(CurveKind::Bezier, Point::new(0.0, 0.0), Point::new(100.0, 50.0));
        let bbox = arrow_head(&path, 8.0).unwrap().bounding_box();
        assert!((bbox.x0 - 92.0).abs() < 1e-6 && (bbox.x1 - 100.0).abs() < 1e-6);
        assert!((bbox.height() - 8.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_paths_have_no_arrow() {
        let p = Point::new(5.0, 5.0);
        assert!(arrow_head(&edge_path(CurveKind::Straight, p, p), 8.0).is_none());
        assert!(arrow_head(&BezPath::new(), 8.0).is_none());
    }
}
