// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Concentric placement around the root.

use core::f64::consts::{FRAC_PI_2, PI, TAU};

use arbor_tree::Node;
use kurbo::{Point, Size, Vec2};

use crate::sizing::Sizer;

/// Radius of the first ring for a root of `size` with `count` children.
pub fn first_ring_radius(size: Size, count: usize) -> f64 {
    let base = 150.0 + size.width.max(size.height) / 2.0;
    base * (1.0 + (count as f64 * 0.15).min(1.5))
}

/// Extra radius a node of `size` with `count` children adds for its subtree.
pub fn ring_increment(size: Size, count: usize) -> f64 {
    (120.0 + size.width.max(size.height)) * (1.0 + (count as f64 * 0.1).min(0.8))
}

/// Angular slot given to the children of a node at `depth`.
pub fn sector_width(depth: usize, count: usize) -> f64 {
    PI / depth.max(2) as f64 * (1.0 + (count as f64 * 0.05).min(0.5))
}

pub(crate) fn radial(root: &mut Node, sizer: &Sizer<'_>) {
    let root_size = sizer.apply(root, 0);
    root.set_position(Point::ORIGIN);

    let children = root.visible_children_mut();
    let count = children.len();
    if count == 0 {
        return;
    }
    let radius = first_ring_radius(root_size, count);
    let step = TAU / count as f64;
    for (i, child) in children.iter_mut().enumerate() {
        let angle = i as f64 * step - FRAC_PI_2;
        let size = sizer.apply(child, 1);
        child.set_position(Point::ORIGIN + Vec2::from_angle(angle) * radius);
        let grandchildren = child.visible_children().len();
        if grandchildren > 0 {
            let next = radius + ring_increment(size, grandchildren);
            fan_out(child, angle, next, 2, sizer);
        }
    }
}

/// Spread the children of `parent` over a sector centered on `angle`, at
/// `radius` from the parent's center.
fn fan_out(parent: &mut Node, angle: f64, radius: f64, depth: usize, sizer: &Sizer<'_>) {
    let origin = parent.position().unwrap_or(Point::ORIGIN);
    let children = parent.visible_children_mut();
    let count = children.len();
    let sector = sector_width(depth, count);
    let step = if count > 1 {
        sector / (count - 1) as f64
    } else {
        0.0
    };
    let start = angle - step * count.saturating_sub(1) as f64 / 2.0;
    for (i, child) in children.iter_mut().enumerate() {
        let child_angle = start + i as f64 * step;
        let size = sizer.apply(child, depth);
        child.set_position(origin + Vec2::from_angle(child_angle) * radius);
        let grandchildren = child.visible_children().len();
        if grandchildren > 0 {
            let next = radius + ring_increment(size, grandchildren);
            fan_out(child, child_angle, next, depth + 1, sizer);
        }
    }
}
