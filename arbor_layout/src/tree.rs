// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directional and two-sided tree placement.
//!
//! Both strategies run in two passes. [`measure`] sizes every visible node
//! and records, bottom-up, how much room each subtree reserves across the
//! level axis. [`place`] then walks top-down, centering each sibling group
//! on its parent and stacking the reserved spans with `node_spacing` gaps.

use arbor_tree::Node;
use kurbo::{Point, Size};

use crate::config::{Direction, LayoutConfig};
use crate::sizing::Sizer;

/// Anti-crowding coefficient for directional trees.
pub const TREE_CROWDING: f64 = 3.0;
/// Anti-crowding coefficient for mindmap branches.
pub const MINDMAP_CROWDING: f64 = 4.0;

/// Axis along which levels advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn along(self, s: Size) -> f64 {
        match self {
            Self::Horizontal => s.width,
            Self::Vertical => s.height,
        }
    }

    fn across(self, s: Size) -> f64 {
        match self {
            Self::Horizontal => s.height,
            Self::Vertical => s.width,
        }
    }

    fn point(self, level: f64, cross: f64) -> Point {
        match self {
            Self::Horizontal => Point::new(level, cross),
            Self::Vertical => Point::new(cross, level),
        }
    }
}

impl Direction {
    pub(crate) fn axis(self) -> Axis {
        match self {
            Self::Right | Self::Left => Axis::Horizontal,
            Self::Down | Self::Up => Axis::Vertical,
        }
    }

    pub(crate) fn sign(self) -> f64 {
        match self {
            Self::Right | Self::Down => 1.0,
            Self::Left | Self::Up => -1.0,
        }
    }
}

/// Room reserved by one subtree.
#[derive(Debug)]
pub(crate) struct Span {
    /// Extent across the level axis, including the trailing sibling gap.
    reserved: f64,
    /// Node extent along the level axis.
    along: f64,
    children: Vec<Self>,
}

/// Total extent of a sibling group: reserved spans plus the gaps between them.
fn group_extent<'a>(spans: impl IntoIterator<Item = &'a Span>, spacing: f64) -> f64 {
    let (sum, n) = spans
        .into_iter()
        .fold((0.0, 0_usize), |(sum, n), s| (sum + s.reserved, n + 1));
    if n == 0 {
        0.0
    } else {
        sum + (n - 1) as f64 * spacing
    }
}

/// Size `node` and its visible descendants, returning reserved spans.
pub(crate) fn measure(
    node: &mut Node,
    depth: usize,
    axis: Axis,
    spacing: f64,
    sizer: &Sizer<'_>,
) -> Span {
    let size = sizer.apply(node, depth);
    let children: Vec<Span> = node
        .visible_children_mut()
        .iter_mut()
        .map(|c| measure(c, depth + 1, axis, spacing, sizer))
        .collect();
    let reserved = (axis.across(size) + spacing).max(group_extent(&children, spacing));
    Span {
        reserved,
        along: axis.along(size),
        children,
    }
}

/// How a branch grows away from its root.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Branch {
    pub(crate) axis: Axis,
    pub(crate) sign: f64,
    pub(crate) crowding: f64,
    pub(crate) node_spacing: f64,
    pub(crate) level_spacing: f64,
}

/// Position a sibling group.
///
/// `center` is the cross-axis coordinate the group is centered on and
/// `level` the unsigned distance of the group from the root along the level
/// axis. Siblings fanning far from their parent are pushed outward by
/// `sqrt(max cross distance) * crowding`.
pub(crate) fn place(group: &mut [(&mut Node, &Span)], center: f64, level: f64, branch: &Branch) {
    if group.is_empty() {
        return;
    }
    let total = group_extent(group.iter().map(|(_, s)| *s), branch.node_spacing);
    let mut cursor = center - total / 2.0;
    let mut offsets = Vec::with_capacity(group.len());
    for (_, span) in group.iter() {
        offsets.push(cursor + span.reserved / 2.0);
        cursor += span.reserved + branch.node_spacing;
    }

    let spread = offsets
        .iter()
        .map(|o| (o - center).abs())
        .fold(0.0_f64, f64::max);
    let level = level + spread.sqrt() * branch.crowding;
    let max_along = group.iter().map(|(_, s)| s.along).fold(0.0_f64, f64::max);
    let next_level = level + branch.level_spacing + max_along;

    for ((node, span), offset) in group.iter_mut().zip(offsets) {
        node.set_position(branch.axis.point(branch.sign * level, offset));
        let mut children: Vec<(&mut Node, &Span)> = node
            .visible_children_mut()
            .iter_mut()
            .zip(&span.children)
            .collect();
        place(&mut children, offset, next_level, branch);
    }
}

/// Single-sided tree growing in `direction`, root at the origin.
pub(crate) fn directional(root: &mut Node, direction: Direction, config: &LayoutConfig, sizer: &Sizer<'_>) {
    let axis = direction.axis();
    let span = measure(root, 0, axis, config.node_spacing, sizer);
    root.set_position(Point::ORIGIN);
    let branch = Branch {
        axis,
        sign: direction.sign(),
        crowding: TREE_CROWDING,
        node_spacing: config.node_spacing,
        level_spacing: config.level_spacing,
    };
    let start = config.level_spacing + span.along / 2.0;
    let mut group: Vec<(&mut Node, &Span)> = root
        .visible_children_mut()
        .iter_mut()
        .zip(&span.children)
        .collect();
    place(&mut group, 0.0, start, &branch);
}

/// Two-sided tree: even-indexed children go left, odd-indexed right.
pub(crate) fn mindmap(root: &mut Node, config: &LayoutConfig, sizer: &Sizer<'_>) {
    let span = measure(root, 0, Axis::Horizontal, config.node_spacing, sizer);
    root.set_position(Point::ORIGIN);

    let mut left = Vec::new();
    let mut right = Vec::new();
    for (i, pair) in root
        .visible_children_mut()
        .iter_mut()
        .zip(&span.children)
        .enumerate()
    {
        if i % 2 == 0 {
            left.push(pair);
        } else {
            right.push(pair);
        }
    }

    let widest_side = left.len().max(right.len()) as f64;
    let multiplier = 1.5 + (widest_side * 0.35).min(2.5);
    let start = config.level_spacing * multiplier + span.along / 2.0;
    let branch = |sign| Branch {
        axis: Axis::Horizontal,
        sign,
        crowding: MINDMAP_CROWDING,
        node_spacing: config.node_spacing,
        level_spacing: config.level_spacing,
    };
    place(&mut right, 0.0, start, &branch(1.0));
    place(&mut left, 0.0, start, &branch(-1.0));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_extent_adds_gaps_between_spans() {
        let spans = [
            Span {
                reserved: 80.0,
                along: 0.0,
                children: Vec::new(),
            },
            Span {
                reserved: 100.0,
                along: 0.0,
                children: Vec::new(),
            },
        ];
        assert_eq!(group_extent(&spans, 50.0), 230.0);
        assert_eq!(group_extent(&spans[..0], 50.0), 0.0);
    }

    #[test]
    fn axis_maps_level_and_cross() {
        assert_eq!(Axis::Horizontal.point(1.0, 2.0), Point::new(1.0, 2.0));
        assert_eq!(Axis::Vertical.point(1.0, 2.0), Point::new(2.0, 1.0));
        assert_eq!(Direction::Up.sign(), -1.0);
    }
}
