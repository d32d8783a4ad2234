// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_tree::Node;
use kurbo::Point;
use smallvec::SmallVec;

/// Numeric node attribute an animation can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimField {
    /// Center x.
    X,
    /// Center y.
    Y,
    /// Box width.
    Width,
    /// Box height.
    Height,
    /// Compositing opacity.
    Opacity,
}

impl AnimField {
    /// Current value on `node`; `None` for geometry not yet laid out.
    pub fn get(self, node: &Node) -> Option<f64> {
        match self {
            Self::X => node.x,
            Self::Y => node.y,
            Self::Width => node.width,
            Self::Height => node.height,
            Self::Opacity => Some(node.opacity),
        }
    }

    /// Write `value` onto `node`.
    pub fn set(self, node: &mut Node, value: f64) {
        match self {
            Self::X => node.x = Some(value),
            Self::Y => node.y = Some(value),
            Self::Width => node.width = Some(value),
            Self::Height => node.height = Some(value),
            Self::Opacity => node.opacity = value,
        }
    }
}

/// Target values for an animation, one per field.
///
/// Setting a field twice keeps the last value.
///
/// ```
/// use arbor_animation::{AnimField, Targets};
///
/// let t = Targets::new().x(10.0).opacity(0.5).x(20.0);
/// assert_eq!(t.get(AnimField::X), Some(20.0));
/// assert_eq!(t.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Targets {
    fields: SmallVec<[(AnimField, f64); 4]>,
}

impl Targets {
    /// No targets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Target `value` for `field`.
    pub fn with(mut self, field: AnimField, value: f64) -> Self {
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
        self
    }

    /// Target center x.
    pub fn x(self, value: f64) -> Self {
        self.with(AnimField::X, value)
    }

    /// Target center y.
    pub fn y(self, value: f64) -> Self {
        self.with(AnimField::Y, value)
    }

    /// Target center.
    pub fn position(self, p: Point) -> Self {
        self.x(p.x).y(p.y)
    }

    /// Target width.
    pub fn width(self, value: f64) -> Self {
        self.with(AnimField::Width, value)
    }

    /// Target height.
    pub fn height(self, value: f64) -> Self {
        self.with(AnimField::Height, value)
    }

    /// Target opacity.
    pub fn opacity(self, value: f64) -> Self {
        self.with(AnimField::Opacity, value)
    }

    /// Target for `field`, if set.
    pub fn get(&self, field: AnimField) -> Option<f64> {
        self.fields.iter().find(|(f, _)| *f == field).map(|(_, v)| *v)
    }

    /// Number of targeted fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is targeted.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Targeted fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (AnimField, f64)> + '_ {
        self.fields.iter().copied()
    }

    /// Write every target onto `node` at once.
    pub fn apply(&self, node: &mut Node) {
        for (field, value) in self.iter() {
            field.set(node, value);
        }
    }
}

/// Per-field interpolation endpoints.
#[derive(Clone, Debug)]
pub(crate) struct Tween {
    fields: SmallVec<[(AnimField, f64, f64); 4]>,
}

impl Tween {
    /// Capture the current values of `node` as starting points. Fields
    /// without a current value start at their target.
    pub(crate) fn capture(node: &Node, targets: &Targets) -> Self {
        let fields = targets
            .iter()
            .map(|(field, to)| (field, field.get(node).unwrap_or(to), to))
            .collect();
        Self { fields }
    }

    /// Write the values at eased progress `k` onto `node`. At `k == 1`
    /// every field lands exactly on its target.
    pub(crate) fn write(&self, node: &mut Node, k: f64) {
        for &(field, from, to) in &self.fields {
            let value = if k == 1.0 { to } else { from + (to - from) * k };
            field.set(node, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unplaced_geometry_jumps_to_target() {
        let mut node = Node::new("n", "N");
        let tween = Tween::capture(&node, &Targets::new().x(40.0).opacity(0.0));
        tween.write(&mut node, 0.5);
        assert_eq!(node.x, Some(40.0));
        assert_eq!(node.opacity, 0.5);
    }

    #[test]
    fn interpolates_linearly_in_eased_progress() {
        let mut node = Node::new("n", "N");
        node.width = Some(100.0);
        let tween = Tween::capture(&node, &Targets::new().width(200.0));
        tween.write(&mut node, 0.25);
        assert_eq!(node.width, Some(125.0));
        tween.write(&mut node, 1.0);
        assert_eq!(node.width, Some(200.0));
    }
}
