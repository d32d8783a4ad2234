// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, BezPath};
use peniko::Color;

use crate::{Layer, StrokeStyle, Surface, TextRun};

/// A surface call as recorded by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// [`Surface::clear`].
    Clear(Option<Color>),
    /// [`Surface::set_transform`].
    SetTransform(Affine),
    /// [`Surface::fill`], with the transform in effect.
    Fill {
        /// Path in local coordinates.
        path: BezPath,
        /// Fill color.
        color: Color,
        /// Transform in effect.
        transform: Affine,
    },
    /// [`Surface::stroke`], with the transform in effect.
    Stroke {
        /// Path in local coordinates.
        path: BezPath,
        /// Stroke style.
        style: StrokeStyle,
        /// Stroke color.
        color: Color,
        /// Transform in effect.
        transform: Affine,
    },
    /// [`Surface::push_layer`].
    PushLayer(Layer),
    /// [`Surface::pop_layer`].
    PopLayer,
    /// [`Surface::draw_text`], with the transform in effect.
    Text {
        /// The run as submitted.
        run: TextRun,
        /// Transform in effect.
        transform: Affine,
    },
}

/// Surface that rasterizes nothing and records every call.
///
/// Intended for tests and debugging that want to assert on the exact drawing
/// sequence a renderer produces.
///
/// # Panics
///
/// [`Surface::pop_layer`] panics when no layer is open.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<Command>,
    transform: Affine,
    depth: usize,
    max_depth: usize,
}

impl RecordingSurface {
    /// Every recorded call, in order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Forget all recorded calls. The current transform is kept.
    pub fn reset(&mut self) {
        self.commands.clear();
        self.max_depth = self.depth;
    }

    /// Transform currently in effect.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Number of layers currently open.
    pub fn layer_depth(&self) -> usize {
        self.depth
    }

    /// Deepest layer nesting seen since the last reset.
    pub fn max_layer_depth(&self) -> usize {
        self.max_depth
    }

    /// Recorded fills as `(path, color, transform)`.
    pub fn fills(&self) -> impl Iterator<Item = (&BezPath, Color, Affine)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            Command::Fill {
                path,
                color,
                transform,
            } => Some((path, *color, *transform)),
            _ => None,
        })
    }

    /// Recorded strokes as `(path, style, color, transform)`.
    pub fn strokes(&self) -> impl Iterator<Item = (&BezPath, &StrokeStyle, Color, Affine)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            Command::Stroke {
                path,
                style,
                color,
                transform,
            } => Some((path, style, *color, *transform)),
            _ => None,
        })
    }

    /// Recorded text runs.
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> + '_ {
        self.commands.iter().filter_map(|c| match c {
            Command::Text { run, .. } => Some(run),
            _ => None,
        })
    }

    /// Recorded layer pushes.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.commands.iter().filter_map(|c| match c {
            Command::PushLayer(layer) => Some(layer),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Option<Color>) {
        self.commands.push(Command::Clear(color));
    }

    fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
        self.commands.push(Command::SetTransform(transform));
    }

    fn fill(&mut self, path: &BezPath, color: Color) {
        self.commands.push(Command::Fill {
            path: path.clone(),
            color,
            transform: self.transform,
        });
    }

    fn stroke(&mut self, path: &BezPath, style: &StrokeStyle, color: Color) {
        self.commands.push(Command::Stroke {
            path: path.clone(),
            style: style.clone(),
            color,
            transform: self.transform,
        });
    }

    fn push_layer(&mut self, layer: Layer) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.commands.push(Command::PushLayer(layer));
    }

    fn pop_layer(&mut self) {
        assert!(self.depth > 0, "pop_layer with no open layer");
        self.depth -= 1;
        self.commands.push(Command::PopLayer);
    }

    fn draw_text(&mut self, run: &TextRun) {
        self.commands.push(Command::Text {
            run: run.clone(),
            transform: self.transform,
        });
    }
}
