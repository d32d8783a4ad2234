// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_imaging_vello_cpu::SurfaceError;
use arbor_tree::ParseError;

/// Errors produced by [`MindMap`](crate::MindMap).
///
/// Operations addressed at ids that are not in the tree are not errors; they
/// return `false` or `None`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configuration cannot produce a usable canvas.
    #[error("invalid configuration: {0}")]
    Configuration(String),
    /// An export was requested in a format with no exporter.
    #[error("unsupported export format `{0}`")]
    UnsupportedFormat(String),
    /// There is nothing laid out to export.
    #[error("nothing to export")]
    Empty,
    /// The image exporter failed.
    #[error(transparent)]
    Encode(#[from] SurfaceError),
    /// The JSON exporter failed.
    #[error("failed to serialize tree: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Theme or configuration JSON could not be read.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result alias for [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;
