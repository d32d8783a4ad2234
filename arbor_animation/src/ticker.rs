// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Source of animation frames.
///
/// The engine calls [`TickSource::request`] when it gains work while idle
/// and [`TickSource::cancel`] when the last animation ends. Between the two,
/// the host is expected to call the engine's `tick` once per displayed frame.
pub trait TickSource {
    /// Start delivering frames.
    fn request(&mut self);
    /// Stop delivering frames.
    fn cancel(&mut self);
}

/// Tick source driven by hand, for tests and hosts that tick unconditionally.
///
/// It only records whether frames are wanted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualTicker {
    active: bool,
    requests: usize,
}

impl ManualTicker {
    /// Whether the engine currently wants frames.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// How many times frames were requested.
    pub fn requests(&self) -> usize {
        self.requests
    }
}

impl TickSource for ManualTicker {
    fn request(&mut self) {
        self.active = true;
        self.requests += 1;
    }

    fn cancel(&mut self) {
        self.active = false;
    }
}
