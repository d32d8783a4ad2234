// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_tree::{Node, NodeId};
use hashbrown::HashMap;
use kurbo::Point;
use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::handle::{AnimationHandle, Completer, GroupHandle};
use crate::target::{Targets, Tween};
use crate::ticker::{ManualTicker, TickSource};

/// Default animation length in milliseconds.
pub const DEFAULT_DURATION: f64 = 300.0;
/// Horizontal travel of the slide presets.
pub const SLIDE_DISTANCE: f64 = 100.0;
/// Vertical drop of the bounce preset.
pub const BOUNCE_DROP: f64 = 50.0;

/// How nodes appear.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnterPreset {
    /// Opacity from 0.
    #[default]
    Fade,
    /// Size from 0.
    Scale,
    /// In from the left.
    Slide,
    /// Down from above with a bounce.
    Bounce,
}

/// How nodes disappear.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitPreset {
    /// Opacity to 0.
    #[default]
    Fade,
    /// Size to 0.
    Scale,
    /// Out to the right.
    Slide,
}

/// Direction of a [`AnimationEngine::cascade`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cascade {
    /// Play the configured enter preset.
    Enter,
    /// Play the configured exit preset.
    Exit,
}

/// Engine defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimationConfig {
    /// When off, targets are applied at once and handles resolve immediately.
    pub enabled: bool,
    /// Milliseconds.
    pub duration: f64,
    /// Curve used when an animation does not name one.
    pub easing: Easing,
    /// Milliseconds between the first tick and the start of motion.
    pub delay: f64,
    /// Extra delay per node in a cascade, in milliseconds.
    pub stagger: f64,
    /// Preset for [`Cascade::Enter`].
    pub node_enter: EnterPreset,
    /// Preset for [`Cascade::Exit`].
    pub node_exit: ExitPreset,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration: DEFAULT_DURATION,
            easing: Easing::EaseOut,
            delay: 0.0,
            stagger: 0.0,
            node_enter: EnterPreset::Fade,
            node_exit: ExitPreset::Fade,
        }
    }
}

/// Per-animation overrides of [`AnimationConfig`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationOptions {
    /// Milliseconds.
    pub duration: Option<f64>,
    /// Curve.
    pub easing: Option<Easing>,
    /// Milliseconds.
    pub delay: Option<f64>,
}

impl AnimationOptions {
    /// Override the duration.
    pub fn duration(mut self, ms: f64) -> Self {
        self.duration = Some(ms);
        self
    }

    /// Override the easing.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }

    /// Override the delay.
    pub fn delay(mut self, ms: f64) -> Self {
        self.delay = Some(ms);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct AnimationKey(u64);

#[derive(Debug)]
struct Animation {
    node: NodeId,
    tween: Tween,
    duration: f64,
    easing: Easing,
    delay: f64,
    /// Fixed by the first tick that sees the animation.
    start: Option<f64>,
    done: Completer,
}

impl Animation {
    fn progress(&mut self, now: f64) -> Option<f64> {
        let start = *self.start.get_or_insert(now + self.delay);
        if now < start {
            return None;
        }
        if self.duration <= 0.0 {
            return Some(1.0);
        }
        Some(((now - start) / self.duration).clamp(0.0, 1.0))
    }
}

/// Drives numeric node attributes toward targets over time.
///
/// Animations hold node ids, never references: the tree is passed to
/// [`AnimationEngine::tick`] each frame. Time is whatever monotonic
/// millisecond clock the host ticks with; an animation's clock starts at the
/// first tick after it was created.
///
/// ```
/// use arbor_animation::{AnimationEngine, AnimationOptions, Targets};
/// use arbor_tree::Node;
///
/// let mut root = Node::new("r", "Root");
/// let mut engine = AnimationEngine::default();
/// let handle = engine.animate(&mut root, Targets::new().opacity(0.0), AnimationOptions::default());
///
/// engine.tick(&mut root, 1000.0);
/// engine.tick(&mut root, 1150.0);
/// assert!(root.opacity > 0.0 && root.opacity < 1.0);
/// engine.tick(&mut root, 1300.0);
/// assert_eq!(root.opacity, 0.0);
/// assert!(handle.is_resolved());
/// assert!(!engine.ticker().is_active());
/// ```
#[derive(Debug)]
pub struct AnimationEngine<T = ManualTicker> {
    config: AnimationConfig,
    animations: HashMap<AnimationKey, Animation>,
    next: u64,
    ticker: T,
    running: bool,
}

impl Default for AnimationEngine<ManualTicker> {
    fn default() -> Self {
        Self::new(AnimationConfig::default())
    }
}

impl AnimationEngine<ManualTicker> {
    /// Engine ticked by hand.
    pub fn new(config: AnimationConfig) -> Self {
        Self::with_ticker(config, ManualTicker::default())
    }
}

impl<T: TickSource> AnimationEngine<T> {
    /// Engine that asks `ticker` for frames.
    pub fn with_ticker(config: AnimationConfig, ticker: T) -> Self {
        Self {
            config,
            animations: HashMap::new(),
            next: 0,
            ticker,
            running: false,
        }
    }

    /// Active defaults.
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Replace the defaults. Animations in flight keep their settings.
    pub fn set_config(&mut self, config: AnimationConfig) {
        self.config = config;
    }

    /// Frame source.
    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    /// Mutable frame source.
    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    /// Whether any animation is in flight.
    pub fn is_animating(&self) -> bool {
        !self.animations.is_empty()
    }

    /// Number of animations in flight.
    pub fn in_flight(&self) -> usize {
        self.animations.len()
    }

    /// Animate the fields in `targets` from their current values on `node`.
    ///
    /// Fields without a current value (geometry not yet laid out) jump to
    /// their target. Several animations may drive the same node; on a
    /// shared field the most recent one wins.
    pub fn animate(
        &mut self,
        node: &mut Node,
        targets: Targets,
        options: AnimationOptions,
    ) -> AnimationHandle {
        if !self.config.enabled {
            targets.apply(node);
            return AnimationHandle::resolved();
        }
        let (handle, done) = AnimationHandle::pending();
        let animation = Animation {
            node: node.id.clone(),
            tween: Tween::capture(node, &targets),
            duration: options.duration.unwrap_or(self.config.duration),
            easing: options.easing.unwrap_or(self.config.easing),
            delay: options.delay.unwrap_or(self.config.delay),
            start: None,
            done,
        };
        tracing::trace!(node = %animation.node, fields = targets.len(), "animate");
        self.animations.insert(AnimationKey(self.next), animation);
        self.next += 1;
        if !self.running {
            self.running = true;
            self.ticker.request();
        }
        handle
    }

    /// Move `node` to `to`.
    pub fn animate_move(&mut self, node: &mut Node, to: Point) -> AnimationHandle {
        self.animate(node, Targets::new().position(to), AnimationOptions::default())
    }

    /// Advance every animation to time `now` and write the results into
    /// `root`. Returns whether any node was written.
    ///
    /// Finished animations are removed and their handles resolved. An
    /// animation whose node is no longer in `root` is dropped and its handle
    /// abandoned.
    pub fn tick(&mut self, root: &mut Node, now: f64) -> bool {
        let mut keys: Vec<AnimationKey> = self.animations.keys().copied().collect();
        keys.sort_unstable();
        let mut wrote = false;
        for key in keys {
            let Some(animation) = self.animations.get_mut(&key) else {
                continue;
            };
            let Some(node) = root.find_mut(&animation.node) else {
                tracing::debug!(node = %animation.node, "animation target is gone");
                self.animations.remove(&key);
                continue;
            };
            let Some(progress) = animation.progress(now) else {
                continue;
            };
            let eased = if progress >= 1.0 {
                1.0
            } else {
                animation.easing.apply(progress)
            };
            animation.tween.write(node, eased);
            wrote = true;
            if progress >= 1.0 {
                if let Some(finished) = self.animations.remove(&key) {
                    finished.done.resolve();
                }
            }
        }
        if self.animations.is_empty() {
            self.stop();
        }
        wrote
    }

    /// Drop every animation of `id`, abandoning their handles. Returns how
    /// many were dropped.
    pub fn cancel_node(&mut self, id: &NodeId) -> usize {
        let before = self.animations.len();
        self.animations.retain(|_, a| a.node != *id);
        if self.animations.is_empty() {
            self.stop();
        }
        before - self.animations.len()
    }

    /// Drop every animation, abandoning their handles.
    pub fn cancel_all(&mut self) {
        self.animations.clear();
        self.stop();
    }

    /// Play `preset` on `node` after `delay` milliseconds.
    ///
    /// The starting state is written onto the node at once. Presets that
    /// need geometry resolve immediately on nodes not yet laid out.
    pub fn enter(&mut self, node: &mut Node, preset: EnterPreset, delay: f64) -> AnimationHandle {
        let options = AnimationOptions::default().delay(delay);
        match preset {
            EnterPreset::Fade => {
                let target = if node.opacity > 0.0 { node.opacity } else { 1.0 };
                node.opacity = 0.0;
                self.animate(node, Targets::new().opacity(target), options)
            }
            EnterPreset::Scale => {
                let (Some(w), Some(h)) = (node.width, node.height) else {
                    return AnimationHandle::resolved();
                };
                node.width = Some(0.0);
                node.height = Some(0.0);
                let targets = Targets::new().width(w).height(h);
                self.animate(node, targets, options.easing(Easing::EaseOut))
            }
            EnterPreset::Slide => {
                let Some(x) = node.x else {
                    return AnimationHandle::resolved();
                };
                node.x = Some(x - SLIDE_DISTANCE);
                self.animate(node, Targets::new().x(x), options)
            }
            EnterPreset::Bounce => {
                let Some(y) = node.y else {
                    return AnimationHandle::resolved();
                };
                node.y = Some(y - BOUNCE_DROP);
                self.animate(node, Targets::new().y(y), options.easing(Easing::Bounce))
            }
        }
    }

    /// Play `preset` on `node` after `delay` milliseconds.
    pub fn exit(&mut self, node: &mut Node, preset: ExitPreset, delay: f64) -> AnimationHandle {
        let options = AnimationOptions::default().delay(delay);
        match preset {
            ExitPreset::Fade => self.animate(node, Targets::new().opacity(0.0), options),
            ExitPreset::Scale => {
                if node.size().is_none() {
                    return AnimationHandle::resolved();
                }
                let targets = Targets::new().width(0.0).height(0.0);
                self.animate(node, targets, options.easing(Easing::EaseIn))
            }
            ExitPreset::Slide => {
                let Some(x) = node.x else {
                    return AnimationHandle::resolved();
                };
                self.animate(node, Targets::new().x(x + SLIDE_DISTANCE), options)
            }
        }
    }

    /// Play the configured enter or exit preset over every node reachable
    /// from `root` without crossing a collapsed node.
    ///
    /// The node at pre-order position `i` is delayed by `i × stagger`. The
    /// returned handle resolves when every node has finished.
    pub fn cascade(&mut self, root: &mut Node, direction: Cascade) -> GroupHandle {
        let mut ids = Vec::new();
        root.walk_visible(&mut |node, _| ids.push(node.id.clone()));
        let (stagger, enter, exit) = (
            self.config.stagger,
            self.config.node_enter,
            self.config.node_exit,
        );
        let mut parts = Vec::with_capacity(ids.len());
        for (index, id) in ids.iter().enumerate() {
            let Some(node) = root.find_mut(id) else {
                continue;
            };
            let delay = index as f64 * stagger;
            parts.push(match direction {
                Cascade::Enter => self.enter(node, enter, delay),
                Cascade::Exit => self.exit(node, exit, delay),
            });
        }
        GroupHandle::new(parts)
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.ticker.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_counts_from_first_tick() {
        let mut node = Node::new("n", "N");
        let mut engine = AnimationEngine::default();
        let options = AnimationOptions::default()
            .delay(100.0)
            .duration(100.0)
            .easing(Easing::Linear);
        engine.animate(&mut node, Targets::new().opacity(0.0), options);
        assert!(!engine.tick(&mut node, 0.0));
        assert!(!engine.tick(&mut node, 99.0));
        assert!(engine.tick(&mut node, 150.0));
        assert!((node.opacity - 0.5).abs() < 1e-12);
    }

    #[test]
    fn disabled_engine_applies_synchronously() {
        let mut node = Node::new("n", "N");
        let mut engine = AnimationEngine::new(AnimationConfig {
            enabled: false,
            ..AnimationConfig::default()
        });
        let handle = engine.animate_move(&mut node, Point::new(5.0, 6.0));
        assert!(handle.is_resolved());
        assert_eq!(node.position(), Some(Point::new(5.0, 6.0)));
        assert!(!engine.is_animating());
        assert_eq!(engine.ticker().requests(), 0);
    }

    #[test]
    fn removed_nodes_abandon_their_animations() {
        let mut root = Node::new("r", "R").with_child(Node::new("c", "C"));
        let mut engine = AnimationEngine::default();
        let handle = engine.animate(
            &mut root.children[0],
            Targets::new().opacity(0.0),
            AnimationOptions::default(),
        );
        root.children.clear();
        assert!(!engine.tick(&mut root, 0.0));
        assert!(handle.is_abandoned());
        assert!(!engine.ticker().is_active());
    }

    #[test]
    fn config_reads_partial_json() {
        let config: AnimationConfig =
            serde_json::from_str(r#"{"easing": "bounce", "nodeEnter": "slide"}"#).unwrap();
        assert_eq!(config.easing, Easing::Bounce);
        assert_eq!(config.node_enter, EnterPreset::Slide);
        assert_eq!(config.duration, DEFAULT_DURATION);
    }
}
