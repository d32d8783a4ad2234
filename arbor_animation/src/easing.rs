// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Easing curve mapping linear progress in `[0, 1]` to eased progress.
///
/// Every curve maps 0 to 0 and 1 to 1. `Bounce` and `Elastic` leave
/// `[0, 1]` in between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Quadratic acceleration then deceleration.
    Ease,
    /// Quadratic acceleration.
    EaseIn,
    /// Quadratic deceleration.
    #[default]
    EaseOut,
    /// Quadratic acceleration then deceleration.
    EaseInOut,
    /// Decaying bounces settling at the end.
    Bounce,
    /// Overshooting oscillation settling at the end.
    Elastic,
}

impl Easing {
    /// Eased value of `t`, clamped to `[0, 1]` first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Ease | Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::Bounce => bounce(t),
            Self::Elastic => {
                if t == 0.0 || t == 1.0 {
                    t
                } else {
                    -(2.0_f64.powf(10.0 * (t - 1.0))) * ((t - 1.1) * 5.0 * PI).sin()
                }
            }
        }
    }
}

fn bounce(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 7] = [
        Easing::Linear,
        Easing::Ease,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::Bounce,
        Easing::Elastic,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for e in ALL {
            assert!(e.apply(0.0).abs() < 1e-9, "{e:?} at 0");
            assert!((e.apply(1.0) - 1.0).abs() < 1e-9, "{e:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-3.0), 0.0);
        assert_eq!(Easing::EaseIn.apply(7.0), 1.0);
    }

    #[test]
    fn quadratic_midpoints() {
        assert_eq!(Easing::EaseIn.apply(0.5), 0.25);
        assert_eq!(Easing::EaseOut.apply(0.5), 0.75);
        assert_eq!(Easing::EaseInOut.apply(0.25), 0.125);
    }

    #[test]
    fn names_are_kebab_case() {
        let e: Easing = serde_json::from_str("\"ease-in-out\"").unwrap();
        assert_eq!(e, Easing::EaseInOut);
        assert_eq!(serde_json::to_string(&Easing::EaseOut).unwrap(), "\"ease-out\"");
    }
}
