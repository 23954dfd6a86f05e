#![forbid(unsafe_code)]

//! Settle decision: where a released drag snaps to, and how fast.
//!
//! When a pan ends the menu is usually part-way revealed. [`decide`] combines
//! the final reveal percentage with the release velocity to pick a
//! [`RevealTarget`], and [`settle_duration`] turns the velocity into an
//! animation duration so that fast flicks settle quickly.
//!
//! # Decision table
//!
//! Velocities are normalized (positive = toward open). First match wins.
//!
//! | started | condition                                                     | target |
//! |---------|---------------------------------------------------------------|--------|
//! | closed  | `percentage` past `threshold` or `velocity >= trigger`         | open   |
//! | closed  | otherwise                                                     | closed |
//! | open    | `percentage` past `1 - threshold` or `velocity <= -trigger`    | closed |
//! | open    | otherwise                                                     | open   |
//!
//! Whether landing exactly on the threshold counts as "past" it is a
//! [`ThresholdBoundary`], set separately for each row. By default an opening
//! drag must pass the threshold strictly (`percentage > threshold`), while a
//! closing drag flips as soon as it reaches it (`percentage <= 1 - threshold`).
//!
//! # Duration
//!
//! `min(100 / |velocity|, base)`. A zero or NaN velocity uses `base`.

use std::time::Duration;

use crate::percentage::RevealTarget;

/// Velocity (units/s) at which the settle takes one second; faster flicks
/// scale the duration down proportionally.
const VELOCITY_DURATION_SCALE: f64 = 100.0;

/// How a drag that lands exactly on the distance threshold is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ThresholdBoundary {
    /// Reaching the threshold is enough to flip state.
    Inclusive,
    /// The threshold must be passed; landing on it snaps back.
    Exclusive,
}

impl ThresholdBoundary {
    /// Whether `value` has moved up past `bound`.
    #[inline]
    #[must_use]
    pub fn above(self, value: f64, bound: f64) -> bool {
        match self {
            Self::Inclusive => value >= bound,
            Self::Exclusive => value > bound,
        }
    }

    /// Whether `value` has moved down past `bound`.
    #[inline]
    #[must_use]
    pub fn below(self, value: f64, bound: f64) -> bool {
        match self {
            Self::Inclusive => value <= bound,
            Self::Exclusive => value < bound,
        }
    }
}

/// Tunables for [`decide`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionConfig {
    /// Fraction of the menu width a drag must cover to flip state. In `(0, 1)`.
    pub threshold_fraction: f64,
    /// Release speed (units/s) that flips state regardless of distance.
    pub velocity_trigger: f64,
    /// Longest settle animation; also used for zero-velocity releases.
    pub base_duration: Duration,
    /// Boundary for drags that started closed.
    pub open_boundary: ThresholdBoundary,
    /// Boundary for drags that started open.
    pub close_boundary: ThresholdBoundary,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            threshold_fraction: 0.33,
            velocity_trigger: 800.0,
            base_duration: Duration::from_millis(200),
            open_boundary: ThresholdBoundary::Exclusive,
            close_boundary: ThresholdBoundary::Inclusive,
        }
    }
}

/// Outcome of a settle decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settle {
    /// Resting state to animate to.
    pub target: RevealTarget,
    /// How long the settle animation should take.
    pub duration: Duration,
}

/// Decide the settle target and duration for a released drag.
#[must_use]
pub fn decide(
    percentage: f64,
    velocity_x: f64,
    open_at_start: bool,
    config: &DecisionConfig,
) -> Settle {
    let threshold = config.threshold_fraction;
    let trigger = config.velocity_trigger;

    let target = if open_at_start {
        if config.close_boundary.below(percentage, 1.0 - threshold) || velocity_x <= -trigger {
            RevealTarget::Closed
        } else {
            RevealTarget::Open
        }
    } else if config.open_boundary.above(percentage, threshold) || velocity_x >= trigger {
        RevealTarget::Open
    } else {
        RevealTarget::Closed
    };

    Settle {
        target,
        duration: settle_duration(velocity_x, config.base_duration),
    }
}

/// Settle animation duration for a release at `velocity_x`, capped at `base`.
#[must_use]
pub fn settle_duration(velocity_x: f64, base: Duration) -> Duration {
    let speed = velocity_x.abs();
    if speed.is_nan() || speed <= f64::EPSILON {
        return base;
    }
    Duration::try_from_secs_f64(VELOCITY_DURATION_SCALE / speed).map_or(base, |d| d.min(base))
}
