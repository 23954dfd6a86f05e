#![forbid(unsafe_code)]

//! Settle animation driver with last-writer-wins cancellation.
//!
//! [`AnimationDriver`] owns the *visual* reveal percentage. It supports two
//! kinds of updates:
//!
//! - [`run_continuous`](AnimationDriver::run_continuous): jump straight to a
//!   percentage (used on every drag sample). No completion is recorded.
//! - [`run_to_target`](AnimationDriver::run_to_target): animate from the
//!   current percentage to 0 or 1 over a duration, then invoke a completion
//!   callback. Progress is advanced by the host's frame clock through
//!   [`tick`](AnimationDriver::tick).
//!
//! # Invariants
//!
//! 1. Every completion callback handed to the driver is invoked exactly once:
//!    with [`AnimationOutcome::Finished`] when its animation reaches the target,
//!    or [`AnimationOutcome::Superseded`] when a newer request takes over.
//! 2. A zero-duration request (or one already resting on its target) applies
//!    the target and completes synchronously, inside the same call.
//! 3. At most one animation is in flight. The newest request always wins and
//!    owns the final percentage.
//! 4. The percentage is always in `[0.0, 1.0]`, whatever the easing.
//!
//! # Failure Modes
//!
//! - Ticking with no animation in flight is a no-op.
//! - A superseded animation never reports progress again.

use std::fmt;
use std::time::Duration;

use crate::logging::trace;
use crate::percentage::{RevealTarget, unit};

// ---------------------------------------------------------------------------
// Easing
// ---------------------------------------------------------------------------

/// Easing curve applied to settle animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Accelerating.
    EaseIn,
    /// Decelerating.
    EaseOut,
    /// Smooth S-curve.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Apply the curve to a normalized time in `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = unit(t);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Handles and outcomes
// ---------------------------------------------------------------------------

/// Identifies one `run_to_target` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

impl AnimationId {
    /// Raw sequence number. Later requests have larger numbers.
    #[inline]
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// How a settle request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    /// The animation reached its target.
    Finished,
    /// A newer request (or a drag) took over before the target was reached.
    Superseded,
    /// The request was refused before anything moved.
    Rejected,
}

/// Completion callback for a settle request.
pub type CompletionCallback = Box<dyn FnOnce(AnimationOutcome)>;

/// Reported when an animation reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settled {
    /// The request that finished.
    pub id: AnimationId,
    /// Where it came to rest.
    pub target: RevealTarget,
}

/// Result of [`AnimationDriver::run_to_target`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    /// The animation is in flight; drive it with [`AnimationDriver::tick`].
    Started(AnimationId),
    /// The target was applied and the callback already invoked.
    Completed(Settled),
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

struct Flight {
    id: AnimationId,
    from: f64,
    target: RevealTarget,
    duration: Duration,
    elapsed: Duration,
    on_complete: Option<CompletionCallback>,
}

impl Flight {
    fn resolve(&mut self, outcome: AnimationOutcome) {
        if let Some(callback) = self.on_complete.take() {
            callback(outcome);
        }
    }
}

/// Drives the visual reveal percentage.
pub struct AnimationDriver {
    percentage: f64,
    easing: Easing,
    flight: Option<Flight>,
    next_id: u64,
}

impl fmt::Debug for AnimationDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationDriver")
            .field("percentage", &self.percentage)
            .field("easing", &self.easing)
            .field("in_flight", &self.flight.as_ref().map(|fl| (fl.id, fl.target)))
            .finish()
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl AnimationDriver {
    /// Create a driver resting at `percentage`.
    #[must_use]
    pub fn new(percentage: f64) -> Self {
        Self {
            percentage: unit(percentage),
            easing: Easing::default(),
            flight: None,
            next_id: 0,
        }
    }

    /// Set the easing curve (builder pattern).
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Change the easing curve used by subsequent requests.
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Current easing curve.
    #[inline]
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Current visual percentage.
    #[inline]
    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Whether a settle animation is in flight.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.flight.is_some()
    }

    /// Target of the in-flight animation, if any.
    #[inline]
    #[must_use]
    pub fn in_flight_target(&self) -> Option<RevealTarget> {
        self.flight.as_ref().map(|f| f.target)
    }

    /// Id of the in-flight animation, if any.
    #[inline]
    #[must_use]
    pub fn in_flight(&self) -> Option<AnimationId> {
        self.flight.as_ref().map(|f| f.id)
    }

    /// Cancel the in-flight animation, leaving the percentage where it is.
    ///
    /// The cancelled request's callback receives `Superseded`.
    pub fn cancel(&mut self) -> Option<AnimationId> {
        let mut flight = self.flight.take()?;
        trace!(id = flight.id.0, at = self.percentage, "animation superseded");
        flight.resolve(AnimationOutcome::Superseded);
        Some(flight.id)
    }

    /// Jump to `percentage` and report it. Supersedes any in-flight animation.
    pub fn run_continuous(&mut self, percentage: f64, mut on_progress: impl FnMut(f64)) {
        self.cancel();
        self.percentage = unit(percentage);
        on_progress(self.percentage);
    }

    /// Animate from the current percentage to `target` over `duration`.
    ///
    /// Any in-flight animation is superseded first. `on_progress` is called
    /// here only when the request completes synchronously; otherwise progress
    /// is reported from [`tick`](Self::tick).
    pub fn run_to_target(
        &mut self,
        target: RevealTarget,
        duration: Duration,
        mut on_progress: impl FnMut(f64),
        on_complete: impl FnOnce(AnimationOutcome) + 'static,
    ) -> Launch {
        self.cancel();

        let id = AnimationId(self.next_id);
        self.next_id += 1;

        let mut flight = Flight {
            id,
            from: self.percentage,
            target,
            duration,
            elapsed: Duration::ZERO,
            on_complete: Some(Box::new(on_complete)),
        };

        if duration.is_zero() || self.percentage == target.percentage() {
            self.percentage = target.percentage();
            on_progress(self.percentage);
            flight.resolve(AnimationOutcome::Finished);
            trace!(id = id.0, ?target, "animation completed synchronously");
            return Launch::Completed(Settled { id, target });
        }

        trace!(id = id.0, ?target, from = self.percentage, ?duration, "animation started");
        self.flight = Some(flight);
        Launch::Started(id)
    }

    /// Advance the in-flight animation by `delta`.
    ///
    /// Reports the new percentage through `on_progress`. Returns the settled
    /// request once its target is reached; its callback has already been
    /// invoked with `Finished` by then.
    pub fn tick(&mut self, delta: Duration, mut on_progress: impl FnMut(f64)) -> Option<Settled> {
        let flight = self.flight.as_mut()?;
        flight.elapsed = flight.elapsed.saturating_add(delta);

        let t = (flight.elapsed.as_secs_f64() / flight.duration.as_secs_f64()).min(1.0);
        if t < 1.0 {
            let to = flight.target.percentage();
            let eased = self.easing.apply(t);
            self.percentage = unit(flight.from + (to - flight.from) * eased);
            trace!(id = flight.id.0, t, percentage = self.percentage, "animation tick");
            on_progress(self.percentage);
            return None;
        }

        let mut flight = self.flight.take()?;
        self.percentage = flight.target.percentage();
        on_progress(self.percentage);
        flight.resolve(AnimationOutcome::Finished);
        Some(Settled {
            id: flight.id,
            target: flight.target,
        })
    }
}

impl Drop for AnimationDriver {
    fn drop(&mut self) {
        self.cancel();
    }
}
