#![forbid(unsafe_code)]

//! Pan sampling: transforms raw pointer events into normalized pan samples.
//!
//! A host that already owns a pan recognizer can construct [`GestureSample`]s
//! directly. A host that only sees raw pointer input feeds [`PointerEvent`]s
//! into a [`GestureSampler`], which tracks the origin, measures translation,
//! and estimates release velocity.
//!
//! # State Machine
//!
//! ```text
//! Idle --Down--> Pressed --Move past slop--> Panning --Up/Cancel--> Idle
//!                   |                           |
//!                   +--Up/Cancel (no sample)----+--Move--> Panning (Changed)
//! ```
//!
//! # Invariants
//!
//! 1. Every emitted `Began` is followed by zero or more `Changed` samples and
//!    exactly one `Ended` or `Cancelled`, unless [`GestureSampler::reset`] is
//!    called in between.
//! 2. Translation is always measured from the `Down` position, so the slop
//!    distance is not lost once the pan begins.
//! 3. Only one pointer is tracked. A second `Down` while pressed is dropped.
//!
//! # Failure Modes
//!
//! - `Move`/`Up` without a prior `Down` are dropped with a warning.
//! - A release after the pointer rested for longer than the stop window reports
//!   zero velocity.

use std::collections::VecDeque;
use std::time::Duration;

pub use web_time::Instant;

use crate::geometry::{MenuSide, Point, Vec2};
use crate::logging::{trace, warn};

// ---------------------------------------------------------------------------
// Samples
// ---------------------------------------------------------------------------

/// Phase of a one-finger pan gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// The pan was recognized.
    Began,
    /// The pointer moved while panning.
    Changed,
    /// The pointer was released.
    Ended,
    /// The host aborted the gesture.
    Cancelled,
}

impl GesturePhase {
    /// Whether this phase terminates the gesture.
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }
}

/// One normalized pan sample. Produced per input event and consumed immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    /// Gesture phase.
    pub phase: GesturePhase,
    /// Where the pointer first touched down.
    pub origin: Point,
    /// Offset of the pointer from `origin`.
    pub translation: Vec2,
    /// Pointer velocity in units per second.
    pub velocity: Vec2,
}

impl GestureSample {
    /// Create a sample.
    #[must_use]
    pub fn new(phase: GesturePhase, origin: Point, translation: Vec2, velocity: Vec2) -> Self {
        Self {
            phase,
            origin,
            translation,
            velocity,
        }
    }

    /// A `Began` sample with no translation yet.
    #[must_use]
    pub fn began(origin: Point, velocity: Vec2) -> Self {
        Self::new(GesturePhase::Began, origin, Vec2::ZERO, velocity)
    }

    /// A `Changed` sample.
    #[must_use]
    pub fn changed(origin: Point, translation: Vec2, velocity: Vec2) -> Self {
        Self::new(GesturePhase::Changed, origin, translation, velocity)
    }

    /// An `Ended` sample.
    #[must_use]
    pub fn ended(origin: Point, translation: Vec2, velocity: Vec2) -> Self {
        Self::new(GesturePhase::Ended, origin, translation, velocity)
    }

    /// A `Cancelled` sample.
    #[must_use]
    pub fn cancelled(origin: Point, translation: Vec2, velocity: Vec2) -> Self {
        Self::new(GesturePhase::Cancelled, origin, translation, velocity)
    }

    /// Horizontal translation.
    #[inline]
    #[must_use]
    pub fn translation_x(&self) -> f64 {
        self.translation.x
    }

    /// Horizontal velocity.
    #[inline]
    #[must_use]
    pub fn velocity_x(&self) -> f64 {
        self.velocity.x
    }

    /// Whether the motion is at least as horizontal as it is vertical.
    #[inline]
    #[must_use]
    pub fn is_primarily_horizontal(&self) -> bool {
        self.velocity.y.abs() <= self.velocity.x.abs()
    }

    /// Mirror the horizontal components so positive values point toward open.
    #[must_use]
    pub fn normalized(&self, side: MenuSide) -> Self {
        Self {
            translation: Vec2::new(side.normalize(self.translation.x), self.translation.y),
            velocity: Vec2::new(side.normalize(self.velocity.x), self.velocity.y),
            ..*self
        }
    }
}

// ---------------------------------------------------------------------------
// Raw pointer input
// ---------------------------------------------------------------------------

/// Kind of raw pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Finger/button pressed.
    Down,
    /// Pointer moved while pressed.
    Move,
    /// Finger/button released.
    Up,
    /// The host lost the pointer (e.g. system gesture took over).
    Cancel,
}

/// A raw pointer event with its timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Event kind.
    pub kind: PointerKind,
    /// Pointer position in container coordinates.
    pub position: Point,
    /// When the event occurred.
    pub time: Instant,
}

impl PointerEvent {
    /// Create a pointer event.
    #[must_use]
    pub fn new(kind: PointerKind, position: impl Into<Point>, time: Instant) -> Self {
        Self {
            kind,
            position: position.into(),
            time,
        }
    }
}

// ---------------------------------------------------------------------------
// Velocity estimation
// ---------------------------------------------------------------------------

/// Number of positions retained for velocity estimation.
const HISTORY_SIZE: usize = 20;

/// Only positions this recent (relative to the newest) contribute.
const HORIZON: Duration = Duration::from_millis(100);

/// A gap longer than this between consecutive positions means the pointer stopped.
const ASSUME_STOPPED: Duration = Duration::from_millis(40);

/// Estimates pointer velocity from recent positions.
///
/// Fits a least-squares line through the positions inside the horizon and
/// reports its slope per axis.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(Instant, Point)>,
}

impl VelocityTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_SIZE),
        }
    }

    /// Record a position.
    pub fn add(&mut self, time: Instant, position: Point) {
        if self.samples.len() == HISTORY_SIZE {
            self.samples.pop_front();
        }
        self.samples.push_back((time, position));
    }

    /// Forget all positions.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// Current velocity estimate in units per second.
    ///
    /// Returns zero with fewer than two usable positions.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        let Some(&(newest, _)) = self.samples.back() else {
            return Vec2::ZERO;
        };

        let mut window: Vec<(f64, Point)> = Vec::with_capacity(self.samples.len());
        let mut previous = newest;
        for &(time, position) in self.samples.iter().rev() {
            let age = newest.saturating_duration_since(time);
            let gap = previous.saturating_duration_since(time);
            if age > HORIZON || gap > ASSUME_STOPPED {
                break;
            }
            window.push((-age.as_secs_f64(), position));
            previous = time;
        }

        if window.len() < 2 {
            return Vec2::ZERO;
        }

        let n = window.len() as f64;
        let mean_t = window.iter().map(|(t, _)| t).sum::<f64>() / n;
        let mean_x = window.iter().map(|(_, p)| p.x).sum::<f64>() / n;
        let mean_y = window.iter().map(|(_, p)| p.y).sum::<f64>() / n;

        let mut var_t = 0.0;
        let mut cov_x = 0.0;
        let mut cov_y = 0.0;
        for (t, p) in &window {
            let dt = t - mean_t;
            var_t += dt * dt;
            cov_x += dt * (p.x - mean_x);
            cov_y += dt * (p.y - mean_y);
        }

        if var_t <= f64::EPSILON {
            return Vec2::ZERO;
        }
        Vec2::new(cov_x / var_t, cov_y / var_t)
    }
}

// ---------------------------------------------------------------------------
// GestureSampler
// ---------------------------------------------------------------------------

/// Default distance the pointer must travel before a pan is recognized.
pub const DEFAULT_PAN_SLOP: f64 = 3.0;

#[derive(Debug, Clone, Copy)]
struct Press {
    origin: Point,
    panning: bool,
}

/// Converts raw pointer events into [`GestureSample`]s.
#[derive(Debug, Clone)]
pub struct GestureSampler {
    slop: f64,
    press: Option<Press>,
    tracker: VelocityTracker,
}

impl Default for GestureSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureSampler {
    /// Create a sampler with the default pan slop.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slop: DEFAULT_PAN_SLOP,
            press: None,
            tracker: VelocityTracker::new(),
        }
    }

    /// Set the distance the pointer must travel before `Began` is emitted.
    #[must_use]
    pub fn with_slop(mut self, slop: f64) -> Self {
        self.slop = slop.max(0.0);
        self
    }

    /// Whether a pan is currently being reported.
    #[inline]
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.press.is_some_and(|p| p.panning)
    }

    /// Drop any in-progress press without emitting a sample.
    pub fn reset(&mut self) {
        self.press = None;
        self.tracker.reset();
    }

    /// Process a raw pointer event, returning the pan sample it produces, if any.
    pub fn process(&mut self, event: &PointerEvent) -> Option<GestureSample> {
        match event.kind {
            PointerKind::Down => {
                if self.press.is_some() {
                    warn!(x = event.position.x, y = event.position.y, "second pointer ignored");
                    return None;
                }
                self.press = Some(Press {
                    origin: event.position,
                    panning: false,
                });
                self.tracker.reset();
                self.tracker.add(event.time, event.position);
                None
            }
            PointerKind::Move => {
                let Some(press) = self.press.as_mut() else {
                    warn!("pointer move without press dropped");
                    return None;
                };
                self.tracker.add(event.time, event.position);
                let translation = event.position - press.origin;
                let velocity = self.tracker.velocity();

                if press.panning {
                    trace!(dx = translation.x, vx = velocity.x, "pan changed");
                    return Some(GestureSample::changed(press.origin, translation, velocity));
                }
                if translation.hypot() < self.slop {
                    return None;
                }
                press.panning = true;
                trace!(x = press.origin.x, y = press.origin.y, "pan began");
                Some(GestureSample::new(
                    GesturePhase::Began,
                    press.origin,
                    translation,
                    velocity,
                ))
            }
            PointerKind::Up | PointerKind::Cancel => {
                let Some(press) = self.press.take() else {
                    warn!(kind = ?event.kind, "pointer release without press dropped");
                    return None;
                };
                self.tracker.add(event.time, event.position);
                let velocity = self.tracker.velocity();
                self.tracker.reset();
                if !press.panning {
                    return None;
                }
                let translation = event.position - press.origin;
                let phase = if event.kind == PointerKind::Up {
                    GesturePhase::Ended
                } else {
                    GesturePhase::Cancelled
                };
                Some(GestureSample::new(phase, press.origin, translation, velocity))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    fn event(kind: PointerKind, x: f64, y: f64, time: Instant) -> PointerEvent {
        PointerEvent::new(kind, (x, y), time)
    }

    #[test]
    fn tracker_is_zero_without_history() {
        let tracker = VelocityTracker::new();
        assert_eq!(tracker.velocity(), Vec2::ZERO);
    }

    #[test]
    fn tracker_measures_constant_speed() {
        let base = Instant::now();
        let mut tracker = VelocityTracker::new();
        for i in 0..6 {
            // 10 px every 10 ms = 1000 px/s
            tracker.add(at(base, i * 10), Point::new(i as f64 * 10.0, 50.0));
        }
        let v = tracker.velocity();
        assert!((v.x - 1000.0).abs() < 1e-6, "vx = {}", v.x);
        assert!(v.y.abs() < 1e-6);
    }

    #[test]
    fn tracker_reports_zero_after_resting() {
        let base = Instant::now();
        let mut tracker = VelocityTracker::new();
        tracker.add(at(base, 0), Point::new(0.0, 0.0));
        tracker.add(at(base, 10), Point::new(10.0, 0.0));
        tracker.add(at(base, 200), Point::new(10.0, 0.0));
        assert_eq!(tracker.velocity(), Vec2::ZERO);
    }

    #[test]
    fn tracker_ignores_positions_outside_horizon() {
        let base = Instant::now();
        let mut tracker = VelocityTracker::new();
        // Slow early motion, a pause, then fast recent motion.
        for i in 0..10 {
            tracker.add(at(base, i * 30), Point::new(i as f64, 0.0));
        }
        for i in 0..5 {
            tracker.add(at(base, 320 + i * 10), Point::new(100.0 + i as f64 * 20.0, 0.0));
        }
        let v = tracker.velocity();
        assert!((v.x - 2000.0).abs() < 1.0, "vx = {}", v.x);
    }

    #[test]
    fn sampler_waits_for_slop_before_beginning() {
        let base = Instant::now();
        let mut sampler = GestureSampler::new();
        assert_eq!(sampler.process(&event(PointerKind::Down, 10.0, 20.0, base)), None);
        assert_eq!(
            sampler.process(&event(PointerKind::Move, 11.0, 20.0, at(base, 8))),
            None
        );
        assert!(!sampler.is_panning());

        let began = sampler
            .process(&event(PointerKind::Move, 20.0, 20.0, at(base, 16)))
            .expect("pan should begin past slop");
        assert_eq!(began.phase, GesturePhase::Began);
        assert_eq!(began.origin, Point::new(10.0, 20.0));
        assert!(sampler.is_panning());
    }

    #[test]
    fn sampler_reports_translation_from_press_origin() {
        let base = Instant::now();
        let mut sampler = GestureSampler::new();
        sampler.process(&event(PointerKind::Down, 10.0, 20.0, base));
        sampler.process(&event(PointerKind::Move, 20.0, 20.0, at(base, 10)));
        let changed = sampler
            .process(&event(PointerKind::Move, 70.0, 25.0, at(base, 20)))
            .unwrap();
        assert_eq!(changed.phase, GesturePhase::Changed);
        assert_eq!(changed.translation, Vec2::new(60.0, 5.0));
        assert!(changed.velocity_x() > 0.0);

        let ended = sampler
            .process(&event(PointerKind::Up, 80.0, 25.0, at(base, 30)))
            .unwrap();
        assert_eq!(ended.phase, GesturePhase::Ended);
        assert_eq!(ended.translation_x(), 70.0);
        assert!(!sampler.is_panning());
    }

    #[test]
    fn tap_produces_no_samples() {
        let base = Instant::now();
        let mut sampler = GestureSampler::new();
        assert_eq!(sampler.process(&event(PointerKind::Down, 5.0, 5.0, base)), None);
        assert_eq!(
            sampler.process(&event(PointerKind::Up, 5.0, 5.0, at(base, 50))),
            None
        );
    }

    #[test]
    fn cancel_while_panning_emits_cancelled() {
        let base = Instant::now();
        let mut sampler = GestureSampler::new();
        sampler.process(&event(PointerKind::Down, 0.0, 0.0, base));
        sampler.process(&event(PointerKind::Move, 30.0, 0.0, at(base, 10)));
        let cancelled = sampler
            .process(&event(PointerKind::Cancel, 40.0, 0.0, at(base, 20)))
            .unwrap();
        assert_eq!(cancelled.phase, GesturePhase::Cancelled);
        assert!(cancelled.phase.is_terminal());
    }

    #[test]
    fn out_of_sequence_pointer_events_are_dropped() {
        let base = Instant::now();
        let mut sampler = GestureSampler::new();
        assert_eq!(sampler.process(&event(PointerKind::Move, 50.0, 0.0, base)), None);
        assert_eq!(sampler.process(&event(PointerKind::Up, 50.0, 0.0, base)), None);

        sampler.process(&event(PointerKind::Down, 0.0, 0.0, base));
        assert_eq!(sampler.process(&event(PointerKind::Down, 90.0, 0.0, base)), None);
        let began = sampler
            .process(&event(PointerKind::Move, 10.0, 0.0, at(base, 10)))
            .unwrap();
        assert_eq!(began.origin, Point::new(0.0, 0.0));
    }

    #[test]
    fn normalized_sample_mirrors_horizontal_axis_only() {
        let sample = GestureSample::changed(
            Point::new(300.0, 10.0),
            Vec2::new(-40.0, 3.0),
            Vec2::new(-500.0, 20.0),
        );
        let mirrored = sample.normalized(MenuSide::Right);
        assert_eq!(mirrored.translation, Vec2::new(40.0, 3.0));
        assert_eq!(mirrored.velocity, Vec2::new(500.0, 20.0));
        assert_eq!(mirrored.origin, sample.origin);
        assert_eq!(sample.normalized(MenuSide::Left), sample);
    }

    #[test]
    fn horizontal_check_compares_velocity_magnitudes() {
        let origin = Point::ORIGIN;
        assert!(GestureSample::began(origin, Vec2::new(-300.0, 100.0)).is_primarily_horizontal());
        assert!(!GestureSample::began(origin, Vec2::new(50.0, -400.0)).is_primarily_horizontal());
        assert!(GestureSample::began(origin, Vec2::ZERO).is_primarily_horizontal());
    }
}
