#![forbid(unsafe_code)]

//! Slideout controller: the open/close state machine.
//!
//! [`SlideoutController`] owns the main and menu content, the committed
//! [`OpenState`], and an [`AnimationDriver`] for the visual reveal. Pan
//! samples, programmatic requests, and frame ticks all funnel through it.
//!
//! # State machine
//!
//! ```text
//!            begin drag                      release / cancel
//!  Closed ─────────────────▶ Dragging ──────────────────────────▶ settle ─▶ Closed | Open
//!    ▲  open(animated)                                                         │
//!    └──────────────────────────── close(animated) / tap outside ◀─────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. `is_open()` changes only when a settle completes, never mid-drag.
//!    After a completed settle the reveal percentage is exactly 0 or 1 and
//!    agrees with `is_open()`.
//! 2. Every completion callback passed to [`open_with`](SlideoutController::open_with)
//!    or [`close_with`](SlideoutController::close_with) fires exactly once.
//! 3. The newest request always wins: a new drag or request supersedes any
//!    settle in flight.
//! 4. `will_appear`/`will_disappear` fire when a settle toward the other
//!    state begins; the matching `did_*` fires when the latest settle completes.
//!    A settle that snaps back fires nothing.
//!
//! # Failure Modes
//!
//! - Out-of-sequence gesture samples are dropped with a warning.
//! - Opening while the menu is disabled completes with
//!   [`AnimationOutcome::Rejected`].
//! - Invalid configuration values are refused by the setters and leave the
//!   previous value in place.

use std::fmt;
use std::time::Duration;

use slideout_core::animation::{AnimationDriver, AnimationOutcome, Easing, Launch, Settled};
use slideout_core::decision::{ThresholdBoundary, decide};
use slideout_core::geometry::{MenuSide, Rect, SlideGeometry};
use slideout_core::gesture::{GesturePhase, GestureSample, GestureSampler, PointerEvent};
use slideout_core::logging::{debug, debug_span, trace, warn};
use slideout_core::percentage::{RevealTarget, reveal_percentage_from};

use crate::config::{
    SlideHandle, SlideoutConfig, check_animation_duration, check_menu_width,
    check_threshold_fraction, check_velocity_trigger,
};
use crate::content::{ContentHost, MainContent, MenuContent, MenuLifecycle, SlideFrame};
use crate::error::{Result, SlideoutError};
use crate::state::{OpenState, SlideoutPhase};
use crate::strategy::{SimpleSlide, SlideStrategy};

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

/// Frozen inputs of the drag in progress.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    open_at_start: bool,
    origin_percentage: f64,
}

/// Borrowed rendering target, split from the driver so both can be used at once.
struct Surface<'a> {
    strategy: &'a dyn SlideStrategy,
    main: &'a mut Box<dyn MainContent>,
    menu: &'a mut Box<dyn MenuContent>,
    geometry: SlideGeometry,
    side: MenuSide,
}

impl Surface<'_> {
    fn paint(&mut self, percentage: f64) {
        let frame = self.strategy.frame(percentage, &self.geometry, self.side);
        self.main.render(&frame);
        self.menu.render(&frame);
    }
}

// ---------------------------------------------------------------------------
// SlideoutController
// ---------------------------------------------------------------------------

/// Gesture-driven slideout menu container.
pub struct SlideoutController {
    config: SlideoutConfig,
    state: OpenState,
    driver: AnimationDriver,
    bounds: Rect,
    strategy: Box<dyn SlideStrategy>,
    main: Box<dyn MainContent>,
    menu: Box<dyn MenuContent>,
    sampler: GestureSampler,
    drag: Option<DragSession>,
    /// Swallow the rest of a pointer pan that was refused or abandoned.
    ignore_pan: bool,
    /// Visibility last announced through a `will_*` hook.
    announced_visible: bool,
    /// A `will_*` hook fired and its `did_*` is still owed.
    did_owed: bool,
}

impl fmt::Debug for SlideoutController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlideoutController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("driver", &self.driver)
            .field("bounds", &self.bounds)
            .field("dragging", &self.drag.is_some())
            .finish()
    }
}

impl SlideoutController {
    /// Create a closed controller. Fails if `config` does not validate.
    pub fn new(
        config: SlideoutConfig,
        main: Box<dyn MainContent>,
        menu: Box<dyn MenuContent>,
    ) -> Result<Self> {
        config.validate()?;
        debug!(
            menu_width = config.menu_width,
            side = ?config.menu_side,
            enabled = config.menu_enabled,
            "slideout created"
        );
        Ok(Self {
            state: OpenState::new(config.menu_enabled),
            driver: AnimationDriver::new(0.0).with_easing(config.easing),
            config,
            bounds: Rect::ZERO,
            strategy: Box::new(SimpleSlide),
            main,
            menu,
            sampler: GestureSampler::new(),
            drag: None,
            ignore_pan: false,
            announced_visible: false,
            did_owed: false,
        })
    }

    /// Use `strategy` to interpolate frames (builder pattern).
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl SlideStrategy + 'static) -> Self {
        self.strategy = Box::new(strategy);
        self
    }

    /// Set the container bounds (builder pattern).
    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    // -- Queries -----------------------------------------------------------

    /// Whether the last completed transition left the menu open.
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Whether the menu can be reached.
    #[inline]
    #[must_use]
    pub fn is_menu_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether a settle animation needs further [`tick`](Self::tick)s.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    /// Current visual reveal percentage.
    #[inline]
    #[must_use]
    pub fn reveal_percentage(&self) -> f64 {
        self.driver.percentage()
    }

    /// Observable phase.
    #[must_use]
    pub fn phase(&self) -> SlideoutPhase {
        if self.drag.is_some() {
            SlideoutPhase::Dragging
        } else if self.state.is_open() {
            SlideoutPhase::Open
        } else {
            SlideoutPhase::Closed
        }
    }

    /// Active configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SlideoutConfig {
        &self.config
    }

    /// Container bounds.
    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Frame for the current reveal percentage.
    #[must_use]
    pub fn frame(&self) -> SlideFrame {
        self.strategy
            .frame(self.driver.percentage(), &self.geometry(), self.config.menu_side)
    }

    // -- Programmatic requests ---------------------------------------------

    /// Open the menu. `animated = false` applies the change synchronously.
    pub fn open(&mut self, animated: bool) {
        self.request(RevealTarget::Open, animated, |_| {});
    }

    /// Close the menu. `animated = false` applies the change synchronously.
    pub fn close(&mut self, animated: bool) {
        self.request(RevealTarget::Closed, animated, |_| {});
    }

    /// Open the menu and report how the request ended.
    pub fn open_with(&mut self, animated: bool, on_complete: impl FnOnce(AnimationOutcome) + 'static) {
        self.request(RevealTarget::Open, animated, on_complete);
    }

    /// Close the menu and report how the request ended.
    pub fn close_with(&mut self, animated: bool, on_complete: impl FnOnce(AnimationOutcome) + 'static) {
        self.request(RevealTarget::Closed, animated, on_complete);
    }

    /// Flip toward the state opposite to where the menu is heading.
    pub fn toggle(&mut self, animated: bool) {
        let heading = self
            .driver
            .in_flight_target()
            .unwrap_or_else(|| RevealTarget::from_open(self.state.is_open()));
        self.request(heading.toggled(), animated, |_| {});
    }

    /// A tap landed on the main content. Closes the menu if it is open or
    /// opening; returns whether the tap was consumed.
    pub fn tap_main_content(&mut self) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let showing = self.state.is_open()
            || self.driver.in_flight_target() == Some(RevealTarget::Open);
        if showing && !self.closing() {
            debug!("tap outside menu");
            self.close(true);
        }
        showing
    }

    /// The host is about to rotate. Closes the menu if the strategy asks for it.
    pub fn will_rotate(&mut self) {
        if self.strategy.closes_on_rotation()
            && self.driver.percentage() > 0.0
            && !self.closing()
        {
            debug!("closing for rotation");
            self.close(true);
        }
    }

    // -- Gesture input -----------------------------------------------------

    /// Feed one pan sample in host coordinates.
    pub fn handle_gesture(&mut self, sample: &GestureSample) {
        let sample = sample.normalized(self.config.menu_side);
        match sample.phase {
            GesturePhase::Began => self.begin_drag(&sample),
            GesturePhase::Changed => self.update_drag(&sample),
            GesturePhase::Ended | GesturePhase::Cancelled => self.end_drag(&sample),
        }
    }

    /// Feed one raw pointer event.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        let Some(sample) = self.sampler.process(event) else {
            return;
        };
        if sample.phase == GesturePhase::Began {
            self.ignore_pan = false;
        } else if self.ignore_pan {
            if sample.phase.is_terminal() {
                self.ignore_pan = false;
            }
            trace!(phase = ?sample.phase, "ignored pan sample");
            return;
        }

        self.handle_gesture(&sample);
        if sample.phase == GesturePhase::Began && self.drag.is_none() {
            self.ignore_pan = true;
        }
    }

    fn begin_drag(&mut self, sample: &GestureSample) {
        if self.drag.is_some() {
            warn!("began sample during drag dropped");
            return;
        }
        if !self.state.is_enabled() {
            debug!("pan refused: menu disabled");
            return;
        }
        if !sample.is_primarily_horizontal() {
            debug!(vx = sample.velocity.x, vy = sample.velocity.y, "pan refused: vertical");
            return;
        }

        let open_at_start = self.state.is_open();
        let visible = open_at_start || self.driver.percentage() > 0.0;
        let y = sample.origin.y - self.bounds.y0;
        if !visible && !self.config.slide_handle.admits(y) {
            debug!(y, handle = ?self.config.slide_handle, "pan refused: outside slide handle");
            return;
        }

        self.driver.cancel();
        let origin_percentage = self.driver.percentage();
        debug!(open_at_start, origin_percentage, "drag began");
        self.drag = Some(DragSession {
            open_at_start,
            origin_percentage,
        });
        self.follow(sample);
    }

    fn update_drag(&mut self, sample: &GestureSample) {
        if self.drag.is_none() {
            warn!(phase = ?sample.phase, "pan sample without drag dropped");
            return;
        }
        self.follow(sample);
    }

    fn end_drag(&mut self, sample: &GestureSample) {
        if self.drag.is_none() {
            warn!(phase = ?sample.phase, "pan sample without drag dropped");
            return;
        }
        let percentage = self.follow(sample);
        let Some(drag) = self.drag.take() else {
            return;
        };

        let span = debug_span!("slideout.settle", open_at_start = drag.open_at_start);
        let _guard = span.enter();
        let settle = decide(
            percentage,
            sample.velocity_x(),
            drag.open_at_start,
            &self.config.to_decision_config(),
        );
        debug!(
            percentage,
            velocity = sample.velocity_x(),
            cancelled = sample.phase == GesturePhase::Cancelled,
            target = ?settle.target,
            duration = ?settle.duration,
            "drag released"
        );
        self.launch(settle.target, settle.duration, |_| {});
    }

    /// Track the active drag to `sample`, returning the new percentage.
    fn follow(&mut self, sample: &GestureSample) -> f64 {
        let origin = self.drag.map_or(0.0, |d| d.origin_percentage);
        let percentage =
            reveal_percentage_from(origin, sample.translation_x(), self.config.menu_width);
        trace!(dx = sample.translation_x(), percentage, "drag moved");
        let (driver, mut surface) = self.split();
        driver.run_continuous(percentage, |p| surface.paint(p));
        percentage
    }

    // -- Frame clock -------------------------------------------------------

    /// Advance the settle animation by `delta`. Returns whether more ticks
    /// are needed.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let (driver, mut surface) = self.split();
        let settled = driver.tick(delta, |p| surface.paint(p));
        if let Some(settled) = settled {
            self.settled(settled);
        }
        self.driver.is_animating()
    }

    /// Repaint both contents at the current percentage.
    pub fn refresh(&mut self) {
        let percentage = self.driver.percentage();
        let (_, mut surface) = self.split();
        surface.paint(percentage);
    }

    // -- Content -----------------------------------------------------------

    /// Replace the main content, returning the previous one.
    pub fn set_main_content(&mut self, content: Box<dyn MainContent>) -> Result<Box<dyn MainContent>> {
        if self.drag.is_some() {
            return Err(SlideoutError::DragInProgress);
        }
        let old = std::mem::replace(&mut self.main, content);
        self.refresh();
        debug!("main content replaced");
        Ok(old)
    }

    /// Replace the menu content, returning the previous one.
    ///
    /// Lifecycle hooks are not replayed on the new menu.
    pub fn set_menu_content(&mut self, content: Box<dyn MenuContent>) -> Result<Box<dyn MenuContent>> {
        if self.drag.is_some() {
            return Err(SlideoutError::DragInProgress);
        }
        let old = std::mem::replace(&mut self.menu, content);
        self.refresh();
        debug!("menu content replaced");
        Ok(old)
    }

    // -- Configuration -----------------------------------------------------

    /// Enable or disable the menu. Disabling closes it (animated) unless it
    /// is already closed or closing.
    pub fn set_menu_enabled(&mut self, enabled: bool) {
        if self.state.set_enabled(enabled) {
            debug!(enabled, "menu enabled changed");
        }
        self.config.menu_enabled = enabled;
        let at_rest_closed = self.drag.is_none()
            && !self.driver.is_animating()
            && !self.state.is_open()
            && self.driver.percentage() == 0.0;
        if !enabled && !at_rest_closed && !self.closing() {
            self.close(true);
        }
    }

    /// Set the menu width. Refused unless finite and positive.
    pub fn set_menu_width(&mut self, width: f64) -> Result<()> {
        self.config.menu_width = check_menu_width(width).inspect_err(log_rejected)?;
        self.refresh();
        Ok(())
    }

    /// Set the flick speed that flips state on release. Refused unless finite
    /// and positive.
    pub fn set_velocity_trigger(&mut self, trigger: f64) -> Result<()> {
        self.config.velocity_trigger = check_velocity_trigger(trigger).inspect_err(log_rejected)?;
        Ok(())
    }

    /// Set the distance threshold. Refused outside `(0, 1)`.
    pub fn set_threshold_fraction(&mut self, fraction: f64) -> Result<()> {
        self.config.threshold_fraction =
            check_threshold_fraction(fraction).inspect_err(log_rejected)?;
        Ok(())
    }

    /// Set the base settle duration. Refused if zero.
    pub fn set_animation_duration(&mut self, duration: Duration) -> Result<()> {
        self.config.animation_duration =
            check_animation_duration(duration).inspect_err(log_rejected)?;
        Ok(())
    }

    /// Set how releases exactly on the threshold are settled, for drags that
    /// start closed and drags that start open respectively.
    pub fn set_threshold_boundaries(&mut self, open: ThresholdBoundary, close: ThresholdBoundary) {
        self.config.open_boundary = open;
        self.config.close_boundary = close;
    }

    /// Set the band from which a closed menu can be dragged open.
    pub fn set_slide_handle(&mut self, handle: SlideHandle) {
        self.config.slide_handle = handle;
    }

    /// Attach the menu to the other edge. Repaints immediately.
    pub fn set_menu_side(&mut self, side: MenuSide) {
        self.config.menu_side = side;
        self.refresh();
    }

    /// Set the curve used by later settles.
    pub fn set_easing(&mut self, easing: Easing) {
        self.config.easing = easing;
        self.driver.set_easing(easing);
    }

    /// Replace the visual strategy. Repaints immediately.
    pub fn set_strategy(&mut self, strategy: Box<dyn SlideStrategy>) {
        self.strategy = strategy;
        self.refresh();
    }

    /// Resize the container. Repaints immediately.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.refresh();
    }

    // -- Internals ---------------------------------------------------------

    fn closing(&self) -> bool {
        self.driver.in_flight_target() == Some(RevealTarget::Closed)
    }

    fn geometry(&self) -> SlideGeometry {
        SlideGeometry::new(self.bounds, self.config.menu_width)
    }

    fn split(&mut self) -> (&mut AnimationDriver, Surface<'_>) {
        let geometry = self.geometry();
        let surface = Surface {
            strategy: self.strategy.as_ref(),
            main: &mut self.main,
            menu: &mut self.menu,
            geometry,
            side: self.config.menu_side,
        };
        (&mut self.driver, surface)
    }

    fn request(
        &mut self,
        target: RevealTarget,
        animated: bool,
        on_complete: impl FnOnce(AnimationOutcome) + 'static,
    ) {
        if target.is_open() && !self.state.is_enabled() {
            debug!("open refused: menu disabled");
            on_complete(AnimationOutcome::Rejected);
            return;
        }
        if self.drag.take().is_some() {
            debug!("drag abandoned for programmatic request");
            self.ignore_pan = self.sampler.is_panning();
        }
        let duration = if animated {
            self.config.animation_duration
        } else {
            Duration::ZERO
        };
        debug!(?target, animated, "programmatic request");
        self.launch(target, duration, on_complete);
    }

    fn launch(
        &mut self,
        target: RevealTarget,
        duration: Duration,
        on_complete: impl FnOnce(AnimationOutcome) + 'static,
    ) {
        self.announce(target);
        let (driver, mut surface) = self.split();
        let launch = driver.run_to_target(target, duration, |p| surface.paint(p), on_complete);
        match launch {
            Launch::Started(id) => trace!(id = id.get(), "settle in flight"),
            Launch::Completed(settled) => self.settled(settled),
        }
    }

    /// Fire `will_*` if `target` changes the announced visibility.
    fn announce(&mut self, target: RevealTarget) {
        let visible = target.is_open();
        if visible == self.announced_visible {
            return;
        }
        self.announced_visible = visible;
        self.did_owed = true;
        let hook = if visible {
            MenuLifecycle::WillAppear
        } else {
            MenuLifecycle::WillDisappear
        };
        trace!(?hook, "menu lifecycle");
        hook.dispatch(self.menu.as_mut());
    }

    /// Commit a completed settle and pay any owed `did_*` hook.
    fn settled(&mut self, settled: Settled) {
        let open = settled.target.is_open();
        if self.state.commit(open) {
            debug!(open, id = settled.id.get(), "state committed");
        }
        if std::mem::take(&mut self.did_owed) {
            let hook = if open {
                MenuLifecycle::DidAppear
            } else {
                MenuLifecycle::DidDisappear
            };
            trace!(?hook, "menu lifecycle");
            hook.dispatch(self.menu.as_mut());
        }
    }
}

#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn log_rejected(err: &SlideoutError) {
    warn!(%err, "setting rejected");
}

impl ContentHost for SlideoutController {
    fn on_push_requested(&mut self, content: Box<dyn MainContent>, animated: bool) -> Result<()> {
        self.set_main_content(content)?;
        self.close(animated);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
