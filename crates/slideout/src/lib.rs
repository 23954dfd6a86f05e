#![forbid(unsafe_code)]

//! Gesture-driven slideout (hamburger) menu container.
//!
//! # Role in Slideout
//! `slideout` is the public entry point. It wires the toolkit-independent
//! pieces from `slideout-core` (gesture sampling, reveal math, settle
//! decision, animation driver) into a [`SlideoutController`] that a host UI
//! feeds with pan samples and frame ticks.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut slideout = SlideoutController::new(SlideoutConfig::default(), main, menu)?
//!     .with_strategy(FlyinSlide::new())
//!     .with_bounds(Rect::new(0.0, 0.0, 320.0, 480.0));
//!
//! slideout.handle_pointer(&event);
//! while slideout.tick(frame_delta) {}
//! ```
//!
//! # Feature Flags
//! - `config` (default): load [`SlideoutConfig`] from TOML or JSON.

pub mod config;
pub mod content;
pub mod controller;
pub mod error;
pub mod state;
pub mod strategy;

pub use config::{ConfigError, NAVIGATION_BAR_BAND, SlideHandle, SlideoutConfig};
pub use content::{ContentHost, MainContent, MenuContent, MenuLifecycle, SlideFrame};
pub use controller::SlideoutController;
pub use error::{Result, SlideoutError};
pub use state::{OpenState, SlideoutPhase};
pub use strategy::{FlyinSlide, SimpleSlide, SlideStrategy};

pub use slideout_core::{
    AnimationOutcome, Easing, GesturePhase, GestureSample, MenuSide, PointerEvent, PointerKind,
    RevealTarget, ThresholdBoundary,
};
pub use slideout_core::geometry::{Affine, Point, Rect, Vec2};
pub use slideout_core::gesture::Instant;
