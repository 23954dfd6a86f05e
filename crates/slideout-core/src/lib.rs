#![forbid(unsafe_code)]

//! Core: gesture sampling, reveal math, and settle animation for slideout menus.
//!
//! # Role in Slideout
//! `slideout-core` holds everything about a slideout menu that does not depend
//! on a host toolkit. The orchestrating controller lives in the `slideout`
//! crate and only wires these pieces together.
//!
//! # Primary responsibilities
//! - **GestureSampler**: turns raw pointer events into pan samples with
//!   translation and velocity.
//! - **Reveal percentage**: maps a horizontal translation onto a clamped
//!   `[0, 1]` reveal value.
//! - **Settle decision**: picks the snap target and duration when a drag ends.
//! - **AnimationDriver**: tick-driven interpolation toward a snap target with
//!   last-writer-wins cancellation.
//!
//! # Conventions
//! All horizontal quantities handed to [`percentage`] and [`decision`] are
//! normalized so that positive values point toward "open". Use
//! [`geometry::MenuSide::normalize`] to mirror raw samples for a right-hand menu.

pub mod animation;
pub mod decision;
pub mod geometry;
pub mod gesture;
pub mod logging;
pub mod percentage;

pub use animation::{AnimationDriver, AnimationId, AnimationOutcome, Easing};
pub use decision::{DecisionConfig, Settle, ThresholdBoundary, decide, settle_duration};
pub use geometry::{MenuSide, SlideGeometry};
pub use gesture::{GesturePhase, GestureSample, GestureSampler, PointerEvent, PointerKind};
pub use percentage::{RevealTarget, reveal_percentage, reveal_percentage_from};
