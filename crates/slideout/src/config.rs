#![forbid(unsafe_code)]

//! Slideout configuration.
//!
//! [`SlideoutConfig`] gathers every tunable of a slideout container. It is a
//! plain struct with builder-style setters and a [`Default`] matching the
//! stock behaviour; with the `config` feature it can also be loaded from TOML
//! or JSON.
//!
//! # Loading
//!
//! ```toml
//! # slideout.toml
//! menu_width = 280.0
//! velocity_trigger = 900.0
//! threshold_fraction = 0.4
//! animation_duration = 0.25
//! slide_handle = "full"
//! menu_side = "right"
//! open_boundary = "exclusive"
//! close_boundary = "inclusive"
//! ```
//!
//! ```rust,ignore
//! let config = SlideoutConfig::from_toml_file("slideout.toml")?;
//! let config = SlideoutConfig::from_json_str(json)?;
//! ```
//!
//! # Invariants
//!
//! A config accepted by [`SlideoutConfig::validate`] has a finite positive
//! menu width and velocity trigger, a threshold strictly inside `(0, 1)`,
//! and a non-zero animation duration. The loaders validate before returning.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use slideout_core::{DecisionConfig, Easing, MenuSide, ThresholdBoundary};

use crate::error::{Result, SlideoutError};

/// Height of the navigation-bar slide handle band, measured from the top of
/// the container.
pub const NAVIGATION_BAR_BAND: f64 = 64.0;

// ---------------------------------------------------------------------------
// Slide handle
// ---------------------------------------------------------------------------

/// Vertical band of the container from which a closed menu can be pulled open.
///
/// An open menu can always be dragged closed from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum SlideHandle {
    /// Pan gestures never open the menu.
    None,
    /// Only the top navigation-bar band opens the menu.
    #[default]
    NavigationBar,
    /// The whole container opens the menu.
    Full,
}

impl SlideHandle {
    /// Whether a touch `y` units below the container top may begin an opening drag.
    #[must_use]
    pub fn admits(self, y: f64) -> bool {
        match self {
            Self::None => false,
            Self::NavigationBar => y <= NAVIGATION_BAR_BAND,
            Self::Full => true,
        }
    }
}

// ---------------------------------------------------------------------------
// SlideoutConfig
// ---------------------------------------------------------------------------

/// Tunables for a slideout container.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SlideoutConfig {
    /// Horizontal extent of the revealed menu.
    pub menu_width: f64,
    /// Release speed (units/s) that flips state regardless of distance.
    pub velocity_trigger: f64,
    /// Fraction of the menu width a drag must cover to flip state.
    pub threshold_fraction: f64,
    /// Whether a closed-start drag landing exactly on the threshold opens.
    /// Exclusive by default.
    pub open_boundary: ThresholdBoundary,
    /// Whether an open-start drag landing exactly on `1 - threshold` closes.
    /// Inclusive by default.
    pub close_boundary: ThresholdBoundary,
    /// Base open/close animation duration (seconds in config files).
    #[cfg_attr(
        feature = "config",
        serde(
            serialize_with = "serialize_seconds",
            deserialize_with = "deserialize_seconds"
        )
    )]
    pub animation_duration: Duration,
    /// Band from which a closed menu can be dragged open.
    pub slide_handle: SlideHandle,
    /// Container edge the menu is attached to.
    pub menu_side: MenuSide,
    /// Easing curve for settle animations.
    pub easing: Easing,
    /// Whether the menu can be reached at all.
    pub menu_enabled: bool,
}

impl Default for SlideoutConfig {
    fn default() -> Self {
        Self {
            menu_width: 260.0,
            velocity_trigger: 800.0,
            threshold_fraction: 0.33,
            open_boundary: ThresholdBoundary::Exclusive,
            close_boundary: ThresholdBoundary::Inclusive,
            animation_duration: Duration::from_millis(200),
            slide_handle: SlideHandle::default(),
            menu_side: MenuSide::default(),
            easing: Easing::default(),
            menu_enabled: true,
        }
    }
}

impl SlideoutConfig {
    /// Set the menu width.
    #[must_use]
    pub fn menu_width(mut self, width: f64) -> Self {
        self.menu_width = width;
        self
    }

    /// Set the flick velocity trigger.
    #[must_use]
    pub fn velocity_trigger(mut self, trigger: f64) -> Self {
        self.velocity_trigger = trigger;
        self
    }

    /// Set the distance threshold fraction.
    #[must_use]
    pub fn threshold_fraction(mut self, fraction: f64) -> Self {
        self.threshold_fraction = fraction;
        self
    }

    /// Set the threshold boundary for drags that start closed.
    #[must_use]
    pub fn open_boundary(mut self, boundary: ThresholdBoundary) -> Self {
        self.open_boundary = boundary;
        self
    }

    /// Set the threshold boundary for drags that start open.
    #[must_use]
    pub fn close_boundary(mut self, boundary: ThresholdBoundary) -> Self {
        self.close_boundary = boundary;
        self
    }

    /// Set the base animation duration.
    #[must_use]
    pub fn animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Set the slide handle band.
    #[must_use]
    pub fn slide_handle(mut self, handle: SlideHandle) -> Self {
        self.slide_handle = handle;
        self
    }

    /// Set the menu side.
    #[must_use]
    pub fn menu_side(mut self, side: MenuSide) -> Self {
        self.menu_side = side;
        self
    }

    /// Set the settle easing.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set whether the menu starts enabled.
    #[must_use]
    pub fn menu_enabled(mut self, enabled: bool) -> Self {
        self.menu_enabled = enabled;
        self
    }

    /// Check every numeric field, reporting the first offender.
    pub fn validate(&self) -> Result<()> {
        check_menu_width(self.menu_width)?;
        check_velocity_trigger(self.velocity_trigger)?;
        check_threshold_fraction(self.threshold_fraction)?;
        check_animation_duration(self.animation_duration)?;
        Ok(())
    }

    /// Parameters for the settle decision.
    #[must_use]
    pub fn to_decision_config(&self) -> DecisionConfig {
        DecisionConfig {
            threshold_fraction: self.threshold_fraction,
            velocity_trigger: self.velocity_trigger,
            base_duration: self.animation_duration,
            open_boundary: self.open_boundary,
            close_boundary: self.close_boundary,
        }
    }

    /// Load and validate from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load and validate from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> std::result::Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Field checks (shared with the controller setters)
// ---------------------------------------------------------------------------

pub(crate) fn check_menu_width(width: f64) -> Result<f64> {
    if width.is_finite() && width > 0.0 {
        Ok(width)
    } else {
        Err(SlideoutError::invalid(
            "menu_width",
            width,
            "must be finite and greater than zero",
        ))
    }
}

pub(crate) fn check_velocity_trigger(trigger: f64) -> Result<f64> {
    if trigger.is_finite() && trigger > 0.0 {
        Ok(trigger)
    } else {
        Err(SlideoutError::invalid(
            "velocity_trigger",
            trigger,
            "must be finite and greater than zero",
        ))
    }
}

pub(crate) fn check_threshold_fraction(fraction: f64) -> Result<f64> {
    if fraction > 0.0 && fraction < 1.0 {
        Ok(fraction)
    } else {
        Err(SlideoutError::invalid(
            "threshold_fraction",
            fraction,
            "must lie strictly between 0 and 1",
        ))
    }
}

pub(crate) fn check_animation_duration(duration: Duration) -> Result<Duration> {
    if duration.is_zero() {
        Err(SlideoutError::invalid(
            "animation_duration",
            0.0,
            "must be greater than zero",
        ))
    } else {
        Ok(duration)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading a [`SlideoutConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Parsed, but a value is out of range.
    #[error(transparent)]
    Invalid(#[from] SlideoutError),
}

// ---------------------------------------------------------------------------
// Serde helpers for Duration
// ---------------------------------------------------------------------------

#[cfg(feature = "config")]
fn serialize_seconds<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

#[cfg(feature = "config")]
fn deserialize_seconds<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs).map_err(|_| {
        serde::de::Error::custom(format!(
            "animation_duration must be a non-negative number of seconds, got {secs}"
        ))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
