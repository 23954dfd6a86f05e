#![forbid(unsafe_code)]

//! Reveal percentage: how far the menu is exposed, as a value in `[0, 1]`.
//!
//! The percentage is recomputed from scratch on every pan sample from two
//! frozen inputs (where the reveal stood when the drag began, and the menu
//! width) plus the sample's horizontal translation. Nothing here is stateful.
//!
//! # Invariants
//!
//! 1. The result is always in `[0.0, 1.0]`, for any translation including
//!    infinities and NaN.
//! 2. A drag that starts closed cannot go below 0 by dragging away from the
//!    menu; a drag that starts open cannot overshoot past 1.

/// One of the two resting states a settle animation can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealTarget {
    /// Menu hidden, percentage 0.
    Closed,
    /// Menu revealed, percentage 1.
    Open,
}

impl RevealTarget {
    /// Target matching an open/closed flag.
    #[inline]
    #[must_use]
    pub fn from_open(open: bool) -> Self {
        if open { Self::Open } else { Self::Closed }
    }

    /// Whether this is the open state.
    #[inline]
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Reveal percentage of this resting state.
    #[inline]
    #[must_use]
    pub fn percentage(self) -> f64 {
        match self {
            Self::Closed => 0.0,
            Self::Open => 1.0,
        }
    }

    /// The other resting state.
    #[inline]
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }
}

/// Reveal percentage for a drag that began fully closed or fully open.
///
/// - Started closed: `clamp(translation_x / menu_width, 0, 1)`.
/// - Started open: `clamp((menu_width + translation_x) / menu_width, 0, 1)`.
///
/// `translation_x` must already be normalized so positive points toward open.
/// `menu_width` is validated upstream; a non-positive width degenerates to the
/// resting percentage of the start state.
#[must_use]
pub fn reveal_percentage(translation_x: f64, open_at_start: bool, menu_width: f64) -> f64 {
    reveal_percentage_from(
        RevealTarget::from_open(open_at_start).percentage(),
        translation_x,
        menu_width,
    )
}

/// Reveal percentage for a drag that began at an arbitrary reveal `origin`.
///
/// Used when a drag interrupts a settle animation mid-flight. With `origin`
/// equal to 0 or 1 this is exactly [`reveal_percentage`].
#[must_use]
pub fn reveal_percentage_from(origin: f64, translation_x: f64, menu_width: f64) -> f64 {
    let origin = unit(origin);
    if !(menu_width > 0.0) {
        return origin;
    }
    let raw = origin + translation_x / menu_width;
    if raw.is_nan() { origin } else { unit(raw) }
}

/// Clamp to `[0, 1]`, mapping NaN to 0.
#[inline]
pub(crate) fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
