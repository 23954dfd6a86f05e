#![forbid(unsafe_code)]

//! Interpolation strategies: how a reveal percentage looks on screen.
//!
//! A [`SlideStrategy`] maps a percentage onto a pair of affine transforms, one
//! for the main content and one for the menu. Transforms are expressed in
//! container coordinates and mirrored for a right-hand menu.
//!
//! # Invariants
//!
//! At percentage 0 every strategy leaves the main content untransformed.
//! The menu may be parked off-screen (see [`FlyinSlide`]).

use slideout_core::geometry::{Affine, MenuSide, SlideGeometry, Vec2};

use crate::content::SlideFrame;

/// Pluggable interpolation policy.
pub trait SlideStrategy {
    /// Visual state at `percentage` (in `[0, 1]`).
    fn frame(&self, percentage: f64, geometry: &SlideGeometry, side: MenuSide) -> SlideFrame;

    /// Whether the container should close the menu when the device rotates.
    fn closes_on_rotation(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// SimpleSlide
// ---------------------------------------------------------------------------

/// Slides the main content sideways by `menu_width * percentage`, uncovering a
/// stationary menu.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimpleSlide;

impl SlideStrategy for SimpleSlide {
    fn frame(&self, percentage: f64, geometry: &SlideGeometry, side: MenuSide) -> SlideFrame {
        let dx = side.normalize(geometry.menu_width * percentage);
        SlideFrame {
            percentage,
            main: Affine::translate(Vec2::new(dx, 0.0)),
            menu: Affine::IDENTITY,
        }
    }
}

// ---------------------------------------------------------------------------
// FlyinSlide
// ---------------------------------------------------------------------------

/// Default visible sliver of main content when fully open.
pub const DEFAULT_HORIZONTAL_OPEN_OFFSET: f64 = 40.0;

/// Default fraction the main content shrinks by when fully open.
pub const DEFAULT_ZOOM: f64 = 0.6;

/// Shrinks the main content toward a sliver at the far edge while the menu
/// flies in from off-screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyinSlide {
    zoom: f64,
    horizontal_open_offset: f64,
}

impl Default for FlyinSlide {
    fn default() -> Self {
        Self::new()
    }
}

impl FlyinSlide {
    /// Flyin with the stock zoom and offset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            horizontal_open_offset: DEFAULT_HORIZONTAL_OPEN_OFFSET,
        }
    }

    /// Set the shrink fraction, clamped to `[0, 1)`.
    #[must_use]
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = if zoom.is_nan() { 0.0 } else { zoom.clamp(0.0, 0.99) };
        self
    }

    /// Set how much of the main content stays visible when fully open.
    #[must_use]
    pub fn with_horizontal_open_offset(mut self, offset: f64) -> Self {
        self.horizontal_open_offset = offset;
        self
    }

    #[inline]
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[inline]
    #[must_use]
    pub fn horizontal_open_offset(&self) -> f64 {
        self.horizontal_open_offset
    }
}

impl SlideStrategy for FlyinSlide {
    fn frame(&self, percentage: f64, geometry: &SlideGeometry, side: MenuSide) -> SlideFrame {
        let travel = (geometry.width() - self.horizontal_open_offset).max(0.0);
        let dx = side.normalize(travel * percentage);
        let scale = 1.0 - percentage * self.zoom;
        let center = geometry.bounds.center().to_vec2();

        // Scale about the container center, then slide.
        let main = Affine::translate(Vec2::new(dx, 0.0))
            * Affine::translate(center)
            * Affine::scale(scale)
            * Affine::translate(-center);

        let menu_dx = -side.normalize(geometry.menu_width * (1.0 - percentage));
        SlideFrame {
            percentage,
            main,
            menu: Affine::translate(Vec2::new(menu_dx, 0.0)),
        }
    }

    fn closes_on_rotation(&self) -> bool {
        true
    }
}
