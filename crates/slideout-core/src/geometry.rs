#![forbid(unsafe_code)]

//! Geometry shared by gesture sampling and interpolation strategies.
//!
//! Points, vectors, and transforms come from `kurbo`. This module adds the two
//! slideout-specific notions on top: which edge the menu hangs off
//! ([`MenuSide`]) and the container measurements a strategy interpolates
//! against ([`SlideGeometry`]).

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// The container edge a menu is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MenuSide {
    /// Menu sits under the left edge; dragging right reveals it.
    #[default]
    Left,
    /// Menu sits under the right edge; dragging left reveals it.
    Right,
}

impl MenuSide {
    /// Horizontal sign of the "toward open" direction in host coordinates.
    #[inline]
    #[must_use]
    pub fn direction(self) -> f64 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
        }
    }

    /// Map a host-space horizontal quantity into "positive = toward open" space.
    ///
    /// The mapping is its own inverse, so it also converts back.
    #[inline]
    #[must_use]
    pub fn normalize(self, dx: f64) -> f64 {
        dx * self.direction()
    }
}

/// Container measurements handed to interpolation strategies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideGeometry {
    /// Bounds of the slideout container in host coordinates.
    pub bounds: Rect,
    /// Horizontal extent of the revealed menu.
    pub menu_width: f64,
}

impl SlideGeometry {
    /// Create geometry for a container with the given bounds and menu width.
    #[must_use]
    pub fn new(bounds: Rect, menu_width: f64) -> Self {
        Self { bounds, menu_width }
    }

    /// Container width.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    /// Container height.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bounds.height()
    }
}
