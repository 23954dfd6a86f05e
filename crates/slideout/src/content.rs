#![forbid(unsafe_code)]

//! Host-supplied content seams.
//!
//! The controller never inspects content. It hands [`MainContent`] and
//! [`MenuContent`] a [`SlideFrame`] to render, and calls the menu's lifecycle
//! hooks at the transition instants:
//!
//! - `will_appear` / `will_disappear` when a settle toward the other state begins;
//! - `did_appear` / `did_disappear` once that settle completes.
//!
//! A settle that snaps back to where it started fires no hooks.

use slideout_core::geometry::Affine;

/// Interpolated visual state for one reveal percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideFrame {
    /// Reveal percentage in `[0, 1]`.
    pub percentage: f64,
    /// Transform applied to the main content.
    pub main: Affine,
    /// Transform applied to the menu content.
    pub menu: Affine,
}

impl SlideFrame {
    /// Frame with both contents untransformed.
    #[must_use]
    pub fn identity(percentage: f64) -> Self {
        Self {
            percentage,
            main: Affine::IDENTITY,
            menu: Affine::IDENTITY,
        }
    }
}

/// Main content shown above the menu.
pub trait MainContent {
    /// Apply the frame's main-content transform.
    fn render(&mut self, frame: &SlideFrame);
}

/// Menu content revealed underneath the main content.
pub trait MenuContent {
    /// Apply the frame's menu transform.
    fn render(&mut self, frame: &SlideFrame);

    /// A settle toward open has begun.
    fn will_appear(&mut self) {}

    /// The settle toward open completed.
    fn did_appear(&mut self) {}

    /// A settle toward closed has begun.
    fn will_disappear(&mut self) {}

    /// The settle toward closed completed.
    fn did_disappear(&mut self) {}
}

/// Menu lifecycle hook, as seen by observers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuLifecycle {
    /// [`MenuContent::will_appear`].
    WillAppear,
    /// [`MenuContent::did_appear`].
    DidAppear,
    /// [`MenuContent::will_disappear`].
    WillDisappear,
    /// [`MenuContent::did_disappear`].
    DidDisappear,
}

impl MenuLifecycle {
    /// Invoke this hook on `menu`.
    pub fn dispatch(self, menu: &mut dyn MenuContent) {
        match self {
            Self::WillAppear => menu.will_appear(),
            Self::DidAppear => menu.did_appear(),
            Self::WillDisappear => menu.will_disappear(),
            Self::DidDisappear => menu.did_disappear(),
        }
    }
}

/// Delegation seam for menu content that wants to show new main content.
///
/// Menu entries call this instead of navigating themselves; the host swaps
/// the main content and closes the menu.
pub trait ContentHost {
    /// Replace the main content with `content` and close the menu.
    ///
    /// Fails with [`SlideoutError::DragInProgress`](crate::SlideoutError::DragInProgress)
    /// while the user is dragging; the menu is left untouched.
    fn on_push_requested(&mut self, content: Box<dyn MainContent>, animated: bool) -> crate::Result<()>;
}
