#![forbid(unsafe_code)]

//! Committed open/closed state and the observable controller phase.
//!
//! [`OpenState`] is the *committed* state: it changes only when a settle
//! animation completes, never mid-drag. The reveal percentage shown on screen
//! is tracked separately by the animation driver.

/// Committed menu state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenState {
    open: bool,
    enabled: bool,
}

impl Default for OpenState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl OpenState {
    /// Closed, with the given enabled flag.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            open: false,
            enabled,
        }
    }

    /// Whether the last completed transition left the menu open.
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the menu can be reached.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record a completed transition. Returns `true` if the state changed.
    pub fn commit(&mut self, open: bool) -> bool {
        let changed = self.open != open;
        self.open = open;
        changed
    }

    /// Change the enabled flag. Returns `true` if it changed.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let changed = self.enabled != enabled;
        self.enabled = enabled;
        changed
    }
}

/// Observable phase of a slideout container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideoutPhase {
    /// At rest (or settling) with the menu committed closed.
    Closed,
    /// A pan gesture is moving the menu.
    Dragging,
    /// At rest (or settling) with the menu committed open.
    Open,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed() {
        let state = OpenState::default();
        assert!(!state.is_open());
        assert!(state.is_enabled());
        assert!(!OpenState::new(false).is_enabled());
    }

    #[test]
    fn commit_reports_changes() {
        let mut state = OpenState::default();
        assert!(state.commit(true));
        assert!(!state.commit(true));
        assert!(state.is_open());
        assert!(state.commit(false));
    }

    #[test]
    fn enabled_flag_reports_changes() {
        let mut state = OpenState::default();
        assert!(!state.set_enabled(true));
        assert!(state.set_enabled(false));
        assert!(!state.is_enabled());
    }
}
