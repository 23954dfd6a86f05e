#![forbid(unsafe_code)]

//! Error types for the slideout controller.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SlideoutError>;

/// Errors reported by the slideout controller.
///
/// Normal interaction edge cases (full clamp, zero velocity, out-of-sequence
/// gesture samples) are handled, never reported. Only configuration problems
/// and misuse of the content API surface here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SlideoutError {
    /// A configuration value is out of range. The previous value stays in place.
    #[error("invalid configuration: {field} = {value} ({reason})")]
    InvalidConfiguration {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Content was swapped during a drag.
    #[error("content cannot be swapped while a drag is in progress")]
    DragInProgress,
}

impl SlideoutError {
    #[must_use]
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidConfiguration {
            field,
            value,
            reason,
        }
    }

    /// Name of the offending configuration field, if this is a configuration error.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidConfiguration { field, .. } => Some(field),
            Self::DragInProgress => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_names_field_and_value() {
        let err = SlideoutError::invalid("menu_width", -4.0, "must be greater than zero");
        assert_eq!(err.field(), Some("menu_width"));
        assert_eq!(
            err.to_string(),
            "invalid configuration: menu_width = -4 (must be greater than zero)"
        );
    }

    #[test]
    fn drag_error_has_no_field() {
        assert_eq!(SlideoutError::DragInProgress.field(), None);
    }
}
