#![forbid(unsafe_code)]

//! Logging facade.
//!
//! Library modules log through these re-exports rather than naming
//! `tracing` directly. With the `tracing` feature off, the same names expand
//! to nothing and spans become inert guards.
//!
//! Levels in use:
//! - `debug!`: state transitions (drag begin/end, settle decisions, commits).
//! - `trace!`: per-sample and per-frame updates.
//! - `warn!`: dropped out-of-sequence input and rejected configuration.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

#[cfg(not(feature = "tracing"))]
pub use crate::{
    __slideout_noop_event as debug, __slideout_noop_event as error,
    __slideout_noop_event as info, __slideout_noop_event as trace,
    __slideout_noop_event as warn, __slideout_noop_span as debug_span,
    __slideout_noop_span as error_span, __slideout_noop_span as info_span,
    __slideout_noop_span as trace_span, __slideout_noop_span as warn_span,
};

#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __slideout_noop_event {
    ($($arg:tt)*) => {
        ()
    };
}

#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __slideout_noop_span {
    ($($arg:tt)*) => {
        $crate::logging::Span::none()
    };
}

/// Inert stand-in for `tracing::Span`.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct Span;

#[cfg(not(feature = "tracing"))]
impl Span {
    /// A span that records nothing.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self
    }

    /// Enter the span; the guard does nothing.
    #[inline]
    #[must_use]
    pub fn enter(&self) -> Entered {
        Entered
    }
}

/// Guard returned by [`Span::enter`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct Entered;
