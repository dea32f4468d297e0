//! Logging facade for the resizing crates.
//!
//! The engine logs through four macros: `debug!`, `trace!`, `warn!` and
//! `debug_span!`. With the `tracing` feature they are `tracing`'s own.
//! Without it they are exported at the crate root as no-ops, and spans
//! become an inert [`DisabledSpan`], so call sites compile either way.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace, warn};

#[cfg(not(feature = "tracing"))]
mod disabled {
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// Expands to a [`DisabledSpan`](crate::logging::DisabledSpan).
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::DisabledSpan
        };
    }
}

/// Stand-in for `tracing::Span` when logging is compiled out.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSpan;

#[cfg(not(feature = "tracing"))]
impl DisabledSpan {
    /// Returns another inert value to hold for the scope.
    #[must_use]
    pub fn enter(&self) -> Self {
        Self
    }
}
