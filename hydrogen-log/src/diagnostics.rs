//! Internal self-diagnostics.
//!
//! The logging core cannot log its own failures through its own queue --
//! that would risk feeding a stuck consumer back into itself. Instead,
//! internal problems (queue full, sink write failure, malformed config) are
//! routed through `tracing`, exactly as `opentelemetry`'s global internal
//! logging macros do (`opentelemetry/src/global/internal_logging.rs`).
//!
//! With the `internal-logs` feature disabled these macros compile to
//! nothing, so a release build that doesn't want the `tracing` dependency
//! at all can drop it.

/// Emits a low-severity internal diagnostic. Used for expected, frequent
/// conditions (a single dropped record) that would be noise at a higher
/// level.
#[macro_export]
macro_rules! hlog_debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::diagnostics::tracing::debug!(target: "hydrogen_log", $($arg)*);
        }
        #[cfg(not(feature = "internal-logs"))]
        {}
    };
}

/// Emits a self-diagnostic for a condition that degrades behavior but isn't
/// an outright failure (e.g. a subsystem name was truncated).
#[macro_export]
macro_rules! hlog_warn {
    ($($arg:tt)*) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::diagnostics::tracing::warn!(target: "hydrogen_log", $($arg)*);
        }
        #[cfg(not(feature = "internal-logs"))]
        {}
    };
}

/// Emits a self-diagnostic for an outright internal failure (a sink that
/// could not be opened, a shipper that could not reach its endpoint).
#[macro_export]
macro_rules! hlog_error {
    ($($arg:tt)*) => {
        #[cfg(feature = "internal-logs")]
        {
            $crate::diagnostics::tracing::error!(target: "hydrogen_log", $($arg)*);
        }
        #[cfg(not(feature = "internal-logs"))]
        {}
    };
}

#[cfg(feature = "internal-logs")]
pub use tracing;
