//! Crate-level error type.
//!
//! Mirrors the shape of `opentelemetry-sdk`'s `LogError`
//! (`opentelemetry-sdk/src/logs/error.rs`): a small `thiserror`-derived enum
//! covering only the failures that can occur at this crate's call surface,
//! not the downstream SDK/shipper failures those crates define their own
//! error types for.

/// Failures surfaced by the `hydrogen-log` call surface.
///
/// Almost nothing in this core is fatal to the caller: a full queue silently
/// drops, an oversized subsystem name is truncated. This type exists for the
/// few cases that genuinely are caller mistakes rather than backpressure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("message exceeds maximum length of {max} bytes")]
    MessageTooLong { max: usize },

    #[error("invalid destination mask: {0:#010b}")]
    InvalidDestinationMask(u8),
}
