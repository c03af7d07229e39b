//! Errors surfaced by the shipper.
//!
//! Grounded on `opentelemetry-sdk`'s `ExportError`/`LogError`
//! (`opentelemetry-sdk/src/logs/error.rs`, `opentelemetry-sdk/src/error.rs`):
//! a `thiserror` enum distinguishing configuration mistakes from transport
//! failures, since the former are caller bugs and the latter are expected,
//! retried conditions.

#[derive(Debug, thiserror::Error)]
pub enum ShipError {
    #[error("invalid remote URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unsupported URL scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),

    #[error("connect to {host}:{port} failed: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    #[error("TLS handshake with {host} failed: {reason}")]
    Tls { host: String, reason: String },

    #[error("writing request failed: {0}")]
    Write(#[source] std::io::Error),

    #[error("reading response failed: {0}")]
    Read(#[source] std::io::Error),

    #[error("remote collector rejected batch with status line {0:?}")]
    RejectedStatus(String),
}

pub type Result<T> = std::result::Result<T, ShipError>;
