//! Errors surfaced by the SDK's lifecycle controller.
//!
//! Grounded on `opentelemetry-sdk`'s `OTelSdkError`
//! (`opentelemetry-sdk/src/error.rs`): a small enum distinguishing
//! "already in this state" misuse from genuine I/O failure, so callers
//! can tell a lifecycle bug from a transient sink problem.

#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error("logging core is already running")]
    AlreadyRunning,

    #[error("logging core has not been started")]
    NotRunning,

    #[error("logging core is already shut down")]
    AlreadyShutdown,

    #[error("shutdown timed out after {0:?}")]
    ShutdownTimeout(std::time::Duration),

    #[error("sink {sink} failed: {source}")]
    Sink {
        sink: &'static str,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SdkError>;
