//! Data model and call surface shared by the Hydrogen logging core.
//!
//! This crate has no runtime of its own -- no threads, no sockets, no
//! queue. It defines the vocabulary (`Severity`, `Subsystem`, `Destination`,
//! `LogRecord`/`QueueEntry`) that `hydrogen-log-sdk` (the queue, fan-out
//! router, and sinks) and `hydrogen-log-shipper` (the remote batching
//! exporter) both build on, the same way `opentelemetry`'s `logs` module
//! defines `Severity`/`LogRecord` independently of the `opentelemetry-sdk`
//! crate that processes them.

pub mod destination;
pub mod diagnostics;
pub mod error;
pub mod forwarder;
pub mod record;
pub mod severity;
pub mod subsystem;

pub use destination::{Destination, DestinationHints};
pub use error::Error;
pub use forwarder::RemoteForwarder;
pub use record::{LogRecord, QueueEntry};
pub use severity::Severity;
pub use subsystem::{Subsystem, MAX_SUBSYSTEM_LEN};

pub type Result<T> = std::result::Result<T, Error>;
