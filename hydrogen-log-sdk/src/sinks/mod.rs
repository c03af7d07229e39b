//! Destination sinks: the fan-out router's dispatch targets.
//!
//! Every sink implements the same small capability surface regardless of
//! how exotic its transport is, mirroring how `opentelemetry-sdk`'s
//! `LogExporter` trait (`opentelemetry-sdk/src/logs/export.rs`) gives every
//! exporter the same `export`/`shutdown` shape independent of backend.
//! Here the surface is synchronous, since this crate has no async runtime:
//! every sink does its own blocking I/O on the single consumer thread.

pub mod console;
pub mod file;
pub mod stub;

use hydrogen_log::QueueEntry;

/// A destination's write path.
///
/// `accept` is called once per eligible record, in dispatch order.
/// `flush` is called after a run of accepts to let batching
/// sinks (e.g. a buffered file writer) push pending bytes out.  `close` is
/// called exactly once during shutdown, after the queue has drained.
pub trait Sink: Send {
    fn accept(&mut self, entry: &QueueEntry) -> std::io::Result<()>;
    fn flush(&mut self) -> std::io::Result<()>;
    fn close(&mut self) -> std::io::Result<()> {
        self.flush()
    }
}
