//! The seam between the fan-out router (in `hydrogen-log-sdk`) and the
//! remote batching shipper (in `hydrogen-log-shipper`).
//!
//! Defined here, in the shared data-model crate, rather than in either
//! downstream crate, so neither has to depend on the other: the SDK only
//! needs *something* that accepts entries destined for Remote, and the
//! shipper is free to be used standalone (e.g. by a caller that wants
//! remote shipping without the full queue/fan-out machinery).

use crate::record::QueueEntry;

/// Accepts entries routed to the Remote destination.
///
/// Unlike the synchronous [`crate`]-level sinks, a forwarder does not write
/// the entry anywhere itself on the calling thread -- it hands the entry to
/// its own internal batching/worker machinery and returns immediately,
/// mirroring how the fan-out router never blocks on Remote delivery.
pub trait RemoteForwarder: Send + Sync {
    /// Queues an entry for eventual remote delivery. Returns `false` if the
    /// forwarder's own internal buffer is full and the entry was dropped.
    fn enqueue(&self, entry: QueueEntry) -> bool;

    /// Flushes any buffered entries and stops the forwarder's background
    /// work. Called once, after the log queue has drained.
    fn shutdown(&self);
}
