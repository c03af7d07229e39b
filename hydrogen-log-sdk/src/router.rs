//! The fan-out router: the consumer-thread loop that drains the queue and
//! dispatches each entry to every destination its hints enable, in the
//! fixed order `Console, File, Remote, Database, Notify`.
//!
//! A sink failing never stops the loop or the other sinks for that record --
//! one destination's failure never affects delivery to any other
//! destination for the same record -- failures are only ever
//! self-diagnosed via [`hydrogen_log::hlog_error`].

use std::sync::Arc;
use std::time::Duration;

use hydrogen_log::{Destination, QueueEntry, RemoteForwarder};

use crate::queue::Queue;
use crate::sinks::Sink;

/// The set of registered destinations. Any of the four in-process sinks
/// may be absent (`None`), meaning that destination is a no-op; Remote is
/// driven through a [`RemoteForwarder`] instead of a [`Sink`], since it
/// batches asynchronously rather than writing synchronously.
pub struct Destinations {
    pub console: Option<Box<dyn Sink>>,
    pub file: Option<Box<dyn Sink>>,
    /// `Arc`, not `Box`: a `Shipper` (the concrete forwarder
    /// `hydrogen-log-shipper` provides) hands out shared handles so a
    /// caller can read its own diagnostics (shipped/dropped counts) after
    /// registering it here, which an owned `Box` would preclude.
    pub remote: Option<Arc<dyn RemoteForwarder>>,
    pub database: Option<Box<dyn Sink>>,
    pub notify: Option<Box<dyn Sink>>,
}

impl Default for Destinations {
    fn default() -> Self {
        Destinations { console: None, file: None, remote: None, database: None, notify: None }
    }
}

/// Drains `queue` until shutdown, dispatching each entry per its hints.
/// Runs on its own dedicated thread; never called directly from a producer
/// thread.
pub fn run(queue: &Queue, destinations: &mut Destinations, idle_flush: Duration) {
    loop {
        match queue.wait_for_entry_timeout(idle_flush) {
            Some(entry) => dispatch(&entry, destinations),
            None => {
                flush_all(destinations);
                if queue.is_shutting_down() && queue.is_empty() {
                    return;
                }
            }
        }
    }
}

/// Subsystems whose records never reach Console, even when hinted there.
/// These are the subsystems that stamp the same banner line once per
/// destination they're hinted to (version, license, build info) -- letting
/// them through Console as well as File/Remote means a terminal sees the
/// boot banner twice for every process restart. The allow-deny list is
/// Console-only: the record still reaches every other destination its
/// hints enable.
const SUPPRESSED_ON_CONSOLE: &[&str] = &["Boot", "License", "Version"];

fn dispatch(entry: &QueueEntry, destinations: &mut Destinations) {
    for destination in Destination::ALL {
        if !entry.hints.contains(destination) {
            continue;
        }
        match destination {
            Destination::Console => {
                if !SUPPRESSED_ON_CONSOLE.contains(&entry.subsystem.as_str()) {
                    dispatch_sink("Console", destinations.console.as_deref_mut(), entry);
                }
            }
            Destination::File => dispatch_sink("File", destinations.file.as_deref_mut(), entry),
            Destination::Database => dispatch_sink("Database", destinations.database.as_deref_mut(), entry),
            Destination::Notify => dispatch_sink("Notify", destinations.notify.as_deref_mut(), entry),
            Destination::Remote => {
                if let Some(forwarder) = destinations.remote.as_deref() {
                    if !forwarder.enqueue(entry.clone()) {
                        hydrogen_log::hlog_warn!("remote forwarder buffer full, dropping entry");
                    }
                }
            }
        }
    }
}

fn dispatch_sink(name: &'static str, sink: Option<&mut dyn Sink>, entry: &QueueEntry) {
    if let Some(sink) = sink {
        if let Err(err) = sink.accept(entry) {
            hydrogen_log::hlog_error!("sink {} failed to accept entry: {}", name, err);
        }
    }
}

fn flush_all(destinations: &mut Destinations) {
    for (name, sink) in [
        ("Console", destinations.console.as_deref_mut()),
        ("File", destinations.file.as_deref_mut()),
        ("Database", destinations.database.as_deref_mut()),
        ("Notify", destinations.notify.as_deref_mut()),
    ] {
        if let Some(sink) = sink {
            if let Err(err) = sink.flush() {
                hydrogen_log::hlog_error!("sink {} failed to flush: {}", name, err);
            }
        }
    }
}

pub fn close_all(destinations: &mut Destinations) {
    for (name, sink) in [
        ("Console", destinations.console.as_deref_mut()),
        ("File", destinations.file.as_deref_mut()),
        ("Database", destinations.database.as_deref_mut()),
        ("Notify", destinations.notify.as_deref_mut()),
    ] {
        if let Some(sink) = sink {
            if let Err(err) = sink.close() {
                hydrogen_log::hlog_error!("sink {} failed to close: {}", name, err);
            }
        }
    }
    if let Some(forwarder) = destinations.remote.as_deref() {
        forwarder.shutdown();
    }
}
