//! Database and Notify sinks.
//!
//! The concrete backing store/notification transport for these two
//! destinations is left open deliberately, since the answer depends on the
//! deployment (which database, which notification channel). This module
//! supplies the sink the rest of the system actually needs regardless of
//! that answer: a capability-checked no-op that counts what it would have
//! delivered, so a caller can wire in a real backend by implementing
//! [`super::Sink`] without the router or lifecycle code changing at all.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hydrogen_log::QueueEntry;

use super::Sink;

/// A sink that records how many entries it received without delivering
/// them anywhere. Used as the default Database/Notify sink until a
/// deployment wires in a real one.
#[derive(Clone, Default)]
pub struct CountingStubSink {
    accepted: Arc<AtomicUsize>,
}

impl CountingStubSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted.load(Ordering::Relaxed)
    }
}

impl Sink for CountingStubSink {
    fn accept(&mut self, _entry: &QueueEntry) -> io::Result<()> {
        self.accepted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydrogen_log::{Destination, DestinationHints, LogRecord, Severity, Subsystem};

    #[test]
    fn counts_every_accepted_entry() {
        let mut sink = CountingStubSink::new();
        let subsystem = Subsystem::new("Test");
        for _ in 0..3 {
            let record = LogRecord {
                subsystem: &subsystem,
                severity: Severity::Alert,
                message: "x",
                hints: DestinationHints::from(Destination::Database),
            };
            let entry = hydrogen_log::QueueEntry::encode(&record, 0);
            sink.accept(&entry).unwrap();
        }
        assert_eq!(sink.accepted_count(), 3);
    }
}
