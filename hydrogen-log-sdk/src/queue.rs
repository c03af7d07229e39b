//! The bounded log queue feeding the consumer thread.
//!
//! Unlike `opentelemetry-sdk`'s `BatchLogProcessor`, which hands records to
//! its worker thread over a `std::sync::mpsc::sync_channel`, this queue is a
//! single `Mutex`-guarded `VecDeque` with a `Condvar` the consumer waits on.
//! A channel is a poor fit here: this queue needs an externally observable
//! fixed capacity and an explicit "silently drop when full" contract rather
//! than a blocking/try-send split, and it needs the consumer to be able to
//! wait on "queue non-empty OR shutdown requested" as a single condition,
//! which a raw `Receiver` can't express without polling. A hand-rolled
//! mutex/condvar queue makes both of those literal.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::Duration;

use hydrogen_log::QueueEntry;

/// A bounded, multi-producer single-consumer FIFO of [`QueueEntry`] values.
///
/// Producers call [`Queue::try_push`], which never blocks: if the queue is
/// at capacity the entry is dropped and the drop counter is incremented --
/// a full queue degrades by dropping, never by blocking the caller. The
/// consumer calls [`Queue::wait_for_entry`],
/// which blocks until an entry is available or [`Queue::shutdown`] has been
/// called and the queue has drained.
pub struct Queue {
    capacity: usize,
    state: Mutex<State>,
    not_empty: Condvar,
    dropped: AtomicUsize,
}

struct State {
    entries: VecDeque<QueueEntry>,
    shutting_down: bool,
}

impl Queue {
    pub fn new(capacity: usize) -> Self {
        Queue {
            capacity,
            state: Mutex::new(State {
                entries: VecDeque::with_capacity(capacity.min(256)),
                shutting_down: false,
            }),
            not_empty: Condvar::new(),
            dropped: AtomicUsize::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Non-blocking enqueue. Returns `true` if the entry was accepted,
    /// `false` if the queue was full and the entry was dropped.
    pub fn try_push(&self, entry: QueueEntry) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.shutting_down {
            return false;
        }
        if state.entries.len() >= self.capacity {
            drop(state);
            let previous = self.dropped.fetch_add(1, Ordering::Relaxed);
            if previous == 0 {
                hydrogen_log::hlog_warn!("queue full, dropping log record; further drops will be counted silently");
            }
            return false;
        }
        state.entries.push_back(entry);
        drop(state);
        self.not_empty.notify_one();
        true
    }

    /// Number of entries dropped since construction because the queue was
    /// full.
    pub fn dropped_count(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Current number of queued entries. For diagnostics/tests only; not a
    /// synchronization point.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Blocks until shutdown is requested. Wakes any thread parked in
    /// [`Queue::wait_for_entry`].
    pub fn shutdown(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.shutting_down = true;
        drop(state);
        self.not_empty.notify_all();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).shutting_down
    }

    /// Pops the oldest entry, blocking until one is available or shutdown
    /// has been requested. Returns `None` only once shutdown has been
    /// requested and the queue has fully drained, which is how the consumer
    /// thread knows to exit: the queue always drains fully before the
    /// worker thread exits.
    pub fn wait_for_entry(&self) -> Option<QueueEntry> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            if let Some(entry) = state.entries.pop_front() {
                return Some(entry);
            }
            if state.shutting_down {
                return None;
            }
            state = self
                .not_empty
                .wait(state)
                .unwrap_or_else(|e| e.into_inner());
        }
    }

    /// Like [`Queue::wait_for_entry`] but bounded, so a consumer loop can
    /// periodically do other work (e.g. flush a timer-driven batch) even
    /// when the queue stays empty. Returns `None` on timeout as well as on
    /// drained shutdown; callers distinguish the two via
    /// [`Queue::is_shutting_down`] plus [`Queue::is_empty`].
    pub fn wait_for_entry_timeout(&self, timeout: Duration) -> Option<QueueEntry> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            if let Some(entry) = state.entries.pop_front() {
                return Some(entry);
            }
            if state.shutting_down {
                return None;
            }
            let (next_state, result) = self
                .not_empty
                .wait_timeout(state, timeout)
                .unwrap_or_else(|e| e.into_inner());
            state = next_state;
            if result.timed_out() && state.entries.is_empty() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydrogen_log::{Destination, DestinationHints, LogRecord, Severity, Subsystem};

    fn entry(message: &str) -> QueueEntry {
        let subsystem = Subsystem::new("Test");
        let record = LogRecord {
            subsystem: &subsystem,
            severity: Severity::State,
            message,
            hints: DestinationHints::from(Destination::Console),
        };
        QueueEntry::encode(&record, 0)
    }

    #[test]
    fn push_then_pop_preserves_fifo_order() {
        let queue = Queue::new(4);
        assert!(queue.try_push(entry("one")));
        assert!(queue.try_push(entry("two")));
        let first = queue.wait_for_entry().unwrap();
        let second = queue.wait_for_entry().unwrap();
        assert!(first.as_json_str().contains("one"));
        assert!(second.as_json_str().contains("two"));
    }

    #[test]
    fn push_beyond_capacity_drops_and_counts() {
        let queue = Queue::new(1);
        assert!(queue.try_push(entry("kept")));
        assert!(!queue.try_push(entry("dropped")));
        assert_eq!(queue.dropped_count(), 1);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn shutdown_drains_then_returns_none() {
        let queue = Queue::new(4);
        queue.try_push(entry("one"));
        queue.shutdown();
        assert!(queue.wait_for_entry().is_some());
        assert!(queue.wait_for_entry().is_none());
    }

    #[test]
    fn push_after_shutdown_is_rejected() {
        let queue = Queue::new(4);
        queue.shutdown();
        assert!(!queue.try_push(entry("too late")));
    }

    #[test]
    fn wait_with_timeout_returns_none_when_idle() {
        let queue = Queue::new(4);
        let result = queue.wait_for_entry_timeout(Duration::from_millis(20));
        assert!(result.is_none());
    }

    #[test]
    fn concurrent_producers_do_not_lose_entries_within_capacity() {
        use std::sync::Arc;
        use std::thread;

        let queue = Arc::new(Queue::new(64));
        let mut handles = Vec::new();
        for i in 0..8 {
            let queue = queue.clone();
            handles.push(thread::spawn(move || {
                for j in 0..8 {
                    queue.try_push(entry(&format!("{i}-{j}")));
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(queue.len() + queue.dropped_count(), 64);
    }
}
