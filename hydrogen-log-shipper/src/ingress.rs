//! The shipper's own ingress queue: holds complete remote-record JSON
//! documents, with the same bounded FIFO contract as the primary queue. A
//! second, independent bounded mutex/condvar FIFO so the shipper's HTTP I/O
//! never shares a lock with the primary queue `hydrogen-log-sdk` owns -- the
//! only cross-thread channel into the shipper worker is this queue.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::Duration;

pub struct IngressQueue {
    capacity: usize,
    state: Mutex<State>,
    not_empty: Condvar,
    dropped: AtomicUsize,
}

struct State {
    lines: VecDeque<String>,
    shutting_down: bool,
}

impl IngressQueue {
    pub fn new(capacity: usize) -> Self {
        IngressQueue {
            capacity,
            state: Mutex::new(State { lines: VecDeque::new(), shutting_down: false }),
            not_empty: Condvar::new(),
            dropped: AtomicUsize::new(0),
        }
    }

    /// Non-blocking; drops and counts the drop if the queue is at capacity
    /// or already shutting down.
    pub fn try_push(&self, line: String) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.shutting_down || state.lines.len() >= self.capacity {
            drop(state);
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        state.lines.push_back(line);
        drop(state);
        self.not_empty.notify_one();
        true
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).lines.is_empty()
    }

    pub fn shutdown(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.shutting_down = true;
        drop(state);
        self.not_empty.notify_all();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).shutting_down
    }

    /// Blocks for up to `timeout`, waking early if a line arrives or
    /// shutdown is requested. Returns `None` on timeout as well as on
    /// drained shutdown; the worker distinguishes the two via
    /// [`IngressQueue::is_shutting_down`] plus [`IngressQueue::is_empty`],
    /// exactly as `hydrogen-log-sdk`'s primary queue does.
    pub fn wait_for_entry_timeout(&self, timeout: Duration) -> Option<String> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            if let Some(line) = state.lines.pop_front() {
                return Some(line);
            }
            if state.shutting_down {
                return None;
            }
            if timeout.is_zero() {
                return None;
            }
            let (next_state, result) = self
                .not_empty
                .wait_timeout(state, timeout)
                .unwrap_or_else(|e| e.into_inner());
            state = next_state;
            if result.timed_out() && state.lines.is_empty() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_then_pop_preserves_fifo_order() {
        let queue = IngressQueue::new(4);
        assert!(queue.try_push("one".to_string()));
        assert!(queue.try_push("two".to_string()));
        assert_eq!(queue.wait_for_entry_timeout(Duration::from_millis(10)).as_deref(), Some("one"));
        assert_eq!(queue.wait_for_entry_timeout(Duration::from_millis(10)).as_deref(), Some("two"));
    }

    #[test]
    fn push_beyond_capacity_drops_and_counts() {
        let queue = IngressQueue::new(1);
        assert!(queue.try_push("kept".to_string()));
        assert!(!queue.try_push("dropped".to_string()));
        assert_eq!(queue.dropped_count(), 1);
    }

    #[test]
    fn shutdown_drains_then_returns_none() {
        let queue = IngressQueue::new(4);
        queue.try_push("one".to_string());
        queue.shutdown();
        assert!(queue.wait_for_entry_timeout(Duration::from_millis(10)).is_some());
        assert!(queue.wait_for_entry_timeout(Duration::from_millis(10)).is_none());
    }

    #[test]
    fn wait_returns_none_on_idle_timeout() {
        let queue = IngressQueue::new(4);
        assert!(queue.wait_for_entry_timeout(Duration::from_millis(20)).is_none());
    }
}
