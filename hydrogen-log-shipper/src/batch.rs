//! The accumulating batch buffer: newline-separated JSON lines, appended in
//! O(1) with a tracked byte size so the worker never re-scans the buffer to
//! decide whether it's full.

use std::time::Instant;

pub struct BatchBuffer {
    bytes: Vec<u8>,
    count: usize,
    first_message_instant: Option<Instant>,
    max_bytes: usize,
}

impl BatchBuffer {
    pub fn new(max_bytes: usize) -> Self {
        BatchBuffer { bytes: Vec::new(), count: 0, first_message_instant: None, max_bytes }
    }

    /// Appends one rendered JSON line. Returns `false` without appending if
    /// the buffer is already at capacity, so the caller can flush first and
    /// retry.
    pub fn push(&mut self, line: &str, now: Instant) -> bool {
        let additional = line.len() + 1;
        if !self.bytes.is_empty() && self.bytes.len() + additional > self.max_bytes {
            return false;
        }
        if self.first_message_instant.is_none() {
            self.first_message_instant = Some(now);
        }
        self.bytes.extend_from_slice(line.as_bytes());
        self.bytes.push(b'\n');
        self.count += 1;
        true
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn age(&self, now: Instant) -> Option<std::time::Duration> {
        self.first_message_instant.map(|first| now.saturating_duration_since(first))
    }

    /// The monotonic instant the oldest record in the current batch joined
    /// it, so a failed flush can restore it verbatim rather than restarting
    /// the retry-window clock.
    pub fn first_instant(&self) -> Option<Instant> {
        self.first_message_instant
    }

    /// Drains the buffer's bytes for sending, resetting it to empty.
    pub fn take(&mut self) -> Vec<u8> {
        self.first_message_instant = None;
        self.count = 0;
        std::mem::take(&mut self.bytes)
    }

    /// Restores previously taken bytes after a failed send, so the batch is
    /// retried rather than lost: a failed send is retried for up to the
    /// retry window before the batch is dropped.
    pub fn restore(&mut self, bytes: Vec<u8>, count: usize, first_message_instant: Instant) {
        self.bytes = bytes;
        self.count = count;
        self.first_message_instant = Some(first_message_instant);
    }
}
