//! The shipper's worker loop: the principal algorithmic component of the
//! logging core. Owns the batch buffer, both deadlines, and the
//! first-log-sent flag exclusively -- no other thread ever touches them,
//! which is what lets the rest of the shipper get away with a single
//! ingress queue as its only cross-thread surface.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::batch::BatchBuffer;
use crate::config::{ShipperConfig, BATCH_SIZE_LIMIT};
use crate::ingress::IngressQueue;
use crate::transport::{self, Destination};

/// Shared, worker-owned counters a caller can read for diagnostics without
/// synchronizing with the worker thread itself (both are plain atomics).
#[derive(Default)]
pub struct ShipperStats {
    pub shipped_records: AtomicUsize,
    pub dropped_batches: AtomicUsize,
}

enum FlushOutcome {
    /// Batch was empty; nothing to do.
    Empty,
    /// Batch was sent successfully; carries the record count shipped.
    Sent(usize),
    /// Send failed but the batch is within the retry window and was
    /// restored for another attempt.
    Retained,
    /// Send failed (or the URL itself was unparseable) and the batch
    /// exceeded the retry window or can never succeed; it was dropped.
    Dropped,
}

/// Attempts to send whatever is currently buffered. Always consumes the
/// buffer's contents (via [`BatchBuffer::take`]); on a retryable failure the
/// same bytes, count, and first-message instant are restored so the retry
/// window clock does not reset.
fn attempt_flush(batch: &mut BatchBuffer, config: &ShipperConfig) -> FlushOutcome {
    if batch.is_empty() {
        return FlushOutcome::Empty;
    }
    let first_instant = batch.first_instant().expect("non-empty batch always has a first instant");
    let count = batch.count();
    let bytes = batch.take();

    let remote_url = match config.remote_url.as_deref() {
        Some(url) => url,
        None => return FlushOutcome::Dropped,
    };

    let destination = match Destination::parse(remote_url) {
        Ok(destination) => destination,
        Err(err) => {
            // A malformed URL is a permanent failure: it cannot succeed on
            // a later retry, so the batch is dropped rather than restored.
            hydrogen_log::hlog_error!("shipper: permanent URL parse failure, dropping batch of {count} records: {err}");
            return FlushOutcome::Dropped;
        }
    };

    match transport::send(&destination, &bytes, config.io_timeout) {
        Ok(true) => FlushOutcome::Sent(count),
        Ok(false) | Err(_) => {
            let age = Instant::now().saturating_duration_since(first_instant);
            if age > config.retry_window {
                hydrogen_log::hlog_warn!(
                    "shipper: retry window of {:?} exceeded, dropping batch of {count} records",
                    config.retry_window
                );
                FlushOutcome::Dropped
            } else {
                batch.restore(bytes, count, first_instant);
                FlushOutcome::Retained
            }
        }
    }
}

/// Runs [`attempt_flush`] and updates `long_deadline`/`first_log_sent`/the
/// shared stats according to the outcome. Called from every place the
/// worker loop schedules a flush: the first-record fast path, the
/// batch-size-limit trip, and both timer expiries.
fn flush_and_retime(
    batch: &mut BatchBuffer,
    config: &ShipperConfig,
    long_deadline: &mut Instant,
    first_log_sent: &mut bool,
    stats: &ShipperStats,
) {
    match attempt_flush(batch, config) {
        FlushOutcome::Empty => {}
        FlushOutcome::Sent(count) => {
            *first_log_sent = true;
            stats.shipped_records.fetch_add(count, Ordering::Relaxed);
            *long_deadline = Instant::now() + config.long_deadline;
        }
        FlushOutcome::Retained => {
            *long_deadline = Instant::now() + config.retry_interval;
        }
        FlushOutcome::Dropped => {
            stats.dropped_batches.fetch_add(1, Ordering::Relaxed);
            *long_deadline = Instant::now() + config.long_deadline;
        }
    }
}

/// The shipper's dedicated worker thread body. Blocks on `queue` with an
/// absolute deadline computed from whichever of the short/long timers is
/// armed and soonest. Returns once
/// `queue` has been shut down and drained, after a best-effort final flush
/// of whatever remains buffered.
pub fn run(queue: &IngressQueue, config: &ShipperConfig, stats: &ShipperStats) {
    let mut batch = BatchBuffer::new(config.max_batch_bytes);
    let mut first_log_sent = false;
    let mut short_deadline: Option<Instant> = None;
    let mut long_deadline = Instant::now() + config.long_deadline;

    loop {
        let now = Instant::now();
        let wait_until = match short_deadline {
            Some(short) => short.min(long_deadline),
            None => long_deadline,
        };
        let wait = wait_until.saturating_duration_since(now);

        if let Some(line) = queue.wait_for_entry_timeout(wait) {
            if !batch.push(&line, Instant::now()) {
                // The new line would overflow the buffer's fixed capacity:
                // flush what's pending to make room, then admit it.
                flush_and_retime(&mut batch, config, &mut long_deadline, &mut first_log_sent, stats);
                batch.push(&line, Instant::now());
            }

            if !first_log_sent {
                // First record the shipper has ever seen: ship it
                // immediately rather than waiting for a timer, so a caller
                // gets end-to-end confirmation within one RTT.
                flush_and_retime(&mut batch, config, &mut long_deadline, &mut first_log_sent, stats);
            } else if batch.count() >= BATCH_SIZE_LIMIT {
                flush_and_retime(&mut batch, config, &mut long_deadline, &mut first_log_sent, stats);
            }
            short_deadline = Some(Instant::now() + config.short_deadline);
        }

        let now = Instant::now();
        if let Some(short) = short_deadline {
            if now >= short {
                if !batch.is_empty() {
                    flush_and_retime(&mut batch, config, &mut long_deadline, &mut first_log_sent, stats);
                }
                // Disarmed unconditionally, even when the batch was empty,
                // or the worker would busy-spin re-waking on an expired
                // deadline that never gets reset.
                short_deadline = None;
            }
        }
        if now >= long_deadline {
            if !batch.is_empty() {
                flush_and_retime(&mut batch, config, &mut long_deadline, &mut first_log_sent, stats);
            } else {
                // Unconditional reset: a prior revision of the source only
                // advanced this when there was work to do, which produced a
                // busy loop once the batch went idle. Never reproduce that.
                long_deadline = now + config.long_deadline;
            }
        }

        if queue.is_shutting_down() && queue.is_empty() {
            break;
        }
    }

    // Final flush is best-effort and not retried.
    if !batch.is_empty() {
        let _ = attempt_flush(&mut batch, config);
    }
}
