//! Public entry point: [`Shipper`], the `hydrogen-log-sdk` fan-out router's
//! handle onto the Remote destination.
//!
//! Construction is the enablement gate: if and only if `VICTORIALOGS_URL`
//! is set and parses, [`Shipper::from_env`] returns
//! `Some` and a worker thread is running; otherwise it returns `None` and
//! the router treats Remote as absent, exactly like an unconfigured
//! Console/File sink.

use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::thread;

use hydrogen_log::{QueueEntry, RemoteForwarder, Severity};

use crate::config::{ShipperConfig, INGRESS_QUEUE_CAPACITY};
use crate::ingress::IngressQueue;
use crate::remote_record::{self, RemoteRecord};
use crate::worker::{self, ShipperStats};

/// A running remote-shipping worker plus its ingress queue.
///
/// Implements [`RemoteForwarder`] so `hydrogen-log-sdk`'s router can hold it
/// as `Box<dyn RemoteForwarder>` without depending on this crate's concrete
/// types.
pub struct Shipper {
    queue: Arc<IngressQueue>,
    config: ShipperConfig,
    handle: Mutex<Option<thread::JoinHandle<()>>>,
    stats: Arc<ShipperStats>,
}

impl Shipper {
    /// Reads `VICTORIALOGS_URL` and friends from the process environment.
    /// Returns `None` (not an error) when shipping isn't configured.
    pub fn from_env() -> Option<Arc<Shipper>> {
        Shipper::with_config(ShipperConfig::from_env())
    }

    /// Starts a shipper against an explicit configuration, for callers that
    /// build their own (tests, or an embedder reading config from somewhere
    /// other than the environment). Returns `None` if `config.remote_url`
    /// is unset, the same enablement rule as [`Shipper::from_env`].
    pub fn with_config(config: ShipperConfig) -> Option<Arc<Shipper>> {
        if !config.is_enabled() {
            return None;
        }

        let queue = Arc::new(IngressQueue::new(INGRESS_QUEUE_CAPACITY));
        let stats = Arc::new(ShipperStats::default());

        let worker_queue = queue.clone();
        let worker_config = config.clone();
        let worker_stats = stats.clone();
        let handle = thread::Builder::new()
            .name("hydrogen-log-shipper".into())
            .spawn(move || worker::run(&worker_queue, &worker_config, &worker_stats))
            .ok()?;

        Some(Arc::new(Shipper { queue, config, handle: Mutex::new(Some(handle)), stats }))
    }

    /// Records accepted by the remote collector so far. Advisory, for
    /// diagnostics/tests.
    pub fn shipped_records(&self) -> usize {
        self.stats.shipped_records.load(Ordering::Relaxed)
    }

    /// Batches dropped either to a permanent URL failure or to exceeding
    /// the retry window.
    pub fn dropped_batches(&self) -> usize {
        self.stats.dropped_batches.load(Ordering::Relaxed)
    }

    /// Records dropped at the ingress queue itself (queue full or shipper
    /// already shutting down).
    pub fn dropped_ingress(&self) -> usize {
        self.queue.dropped_count()
    }
}

impl RemoteForwarder for Shipper {
    fn enqueue(&self, entry: QueueEntry) -> bool {
        if entry.priority < self.config.minimum_severity.ordinal() {
            // Below VICTORIALOGS_LVL: not an error, simply not shipped.
            return true;
        }
        let record = RemoteRecord {
            epoch_millis: entry.epoch_millis,
            severity_label: Severity::from_ordinal(entry.priority).label(),
            subsystem: entry.subsystem,
            message: entry.message,
        };
        let line = remote_record::render(&record, &self.config);
        self.queue.try_push(line)
    }

    fn shutdown(&self) {
        self.queue.shutdown();
        if let Some(handle) = self.handle.lock().unwrap_or_else(|e| e.into_inner()).take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydrogen_log::{Destination, DestinationHints, LogRecord, Subsystem};

    fn entry(severity: Severity) -> QueueEntry {
        let subsystem = Subsystem::new("Test");
        let record = LogRecord {
            subsystem: &subsystem,
            severity,
            message: "m",
            hints: DestinationHints::from(Destination::Remote),
        };
        QueueEntry::encode(&record, 0)
    }

    fn disabled_config() -> ShipperConfig {
        ShipperConfig {
            remote_url: None,
            minimum_severity: Severity::Debug,
            namespace: "local".into(),
            pod_name: "pod".into(),
            container_name: "hydrogen".into(),
            node_name: "node".into(),
            host: "node".into(),
            max_batch_bytes: crate::config::MAX_BATCH_BYTES,
            short_deadline: crate::config::DEFAULT_SHORT_DEADLINE,
            long_deadline: crate::config::DEFAULT_LONG_DEADLINE,
            retry_interval: crate::config::DEFAULT_RETRY_INTERVAL,
            retry_window: crate::config::DEFAULT_RETRY_WINDOW,
            io_timeout: crate::config::DEFAULT_IO_TIMEOUT,
        }
    }

    #[test]
    fn disabled_config_never_starts_a_worker() {
        assert!(Shipper::with_config(disabled_config()).is_none());
    }

    #[test]
    fn enqueue_below_minimum_severity_is_dropped_before_reaching_the_queue() {
        let mut config = disabled_config();
        config.remote_url = Some("http://127.0.0.1:1/insert".to_string());
        config.minimum_severity = Severity::Error;
        let shipper = Shipper::with_config(config).unwrap();

        assert!(shipper.enqueue(entry(Severity::Debug)));
        assert_eq!(shipper.dropped_ingress(), 0);
        assert_eq!(shipper.queue.dropped_count(), 0);
        shipper.shutdown();
    }
}
