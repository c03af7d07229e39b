//! The lifecycle controller: owns the queue, the consumer thread, and the
//! destination set, and walks the fixed state machine
//! `Uninitialized -> Running -> Draining -> Stopped`.
//!
//! Grounded on `BatchLogProcessor`'s `handle: Mutex<Option<JoinHandle<()>>>`
//! plus a `sync_channel`-based rendezvous for shutdown
//! (`opentelemetry-sdk/src/logs/batch_log_processor.rs`), adapted to the
//! mutex/condvar queue instead of a channel.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use hydrogen_log::{DestinationHints, LogRecord, QueueEntry, Severity, Subsystem};

use crate::config::Config;
use crate::error::{SdkError, Result};
use crate::filter::DestinationFilter;
use crate::queue::Queue;
use crate::router::{self, Destinations};

// `Uninitialized` has no corresponding value of `Logging` at all -- there's
// nothing to call `enqueue` on before `init()` returns one -- so the state
// only ever becomes observable at `Running`.
#[allow(dead_code)]
const STATE_UNINITIALIZED: u8 = 0;
const STATE_RUNNING: u8 = 1;
const STATE_DRAINING: u8 = 2;
const STATE_STOPPED: u8 = 3;

/// The single entry point a caller embeds: construct once, call
/// [`Logging::enqueue`] from any number of threads, call
/// [`Logging::shutdown`] exactly once before the process exits.
pub struct Logging {
    queue: Arc<Queue>,
    filter: DestinationFilter,
    state: AtomicU8,
    config: Config,
    handle: Mutex<Option<thread::JoinHandle<()>>>,
    done_rx: Mutex<Option<mpsc::Receiver<()>>>,
}

impl Logging {
    /// Starts the consumer thread and moves to `Running`. `destinations`
    /// is consumed by the consumer thread for the lifetime of the core.
    pub fn init(config: Config, filter: DestinationFilter, mut destinations: Destinations) -> Result<Arc<Logging>> {
        let queue = Arc::new(Queue::new(config.queue_capacity));
        let (done_tx, done_rx) = mpsc::sync_channel(1);

        let worker_queue = queue.clone();
        let idle_flush = config.idle_flush;
        let handle = thread::Builder::new()
            .name("hydrogen-log-router".into())
            .spawn(move || {
                router::run(&worker_queue, &mut destinations, idle_flush);
                router::close_all(&mut destinations);
                let _ = done_tx.send(());
            })
            .map_err(|source| SdkError::Sink { sink: "router-thread", source })?;

        Ok(Arc::new(Logging {
            queue,
            filter,
            state: AtomicU8::new(STATE_RUNNING),
            config,
            handle: Mutex::new(Some(handle)),
            done_rx: Mutex::new(Some(done_rx)),
        }))
    }

    /// Non-blocking. Silently drops the record if the queue is full or the
    /// core is not running: logging failures are never allowed to propagate
    /// into caller control flow.
    ///
    /// `destination_hints` is the caller's own per-call destination mask
    /// (the `log()` call surface's `destination_mask: bits`). It is ANDed
    /// with the destination filter's own per-subsystem threshold: a record
    /// reaches a destination only if the caller hinted it *and* the
    /// configured severity threshold admits it.
    pub fn enqueue(&self, subsystem: &Subsystem, severity: Severity, message: &str, destination_hints: DestinationHints) {
        if self.state.load(Ordering::Acquire) != STATE_RUNNING {
            return;
        }
        let eligible = self.filter.resolve_hints(subsystem.as_str(), severity);
        let hints = eligible & destination_hints;
        if hints == DestinationHints::NONE {
            return;
        }
        let epoch_millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let record = LogRecord { subsystem, severity, message, hints };
        let entry = QueueEntry::encode(&record, epoch_millis);
        self.queue.try_push(entry);
    }

    /// Moves to `Draining`, signals the queue to stop accepting new
    /// entries once drained, and waits up to `config.shutdown_timeout` for
    /// the consumer thread to finish. Idempotent: a second call returns
    /// `Err(SdkError::AlreadyShutdown)` immediately.
    pub fn shutdown(&self) -> Result<()> {
        match self.state.compare_exchange(
            STATE_RUNNING,
            STATE_DRAINING,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {}
            Err(STATE_DRAINING) | Err(STATE_STOPPED) => return Err(SdkError::AlreadyShutdown),
            Err(_) => return Err(SdkError::NotRunning),
        }

        self.queue.shutdown();

        let done_rx = self.done_rx.lock().unwrap_or_else(|e| e.into_inner()).take();
        let result = match done_rx {
            Some(rx) => match rx.recv_timeout(self.config.shutdown_timeout) {
                Ok(()) => Ok(()),
                Err(_) => Err(SdkError::ShutdownTimeout(self.config.shutdown_timeout)),
            },
            None => Ok(()),
        };

        if result.is_ok() {
            if let Some(handle) = self.handle.lock().unwrap_or_else(|e| e.into_inner()).take() {
                let _ = handle.join();
            }
            self.state.store(STATE_STOPPED, Ordering::Release);
        }
        result
    }

    pub fn dropped_count(&self) -> usize {
        self.queue.dropped_count()
    }

    pub fn is_running(&self) -> bool {
        self.state.load(Ordering::Acquire) == STATE_RUNNING
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::console::ConsoleSink;

    #[test]
    fn enqueue_after_shutdown_is_a_silent_no_op() {
        let destinations = Destinations { console: Some(Box::new(ConsoleSink::stderr())), ..Destinations::default() };
        let logging = Logging::init(Config::default(), DestinationFilter::default(), destinations).unwrap();
        logging.shutdown().unwrap();
        let subsystem = Subsystem::new("Test");
        logging.enqueue(&subsystem, Severity::Fatal, "after shutdown", DestinationHints::ALL);
        assert!(!logging.is_running());
    }

    #[test]
    fn double_shutdown_returns_already_shutdown() {
        let logging = Logging::init(Config::default(), DestinationFilter::default(), Destinations::default()).unwrap();
        logging.shutdown().unwrap();
        let err = logging.shutdown().unwrap_err();
        assert!(matches!(err, SdkError::AlreadyShutdown));
    }

    #[test]
    fn shutdown_waits_for_queue_to_drain() {
        use std::sync::{Arc as StdArc, Mutex as StdMutex};
        use crate::sinks::Sink;

        struct CountingSink(StdArc<StdMutex<usize>>);
        impl Sink for CountingSink {
            fn accept(&mut self, _entry: &QueueEntry) -> std::io::Result<()> {
                *self.0.lock().unwrap() += 1;
                Ok(())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let count = StdArc::new(StdMutex::new(0));
        let destinations = Destinations { console: Some(Box::new(CountingSink(count.clone()))), ..Destinations::default() };
        let logging = Logging::init(
            Config { idle_flush: Duration::from_millis(20), ..Config::default() },
            DestinationFilter::default(),
            destinations,
        )
        .unwrap();

        let subsystem = Subsystem::new("Test");
        for _ in 0..10 {
            logging.enqueue(&subsystem, Severity::Error, "m", DestinationHints::ALL);
        }
        logging.shutdown().unwrap();
        assert_eq!(*count.lock().unwrap(), 10);
    }
}
