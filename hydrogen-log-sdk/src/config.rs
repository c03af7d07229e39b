//! Queue and router configuration.
//!
//! A builder mirroring `opentelemetry-sdk`'s `BatchConfigBuilder`
//! (`opentelemetry-sdk/src/logs/batch_log_processor.rs`): defaults baked
//! in, each overridable programmatically.

use std::time::Duration;

/// Default bounded queue capacity.
pub const DEFAULT_QUEUE_CAPACITY: usize = 2_048;
/// How long the router waits for a new entry before running an idle flush
/// of buffered sinks.
pub const DEFAULT_IDLE_FLUSH: Duration = Duration::from_secs(1);
/// How long `shutdown()` waits for the consumer thread to drain before
/// giving up and returning an error.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub queue_capacity: usize,
    pub idle_flush: Duration,
    pub shutdown_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            idle_flush: DEFAULT_IDLE_FLUSH,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        ConfigBuilder { config: Config::default() }
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.config.queue_capacity = capacity;
        self
    }

    pub fn with_idle_flush(mut self, interval: Duration) -> Self {
        self.config.idle_flush = interval;
        self
    }

    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.config.shutdown_timeout = timeout;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = ConfigBuilder::new().with_queue_capacity(16).build();
        assert_eq!(config.queue_capacity, 16);
        assert_eq!(config.idle_flush, DEFAULT_IDLE_FLUSH);
    }
}
