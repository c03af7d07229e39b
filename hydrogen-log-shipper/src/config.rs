//! Shipper configuration: the remote endpoint, the minimum severity worth
//! shipping, and the Kubernetes-flavored identity fields stamped onto every
//! remote record.
//!
//! Reads the same environment-variable convention a sidecar-shipped
//! collector expects: `VICTORIALOGS_URL`/`VICTORIALOGS_LVL` name the
//! destination and its threshold, `K8S_*` name the workload. Every field
//! falls back to a safe default rather than failing construction: missing
//! shipping configuration degrades to "shipping disabled", not a startup
//! error.

use std::env;
use std::time::Duration;

use hydrogen_log::Severity;

use crate::transport::Destination;

pub const ENV_URL: &str = "VICTORIALOGS_URL";
pub const ENV_LEVEL: &str = "VICTORIALOGS_LVL";
pub const ENV_NAMESPACE: &str = "K8S_NAMESPACE";
pub const ENV_POD_NAME: &str = "K8S_POD_NAME";
pub const ENV_CONTAINER_NAME: &str = "K8S_CONTAINER_NAME";
pub const ENV_NODE_NAME: &str = "K8S_NODE_NAME";

/// Fallback namespace label when `K8S_NAMESPACE` is unset.
pub const DEFAULT_NAMESPACE: &str = "local";
/// Fallback container-name label when `K8S_CONTAINER_NAME` is unset.
pub const DEFAULT_CONTAINER_NAME: &str = "hydrogen";
/// Last-resort identity label when neither the environment nor the OS
/// hostname can supply one.
pub const FALLBACK_HOST: &str = "localhost";

/// Maximum size of one accumulated batch before it is flushed regardless of
/// the timers.
pub const MAX_BATCH_BYTES: usize = 1024 * 1024;
/// Records accumulated before a flush is forced regardless of the timers.
pub const BATCH_SIZE_LIMIT: usize = 50;
/// Bound on the shipper's own ingress queue, independent of the primary
/// queue's capacity.
pub const INGRESS_QUEUE_CAPACITY: usize = 10_000;
/// Idle flush: ship whatever's buffered if nothing new arrived for this
/// long.
pub const DEFAULT_SHORT_DEADLINE: Duration = Duration::from_secs(1);
/// Periodic flush: ship the current batch on this cadence even under
/// continuous load, so records are never held indefinitely.
pub const DEFAULT_LONG_DEADLINE: Duration = Duration::from_secs(10);
/// How soon a failed flush is retried, distinct from (and shorter than) the
/// normal long-deadline cadence, so a transient outage doesn't hold a batch
/// for a full 10s between attempts.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(1);
/// How long a batch that failed to ship is retried before being dropped.
pub const DEFAULT_RETRY_WINDOW: Duration = Duration::from_secs(600);
/// Blocking socket send/recv timeout for a single HTTP round trip.
pub const DEFAULT_IO_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct ShipperConfig {
    /// `None` disables shipping outright (no `VICTORIALOGS_URL` set).
    pub remote_url: Option<String>,
    pub minimum_severity: Severity,
    pub namespace: String,
    pub pod_name: String,
    pub container_name: String,
    pub node_name: String,
    /// OS hostname, independent of any `K8S_*` override -- the `host` field
    /// stamped on every remote record.
    pub host: String,
    pub max_batch_bytes: usize,
    pub short_deadline: Duration,
    pub long_deadline: Duration,
    pub retry_interval: Duration,
    pub retry_window: Duration,
    pub io_timeout: Duration,
}

impl ShipperConfig {
    /// Builds configuration from the process environment.
    /// Never fails: every recognized variable has a documented fallback, and
    /// an absent/unparseable `VICTORIALOGS_URL` simply leaves the shipper
    /// disabled rather than erroring the caller's startup.
    pub fn from_env() -> Self {
        let hostname = resolve_hostname();
        ShipperConfig {
            remote_url: non_empty_env(ENV_URL),
            minimum_severity: env::var(ENV_LEVEL)
                .ok()
                .map(|lvl| Severity::parse(&lvl, Severity::Debug))
                .unwrap_or(Severity::Debug),
            namespace: non_empty_env(ENV_NAMESPACE).unwrap_or_else(|| DEFAULT_NAMESPACE.to_string()),
            pod_name: non_empty_env(ENV_POD_NAME).unwrap_or_else(|| hostname.clone()),
            container_name: non_empty_env(ENV_CONTAINER_NAME).unwrap_or_else(|| DEFAULT_CONTAINER_NAME.to_string()),
            node_name: non_empty_env(ENV_NODE_NAME).unwrap_or_else(|| hostname.clone()),
            host: hostname,
            max_batch_bytes: MAX_BATCH_BYTES,
            short_deadline: DEFAULT_SHORT_DEADLINE,
            long_deadline: DEFAULT_LONG_DEADLINE,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            retry_window: DEFAULT_RETRY_WINDOW,
            io_timeout: DEFAULT_IO_TIMEOUT,
        }
    }

    /// Enabled iff `remote_url` is set *and* parses as a valid destination
    /// URL. A set-but-unparseable URL stays disabled rather than spawning a
    /// worker that would permanently drop every batch it's handed.
    pub fn is_enabled(&self) -> bool {
        self.remote_url.as_deref().is_some_and(|url| Destination::parse(url).is_ok())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.is_empty())
}

/// Falls back to the OS hostname when `K8S_POD_NAME`/`K8S_NODE_NAME` are
/// unset, and to the literal `"localhost"` when the OS hostname itself is
/// unavailable, the way a process running outside its pod (local dev, a
/// standalone binary) still gets a stable identity in shipped records.
fn resolve_hostname() -> String {
    hostname::get()
        .ok()
        .map(|os_string| os_string.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_HOST.to_string())
}
