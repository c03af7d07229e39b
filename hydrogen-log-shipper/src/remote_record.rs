//! Builds the newline-delimited JSON document shipped for each record.
//!
//! Hand-assembled with a fixed key order rather than run through a derived
//! `Serialize`, the way `aptos-core`'s log writer controls its own wire
//! shape instead of accepting whatever a derive produces
//! (`crates/aptos-logger/src/aptos_logger.rs`): the remote collector this
//! shipper targets expects an exact set of top-level keys in an exact
//! order, and a derive would make that contract implicit in struct field
//! order instead of explicit here.

use chrono::{SecondsFormat, Utc};

use crate::config::ShipperConfig;

/// The fixed `app` field stamped on every shipped record. Not derived from
/// `config.container_name` (which tracks `K8S_CONTAINER_NAME` and varies
/// per deployment) -- `app` identifies the logging platform itself, and
/// the container it happens to run in is already carried separately as
/// `kubernetes_container_name`.
const APP_NAME: &str = "hydrogen";

/// One record queued for remote delivery: the pieces needed to build its
/// JSON line without re-touching the original queue entry bytes.
pub struct RemoteRecord {
    pub epoch_millis: u128,
    pub severity_label: &'static str,
    pub subsystem: String,
    pub message: String,
}

/// Renders `record` as a single JSON line (no trailing newline; the caller
/// joins lines when appending to the batch buffer). Key order is exact:
/// `_time, _msg, level, subsystem, app, kubernetes_namespace,
/// kubernetes_pod_name, kubernetes_container_name, kubernetes_node_name,
/// host`.
pub fn render(record: &RemoteRecord, config: &ShipperConfig) -> String {
    let mut out = String::with_capacity(record.message.len() + 224);
    out.push('{');

    out.push_str("\"_time\":\"");
    out.push_str(&format_timestamp(record.epoch_millis));
    out.push('"');

    out.push_str(",\"_msg\":\"");
    escape_into(&record.message, &mut out);
    out.push('"');

    out.push_str(",\"level\":\"");
    out.push_str(record.severity_label);
    out.push('"');

    out.push_str(",\"subsystem\":\"");
    escape_into(&record.subsystem, &mut out);
    out.push('"');

    out.push_str(",\"app\":\"");
    out.push_str(APP_NAME);
    out.push('"');

    out.push_str(",\"kubernetes_namespace\":\"");
    escape_into(&config.namespace, &mut out);
    out.push('"');

    out.push_str(",\"kubernetes_pod_name\":\"");
    escape_into(&config.pod_name, &mut out);
    out.push('"');

    out.push_str(",\"kubernetes_container_name\":\"");
    escape_into(&config.container_name, &mut out);
    out.push('"');

    out.push_str(",\"kubernetes_node_name\":\"");
    escape_into(&config.node_name, &mut out);
    out.push('"');

    out.push_str(",\"host\":\"");
    escape_into(&config.host, &mut out);
    out.push('"');

    out.push('}');
    out
}

/// RFC 3339, nanosecond precision, UTC -- the `_time` field. The core only
/// ever has millisecond-resolution input (`epoch_millis`), so the
/// sub-millisecond digits are always zero; the format still matches what a
/// nanosecond-precision source would produce.
fn format_timestamp(epoch_millis: u128) -> String {
    let seconds = (epoch_millis / 1000) as i64;
    let millis = (epoch_millis % 1000) as u32;
    chrono::DateTime::<Utc>::from_timestamp(seconds, millis * 1_000_000)
        .unwrap_or_else(|| chrono::DateTime::<Utc>::from_timestamp(0, 0).unwrap())
        .to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Escapes `" \ \n \r \t` and any byte `< 0x20` as `\u00xx`; every other
/// `char` passes through unchanged since the input is already valid UTF-8.
fn escape_into(input: &str, out: &mut String) {
    for c in input.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config() -> ShipperConfig {
        ShipperConfig {
            remote_url: Some("https://logs.example.internal/insert".into()),
            minimum_severity: hydrogen_log::Severity::State,
            namespace: "payments".into(),
            pod_name: "payments-7c8-x2".into(),
            container_name: "app".into(),
            node_name: "node-3".into(),
            host: "node-3.cluster.internal".into(),
            max_batch_bytes: crate::config::MAX_BATCH_BYTES,
            short_deadline: Duration::from_secs(1),
            long_deadline: Duration::from_secs(10),
            retry_interval: Duration::from_secs(1),
            retry_window: Duration::from_secs(600),
            io_timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn render_includes_every_fixed_key_in_order() {
        let record = RemoteRecord {
            epoch_millis: 1_700_000_000_000,
            severity_label: "ERROR",
            subsystem: "WebServer".into(),
            message: "connection refused".into(),
        };
        let json = render(&record, &test_config());
        let keys = [
            "_time",
            "_msg",
            "level",
            "subsystem",
            "app",
            "kubernetes_namespace",
            "kubernetes_pod_name",
            "kubernetes_container_name",
            "kubernetes_node_name",
            "host",
        ];
        let mut last_index = 0;
        for key in keys {
            let idx = json.find(&format!("\"{key}\":")).unwrap_or_else(|| panic!("missing key {key}"));
            assert!(idx >= last_index, "key {key} out of order");
            last_index = idx;
        }
        assert!(json.contains("\"app\":\"hydrogen\""));
        assert!(json.contains("\"kubernetes_container_name\":\"app\""));
        assert!(json.contains("\"host\":\"node-3.cluster.internal\""));
    }

    #[test]
    fn app_field_is_fixed_regardless_of_container_name() {
        let mut config = test_config();
        config.container_name = "sidecar".into();
        let record = RemoteRecord {
            epoch_millis: 0,
            severity_label: "DEBUG",
            subsystem: "X".into(),
            message: "m".into(),
        };
        let json = render(&record, &config);
        assert!(json.contains("\"app\":\"hydrogen\""));
        assert!(json.contains("\"kubernetes_container_name\":\"sidecar\""));
    }

    #[test]
    fn message_escaping_produces_valid_json_string_content() {
        let record = RemoteRecord {
            epoch_millis: 0,
            severity_label: "ALERT",
            subsystem: "X".into(),
            message: "tab\there \"quoted\"".into(),
        };
        let json = render(&record, &test_config());
        assert!(json.contains("\"_msg\":\"tab\\there \\\"quoted\\\"\""));
    }
}
