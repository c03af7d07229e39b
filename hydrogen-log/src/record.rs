//! The in-queue record shape: a "Log Record" serialized into a "Queue Entry".
//!
//! A record is serialized to newline-free JSON bytes at enqueue time so the
//! queue only ever stores an opaque `Vec<u8>` plus the small set of fields
//! the consumer-side fan-out needs without re-parsing: the severity ordinal
//! (`priority`) and the destination hints. The JSON bytes stay the source of
//! truth for every field (a sink can always recover the full record by
//! parsing them); the cached fields exist purely to avoid a re-parse on a
//! hot path.

use crate::destination::DestinationHints;
use crate::severity::Severity;
use crate::subsystem::Subsystem;

/// A record as presented to the core at the `log()` call surface, before it
/// is serialized into a [`QueueEntry`].
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub subsystem: &'a Subsystem,
    pub severity: Severity,
    pub message: &'a str,
    pub hints: DestinationHints,
}

/// What actually lives in the bounded queue: a JSON document, plus the
/// severity ordinal and destination hints cached alongside it so the
/// consumer thread can make dispatch decisions in O(1) without
/// deserializing the document.
#[derive(Debug, Clone)]
pub struct QueueEntry {
    pub priority: u8,
    pub hints: DestinationHints,
    pub json: Vec<u8>,
    /// Subsystem and message, cached alongside the JSON document so a
    /// downstream consumer (the remote shipper) can build its own wire
    /// format without re-parsing `json` -- the same "cache it, don't
    /// re-parse" treatment applied to the hint booleans, extended here to
    /// the two fields the shipper actually needs.
    pub subsystem: String,
    pub message: String,
    pub epoch_millis: u128,
}

impl QueueEntry {
    /// Builds a queue entry from a call-surface record and the epoch
    /// millisecond timestamp captured at enqueue time.
    pub fn encode(record: &LogRecord<'_>, epoch_millis: u128) -> QueueEntry {
        let json = encode_json(record, epoch_millis);
        QueueEntry {
            priority: record.severity.ordinal(),
            hints: record.hints,
            json: json.into_bytes(),
            subsystem: record.subsystem.as_str().to_string(),
            message: record.message.to_string(),
            epoch_millis,
        }
    }

    /// Borrowed view of the encoded document, e.g. for writing straight to a
    /// file sink or a console without copying.
    pub fn as_json_str(&self) -> &str {
        // SAFETY-free: the bytes were produced by `encode_json` below, which
        // only ever pushes onto a `String`.
        std::str::from_utf8(&self.json).unwrap_or("")
    }
}

/// Hand-assembles the record's JSON document with a fixed key order,
/// mirroring the style of a custom `Serialize` impl that controls exact
/// field order and escaping instead of deriving it (the loggers in this
/// corpus that target a specific downstream parser do this rather than
/// accept whatever `serde_json::to_string` produces for a derived struct).
fn encode_json(record: &LogRecord<'_>, epoch_millis: u128) -> String {
    let mut out = String::with_capacity(record.message.len() + 96);
    out.push('{');

    out.push_str("\"timestamp\":");
    out.push_str(&epoch_millis.to_string());

    out.push_str(",\"subsystem\":\"");
    escape_into(record.subsystem.as_str(), &mut out);
    out.push('"');

    out.push_str(",\"severity\":\"");
    out.push_str(record.severity.label());
    out.push('"');

    out.push_str(",\"message\":\"");
    escape_into(record.message, &mut out);
    out.push('"');

    push_hint(&mut out, "LogConsole", record.hints.contains(crate::destination::Destination::Console));
    push_hint(&mut out, "LogFile", record.hints.contains(crate::destination::Destination::File));
    push_hint(&mut out, "LogRemote", record.hints.contains(crate::destination::Destination::Remote));
    push_hint(&mut out, "LogDatabase", record.hints.contains(crate::destination::Destination::Database));
    push_hint(&mut out, "LogNotify", record.hints.contains(crate::destination::Destination::Notify));

    out.push('}');
    out
}

fn push_hint(out: &mut String, key: &str, value: bool) {
    out.push_str(",\"");
    out.push_str(key);
    out.push_str("\":");
    out.push_str(if value { "true" } else { "false" });
}

/// Minimal JSON string escaping: the control characters and quote/backslash
/// that would otherwise produce invalid JSON. Not a general-purpose escaper;
/// subsystem names and messages are the only inputs it ever sees.
fn escape_into(input: &str, out: &mut String) {
    for c in input.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::Destination;

    #[test]
    fn encode_includes_all_five_hint_keys() {
        let subsystem = Subsystem::new("WebServer");
        let record = LogRecord {
            subsystem: &subsystem,
            severity: Severity::Error,
            message: "connection refused",
            hints: DestinationHints::from(Destination::Console) | DestinationHints::from(Destination::Remote),
        };
        let entry = QueueEntry::encode(&record, 1_700_000_000_000);
        let json = entry.as_json_str();
        assert!(json.contains("\"LogConsole\":true"));
        assert!(json.contains("\"LogFile\":false"));
        assert!(json.contains("\"LogRemote\":true"));
        assert!(json.contains("\"LogDatabase\":false"));
        assert!(json.contains("\"LogNotify\":false"));
        assert!(json.contains("\"severity\":\"ERROR\""));
        assert_eq!(entry.priority, Severity::Error.ordinal());
    }

    #[test]
    fn escaping_handles_quotes_and_newlines() {
        let subsystem = Subsystem::new("X");
        let record = LogRecord {
            subsystem: &subsystem,
            severity: Severity::Trace,
            message: "line one\nline \"two\"\\done",
            hints: DestinationHints::NONE,
        };
        let entry = QueueEntry::encode(&record, 0);
        let json = entry.as_json_str();
        assert!(json.contains("line one\\nline \\\"two\\\"\\\\done"));
    }

    #[test]
    fn priority_ordering_matches_severity_ordering() {
        let subsystem = Subsystem::new("X");
        let low = QueueEntry::encode(
            &LogRecord { subsystem: &subsystem, severity: Severity::Trace, message: "", hints: DestinationHints::NONE },
            0,
        );
        let high = QueueEntry::encode(
            &LogRecord { subsystem: &subsystem, severity: Severity::Fatal, message: "", hints: DestinationHints::NONE },
            0,
        );
        assert!(low.priority < high.priority);
    }
}
