//! The severity scale shared across every destination and sink.
//!
//! Mirrors the shape of `opentelemetry::logs::Severity`
//! (`opentelemetry/src/logs/record.rs`): a small `Copy` enum that derives
//! `Ord`/`PartialOrd` directly off declaration order so threshold comparisons
//! are just integer comparisons, never string comparisons.

/// A totally ordered logging severity.
///
/// `Trace` as a threshold means "pass everything"; `Quiet` is write-only and
/// used as a threshold to disable a destination entirely. Comparisons always
/// use the ordinal (derived `Ord`), never the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Trace,
    Debug,
    State,
    Alert,
    Error,
    Fatal,
    Quiet,
}

impl Severity {
    /// All severities in ascending order, for iteration (e.g. config dumps).
    pub const ALL: [Severity; 7] = [
        Severity::Trace,
        Severity::Debug,
        Severity::State,
        Severity::Alert,
        Severity::Error,
        Severity::Fatal,
        Severity::Quiet,
    ];

    /// The fixed uppercase label used in formatted lines and remote records.
    pub const fn label(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::State => "STATE",
            Severity::Alert => "ALERT",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
            Severity::Quiet => "QUIET",
        }
    }

    /// Position on the [`Severity::ALL`] scale, `Trace` = 0 .. `Quiet` = 6.
    /// Cached on [`crate::record::QueueEntry`] as `priority` so dispatch
    /// decisions never need to re-derive it from the label.
    pub fn ordinal(&self) -> u8 {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0) as u8
    }

    /// Inverse of [`Severity::ordinal`]. Out-of-range input (never produced
    /// by this crate, but a queue entry could in principle carry a stale
    /// value across a format change) clamps to `Quiet`, the safest
    /// direction to fail in -- a record silently suppressed beats one
    /// misrouted to every destination.
    pub fn from_ordinal(ordinal: u8) -> Severity {
        Self::ALL.get(ordinal as usize).copied().unwrap_or(Severity::Quiet)
    }

    /// Case-insensitive parse; unknown input falls back to `default` rather
    /// than erroring.
    pub fn parse(text: &str, default: Severity) -> Severity {
        match text.to_ascii_uppercase().as_str() {
            "TRACE" => Severity::Trace,
            "DEBUG" => Severity::Debug,
            "STATE" => Severity::State,
            "ALERT" => Severity::Alert,
            "ERROR" => Severity::Error,
            "FATAL" => Severity::Fatal,
            "QUIET" => Severity::Quiet,
            _ => default,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
