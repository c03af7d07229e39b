//! Severity-threshold filtering, per destination.
//!
//! Each destination has its own default minimum severity, plus an optional
//! per-subsystem override -- a map from subsystem name to a per-subsystem
//! minimum severity -- so a noisy subsystem can be quieted (or
//! a quiet one opened up) for one destination without touching the global
//! default or any other destination's table. A record is eligible for a
//! destination iff its severity is >= the threshold that applies to its
//! subsystem at that destination. `Severity::Quiet` as a threshold disables
//! a destination (or a single subsystem on it) outright, since nothing
//! compares as `>= Quiet` except `Quiet` itself and records never carry
//! that as their own level.

use std::collections::HashMap;

use hydrogen_log::{Destination, DestinationHints, Severity};

/// Per-destination severity thresholds, with optional per-subsystem
/// overrides.
///
/// Console and File are verbose by default (`Trace`), while
/// Remote/Database/Notify start disabled (`Quiet`) until explicitly
/// configured, since those destinations imply an external dependency a
/// caller must opt into.
#[derive(Debug, Clone)]
pub struct DestinationFilter {
    defaults: [Severity; 5],
    overrides: [HashMap<String, Severity>; 5],
}

impl Default for DestinationFilter {
    fn default() -> Self {
        DestinationFilter {
            defaults: [
                Severity::Trace,  // Console
                Severity::Trace,  // File
                Severity::Quiet,  // Remote
                Severity::Quiet,  // Database
                Severity::Quiet,  // Notify
            ],
            overrides: Default::default(),
        }
    }
}

fn slot(destination: Destination) -> usize {
    match destination {
        Destination::Console => 0,
        Destination::File => 1,
        Destination::Remote => 2,
        Destination::Database => 3,
        Destination::Notify => 4,
    }
}

impl DestinationFilter {
    /// The configured default threshold for `destination`, ignoring any
    /// per-subsystem override.
    pub fn default_threshold(&self, destination: Destination) -> Severity {
        self.defaults[slot(destination)]
    }

    pub fn set_default_threshold(&mut self, destination: Destination, severity: Severity) {
        self.defaults[slot(destination)] = severity;
    }

    pub fn with_default_threshold(mut self, destination: Destination, severity: Severity) -> Self {
        self.set_default_threshold(destination, severity);
        self
    }

    /// Overrides the threshold for one subsystem at one destination,
    /// independent of that destination's default and every other
    /// destination's table.
    pub fn set_subsystem_threshold(&mut self, destination: Destination, subsystem: &str, severity: Severity) {
        self.overrides[slot(destination)].insert(subsystem.to_string(), severity);
    }

    pub fn with_subsystem_threshold(mut self, destination: Destination, subsystem: &str, severity: Severity) -> Self {
        self.set_subsystem_threshold(destination, subsystem, severity);
        self
    }

    /// The threshold that actually applies to `subsystem` at `destination`:
    /// the per-subsystem override if one is set, else the destination's
    /// default.
    pub fn threshold(&self, destination: Destination, subsystem: &str) -> Severity {
        self.overrides[slot(destination)]
            .get(subsystem)
            .copied()
            .unwrap_or_else(|| self.default_threshold(destination))
    }

    fn allows(&self, destination: Destination, subsystem: &str, severity: Severity) -> bool {
        severity >= self.threshold(destination, subsystem)
    }

    /// Computes the destination hint mask for a record at the given
    /// subsystem and severity: the single place "does this record qualify
    /// for Remote" (or any other destination) is decided, so the fan-out
    /// fan-out router never needs a second, separate eligibility check
    /// alongside the hint bits already carried on the queue entry.
    pub fn resolve_hints(&self, subsystem: &str, severity: Severity) -> DestinationHints {
        let mut hints = DestinationHints::NONE;
        for destination in Destination::ALL {
            if self.allows(destination, subsystem, severity) {
                hints = hints.with(destination);
            }
        }
        hints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_console_and_file_but_not_remote() {
        let filter = DestinationFilter::default();
        let hints = filter.resolve_hints("Test", Severity::Trace);
        assert!(hints.contains(Destination::Console));
        assert!(hints.contains(Destination::File));
        assert!(!hints.contains(Destination::Remote));
        assert!(!hints.contains(Destination::Database));
        assert!(!hints.contains(Destination::Notify));
    }

    #[test]
    fn raising_a_default_threshold_excludes_lower_severities() {
        let filter = DestinationFilter::default().with_default_threshold(Destination::Console, Severity::Error);
        assert!(!filter.resolve_hints("Test", Severity::State).contains(Destination::Console));
        assert!(filter.resolve_hints("Test", Severity::Fatal).contains(Destination::Console));
    }

    #[test]
    fn quiet_threshold_disables_destination_entirely() {
        let filter = DestinationFilter::default().with_default_threshold(Destination::File, Severity::Quiet);
        assert!(!filter.resolve_hints("Test", Severity::Fatal).contains(Destination::File));
    }

    #[test]
    fn enabling_remote_makes_it_eligible_above_threshold() {
        let filter = DestinationFilter::default().with_default_threshold(Destination::Remote, Severity::Alert);
        assert!(!filter.resolve_hints("Test", Severity::State).contains(Destination::Remote));
        assert!(filter.resolve_hints("Test", Severity::Alert).contains(Destination::Remote));
        assert!(filter.resolve_hints("Test", Severity::Error).contains(Destination::Remote));
    }

    #[test]
    fn subsystem_override_applies_only_to_the_named_subsystem() {
        let filter = DestinationFilter::default().with_subsystem_threshold(
            Destination::Console,
            "Chatty",
            Severity::Error,
        );
        assert!(!filter.resolve_hints("Chatty", Severity::State).contains(Destination::Console));
        assert!(filter.resolve_hints("Quiet", Severity::State).contains(Destination::Console));
    }

    #[test]
    fn subsystem_override_can_relax_a_disabled_destination() {
        let filter = DestinationFilter::default().with_subsystem_threshold(
            Destination::Remote,
            "Billing",
            Severity::State,
        );
        assert!(filter.resolve_hints("Billing", Severity::State).contains(Destination::Remote));
        assert!(!filter.resolve_hints("OtherSubsystem", Severity::State).contains(Destination::Remote));
    }
}
