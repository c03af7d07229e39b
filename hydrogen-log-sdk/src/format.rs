//! The human-readable line Console and File write, built at dispatch time
//! from the cached fields on a [`QueueEntry`] rather than from its JSON
//! document -- the JSON is the wire format for a machine reader, this is
//! the format for a person tailing a terminal or a log file.

use hydrogen_log::{QueueEntry, Severity};

/// Level labels are already fixed-width (`Severity::label` is always five
/// characters), but the width is still a parameter rather than a constant:
/// a narrower/wider subsystem column is the one knob embedders reach for.
pub const DEFAULT_LEVEL_WIDTH: usize = 5;
pub const DEFAULT_SUBSYSTEM_WIDTH: usize = 12;

/// `YYYY-MM-DD HH:MM:SS.mmm  [ LEVEL ]  [ SUBSYSTEM ]  <details>\n`, in the
/// local timezone, with level and subsystem right-padded to the given
/// widths. A subsystem name longer than `subsystem_width` is left
/// un-truncated rather than cut -- the column is an alignment aid, not a
/// hard limit.
pub fn format_line(entry: &QueueEntry, level_width: usize, subsystem_width: usize) -> String {
    let severity = Severity::from_ordinal(entry.priority);
    let timestamp = format_timestamp(entry.epoch_millis);
    format!(
        "{timestamp}  [ {:<lw$} ]  [ {:<sw$} ]  {}\n",
        severity.label(),
        entry.subsystem,
        entry.message,
        lw = level_width,
        sw = subsystem_width,
    )
}

fn format_timestamp(epoch_millis: u128) -> String {
    let millis = (epoch_millis % 1000) as u32;
    let seconds = (epoch_millis / 1000) as i64;
    let utc = chrono::DateTime::<chrono::Utc>::from_timestamp(seconds, millis * 1_000_000)
        .unwrap_or_else(|| chrono::DateTime::<chrono::Utc>::from_timestamp(0, 0).unwrap());
    let local = utc.with_timezone(&chrono::Local);
    local.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}
