//! The Console sink: writes each eligible record as one line to stderr.
//!
//! Stderr, not stdout, so a process's normal stdout stream stays free for
//! its actual output -- the same convention `tracing-subscriber`'s default
//! formatter follows.

use std::io::{self, Write};

use hydrogen_log::QueueEntry;

use crate::format::{self, DEFAULT_LEVEL_WIDTH, DEFAULT_SUBSYSTEM_WIDTH};

use super::Sink;

pub struct ConsoleSink {
    writer: Box<dyn Write + Send>,
    level_width: usize,
    subsystem_width: usize,
}

impl ConsoleSink {
    pub fn stderr() -> Self {
        ConsoleSink {
            writer: Box::new(io::stderr()),
            level_width: DEFAULT_LEVEL_WIDTH,
            subsystem_width: DEFAULT_SUBSYSTEM_WIDTH,
        }
    }

    /// Same as [`ConsoleSink::stderr`] but with the formatted line's
    /// level/subsystem column widths overridden.
    pub fn stderr_with_widths(level_width: usize, subsystem_width: usize) -> Self {
        ConsoleSink { writer: Box::new(io::stderr()), level_width, subsystem_width }
    }

    #[cfg(test)]
    fn with_writer(writer: impl Write + Send + 'static) -> Self {
        ConsoleSink {
            writer: Box::new(writer),
            level_width: DEFAULT_LEVEL_WIDTH,
            subsystem_width: DEFAULT_SUBSYSTEM_WIDTH,
        }
    }
}

impl Sink for ConsoleSink {
    fn accept(&mut self, entry: &QueueEntry) -> io::Result<()> {
        let line = format::format_line(entry, self.level_width, self.subsystem_width);
        self.writer.write_all(line.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
