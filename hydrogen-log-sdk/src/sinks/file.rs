//! The File sink: appends each eligible record as one line to a single log
//! file, reopening on write failure rather than giving up for the process
//! lifetime.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use hydrogen_log::QueueEntry;

use crate::format::{self, DEFAULT_LEVEL_WIDTH, DEFAULT_SUBSYSTEM_WIDTH};

use super::Sink;

pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    level_width: usize,
    subsystem_width: usize,
}

impl FileSink {
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = open_append(&path)?;
        Ok(FileSink {
            path,
            writer: Some(BufWriter::new(file)),
            level_width: DEFAULT_LEVEL_WIDTH,
            subsystem_width: DEFAULT_SUBSYSTEM_WIDTH,
        })
    }

    /// Same as [`FileSink::open`] but with the formatted line's
    /// level/subsystem column widths overridden.
    pub fn open_with_widths(path: impl AsRef<Path>, level_width: usize, subsystem_width: usize) -> io::Result<Self> {
        let mut sink = FileSink::open(path)?;
        sink.level_width = level_width;
        sink.subsystem_width = subsystem_width;
        Ok(sink)
    }

    fn reopen(&mut self) -> io::Result<()> {
        let file = open_append(&self.path)?;
        self.writer = Some(BufWriter::new(file));
        Ok(())
    }
}

fn open_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl Sink for FileSink {
    fn accept(&mut self, entry: &QueueEntry) -> io::Result<()> {
        let line = format::format_line(entry, self.level_width, self.subsystem_width);

        let result = (|| -> io::Result<()> {
            let writer = self.writer.as_mut().ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "sink closed"))?;
            writer.write_all(line.as_bytes())
        })();

        match result {
            Ok(()) => Ok(()),
            Err(_) => {
                // The file may have been rotated or deleted out from under
                // us; reopen once and retry before giving up on this record.
                self.reopen()?;
                let writer = self.writer.as_mut().expect("just reopened");
                writer.write_all(line.as_bytes())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.flush()?;
        self.writer = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydrogen_log::{Destination, DestinationHints, LogRecord, Severity, Subsystem};
    use std::fs;

    #[test]
    fn appends_lines_and_flushes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hydrogen.log");
        let mut sink = FileSink::open(&path).unwrap();

        let subsystem = Subsystem::new("Test");
        for msg in ["one", "two"] {
            let record = LogRecord {
                subsystem: &subsystem,
                severity: Severity::State,
                message: msg,
                hints: DestinationHints::from(Destination::File),
            };
            let entry = hydrogen_log::QueueEntry::encode(&record, 0);
            sink.accept(&entry).unwrap();
        }
        sink.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("one"));
        assert!(contents.contains("two"));
    }

    #[test]
    fn close_then_reopen_at_same_path_continues_appending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hydrogen.log");
        let subsystem = Subsystem::new("Test");
        let record = |msg: &str| {
            let rec = LogRecord {
                subsystem: &subsystem,
                severity: Severity::State,
                message: msg,
                hints: DestinationHints::from(Destination::File),
            };
            hydrogen_log::QueueEntry::encode(&rec, 0)
        };

        let mut sink = FileSink::open(&path).unwrap();
        sink.accept(&record("first")).unwrap();
        sink.close().unwrap();

        let mut sink = FileSink::open(&path).unwrap();
        sink.accept(&record("second")).unwrap();
        sink.flush().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
    }
}
