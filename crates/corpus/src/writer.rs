// Copyright (C) 2024 Red Hat
// SPDX-License-Identifier: Apache-2.0

//! This module appends timestamped leveled records to the machine log file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A record severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Informational record.
    Info,
    /// Warning record.
    Warning,
    /// Error record.
    Error,
    /// Critical record.
    Critical,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        };
        write!(f, "{}", name)
    }
}

/// A line writer producing `YYYY-MM-DD HH:MM:SS LEVEL text` records.
pub struct LogWriter {
    out: BufWriter<File>,
}

impl LogWriter {
    /// Truncate-create the log file.
    pub fn create(path: &Path) -> std::io::Result<LogWriter> {
        tracing::debug!(path = path.to_str(), "Creating file");
        Ok(LogWriter {
            out: BufWriter::new(File::create(path)?),
        })
    }

    /// Append a single record.
    pub fn append(&mut self, level: Level, text: &str) -> std::io::Result<()> {
        let now = chrono::Local::now();
        writeln!(
            self.out,
            "{} {} {}",
            now.format("%Y-%m-%d %H:%M:%S"),
            level,
            text
        )
    }

    /// Flush the buffered records.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;
    use regex::Regex;

    #[test]
    fn test_record_format() {
        lazy_static! {
            static ref RE: Regex = Regex::new(
                r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} WARNING some log line$"
            )
            .unwrap();
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("machine.01.log");
        let mut writer = LogWriter::create(&path).unwrap();
        writer.append(Level::Warning, "some log line").unwrap();
        writer.flush().unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(RE.is_match(content.trim_end()), "bad record: {}", content);
    }

    #[test]
    fn test_create_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("machine.01.log");
        for _ in 0..2 {
            let mut writer = LogWriter::create(&path).unwrap();
            writer.append(Level::Info, "once").unwrap();
            writer.flush().unwrap();
        }
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
