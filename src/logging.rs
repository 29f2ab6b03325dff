//! Append-only operation log.
//!
//! Each engine instance owns its own [`LogSink`] rather than sharing a
//! process-global logger, so independent instances can coexist in tests and
//! embedders can point each history/log pair wherever they like. Lines are
//! timestamped and written best-effort: a log write failure never affects the
//! operation being logged.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Line-oriented log writing `YYYY-MM-DD HH:MM:SS - LEVEL - message` entries.
#[derive(Debug, Clone)]
pub struct LogSink {
    path: Option<PathBuf>,
}

impl LogSink {
    /// A sink appending to the given file, creating it on first write.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A sink that discards everything.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// The file this sink appends to, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn info(&self, message: &str) {
        self.append("INFO", message);
    }

    pub fn warn(&self, message: &str) {
        self.append("WARN", message);
    }

    pub fn error(&self, message: &str) {
        self.append("ERROR", message);
    }

    fn append(&self, level: &str, message: &str) {
        let Some(path) = &self.path else {
            return;
        };

        let line = format!(
            "{} - {} - {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            level,
            message
        );

        // Best effort: a failing log must not fail the run.
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = file.write_all(line.as_bytes());
        }
    }
}
