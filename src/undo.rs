//! The undo engine: replaying the history store to restore files.
//!
//! Undo is single-shot and non-stacking: the whole ledger is consumed by one
//! pass, success or not, and the document is deleted afterwards regardless of
//! how many individual restores failed. That trades partial-failure
//! recoverability for a simple, bounded model.

use crate::error::EngineResult;
use crate::history::{HistoryStore, MoveRecord};
use crate::logging::LogSink;
use crate::organizer::{Report, Sorter};
use std::fs;

impl Sorter {
    /// Reverses the recorded moves, restoring each file to its original
    /// location and recreating any missing parent directories.
    ///
    /// Records are replayed in the order stored. A record whose relocated path
    /// no longer exists is logged, counted as failed and consumed like any
    /// other. After the pass the history document is deleted unconditionally.
    ///
    /// Returns `{moved: restored, skipped: 0, failed}`.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoHistory`] when there is nothing to undo (informational,
    /// not a failure); [`EngineError::CorruptHistory`] when the document cannot
    /// be parsed, in which case it is left on disk for manual recovery.
    pub fn undo(&self) -> EngineResult<Report> {
        self.undo_with_progress(|_, _| {})
    }

    /// Same as [`undo`](Self::undo), invoking `progress(processed, total)`
    /// after each record.
    pub fn undo_with_progress(
        &self,
        mut progress: impl FnMut(usize, usize),
    ) -> EngineResult<Report> {
        let history = HistoryStore::load(self.history_path())?;

        let total = history.len();
        let mut report = Report::default();

        for (processed, record) in history.records().iter().enumerate() {
            if restore_one(record, self.log()) {
                report.moved += 1;
            } else {
                report.failed += 1;
            }
            progress(processed + 1, total);
        }

        // The ledger is spent even when restores failed.
        if let Err(e) = history.delete() {
            self.log()
                .error(&format!("failed to delete history: {}", e));
        }

        Ok(report)
    }
}

/// Moves one file back to its original location. Returns true on success.
fn restore_one(record: &MoveRecord, log: &LogSink) -> bool {
    if !record.relocated.exists() {
        log.warn(&format!(
            "not found, cannot restore: {}",
            record.relocated.display()
        ));
        return false;
    }

    if let Some(parent) = record.original.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        log.error(&format!(
            "failed to recreate {}: {}",
            parent.display(),
            e
        ));
        return false;
    }

    match fs::rename(&record.relocated, &record.original) {
        Ok(()) => {
            log.info(&format!(
                "restored: {} -> {}",
                record.relocated.display(),
                record.original.display()
            ));
            true
        }
        Err(e) => {
            log.error(&format!(
                "failed to restore {}: {}",
                record.relocated.display(),
                e
            ));
            false
        }
    }
}
