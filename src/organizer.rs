//! The organize engine: one full directory pass.
//!
//! A pass enumerates the immediate regular-file children of a directory,
//! classifies each by extension, and moves it into the matching category
//! folder under `Sorted/`, recording every move in the history store so the
//! pass can be reversed. One bad file never aborts the pass: per-file failures
//! are logged, tallied and skipped over.
//!
//! The engine is synchronous and single-threaded. At most one organize or
//! undo call may be in flight against a given directory/history pair;
//! embedders in concurrent environments must serialize access externally.

use crate::categories::Registry;
use crate::config::ExcludeFilters;
use crate::error::{EngineError, EngineResult};
use crate::history::HistoryStore;
use crate::logging::LogSink;
use crate::naming::resolve_unique_name;
use crate::placement::already_sorted;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the subfolder that receives the category tree.
pub const SORTED_ROOT: &str = "Sorted";

/// Outcome tally of an organize or undo pass.
///
/// Partial failure is observable here rather than being a hard error: the
/// caller always gets the full tally even when some per-file operations
/// failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    /// Files moved (organize) or restored (undo).
    pub moved: usize,
    /// Files left alone because they were already settled.
    pub skipped: usize,
    /// Files that could not be moved or restored.
    pub failed: usize,
}

impl Report {
    /// Total number of files the pass considered.
    pub fn total(&self) -> usize {
        self.moved + self.skipped + self.failed
    }

    /// True when nothing went wrong.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// A file eligible for sorting, enumerated fresh on every pass.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Bare filename.
    pub name: String,
    /// Absolute path in the directory being organized.
    pub path: PathBuf,
}

/// File sorting engine with a single-shot undo.
///
/// Each instance carries its own history location and log sink, so multiple
/// independent engines can coexist (one per directory, or per test).
///
/// # Examples
///
/// ```no_run
/// use sortify::{LogSink, Sorter};
/// use std::path::Path;
///
/// let sorter = Sorter::new(Sorter::default_history_path(), LogSink::to_file("sortify.log"));
/// let report = sorter.organize(Path::new("/home/me/Downloads"), true)?;
/// println!("moved {}, skipped {}", report.moved, report.skipped);
/// # Ok::<(), sortify::EngineError>(())
/// ```
pub struct Sorter {
    registry: Registry,
    history_path: PathBuf,
    log: LogSink,
    filters: ExcludeFilters,
}

impl Sorter {
    /// Creates an engine with the default category table and no exclusion
    /// filters.
    pub fn new(history_path: impl Into<PathBuf>, log: LogSink) -> Self {
        Self {
            registry: Registry::default_table(),
            history_path: history_path.into(),
            log,
            filters: ExcludeFilters::none(),
        }
    }

    /// Replaces the category table. The table is fixed for the lifetime of
    /// the engine.
    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Installs candidate exclusion filters, usually compiled from
    /// configuration.
    pub fn with_filters(mut self, filters: ExcludeFilters) -> Self {
        self.filters = filters;
        self
    }

    /// The well-known history location: `$HOME/.sortify_history.json`, or the
    /// working directory when `$HOME` is unset.
    pub fn default_history_path() -> PathBuf {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".sortify_history.json")
    }

    /// The category table this engine classifies with.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Runs one organize pass over `directory`.
    ///
    /// With `keep_existing` set, files previously sorted stay where they are;
    /// otherwise every existing category folder under `Sorted/` is deleted
    /// first. That cleanup is destructive for files not tracked in history,
    /// including manually added ones.
    ///
    /// # Errors
    ///
    /// [`EngineError::DirectoryNotFound`] when `directory` does not exist;
    /// [`EngineError::AccessDenied`] when it cannot be listed or the sorted
    /// root cannot be created. Per-file failures are tallied in the report
    /// instead.
    pub fn organize(&self, directory: &Path, keep_existing: bool) -> EngineResult<Report> {
        self.organize_with_progress(directory, keep_existing, |_, _| {})
    }

    /// Same as [`organize`](Self::organize), invoking `progress(processed,
    /// total)` after each per-file step. The callback has no UI dependency;
    /// front ends map it onto whatever progress display they own.
    pub fn organize_with_progress(
        &self,
        directory: &Path,
        keep_existing: bool,
        mut progress: impl FnMut(usize, usize),
    ) -> EngineResult<Report> {
        if !directory.exists() {
            return Err(EngineError::DirectoryNotFound {
                path: directory.to_path_buf(),
            });
        }

        let directory = fs::canonicalize(directory).map_err(|e| EngineError::AccessDenied {
            path: directory.to_path_buf(),
            source: e,
        })?;

        let candidates = self.enumerate(&directory)?;
        if candidates.is_empty() {
            // Nothing to do is not an error, and no Sorted/ tree is created.
            return Ok(Report::default());
        }

        let sorted_root = directory.join(SORTED_ROOT);
        fs::create_dir_all(&sorted_root).map_err(|e| EngineError::AccessDenied {
            path: sorted_root.clone(),
            source: e,
        })?;

        if !keep_existing {
            self.clean_sorted_tree(&sorted_root);
        }

        let mut history = self.open_history_lenient();
        let total = candidates.len();
        let mut report = Report::default();

        for (processed, candidate) in candidates.iter().enumerate() {
            self.sort_one(candidate, &sorted_root, &mut history, &mut report);
            progress(processed + 1, total);
        }

        Ok(report)
    }

    /// Lists candidate files: immediate children that are regular files, not
    /// hidden, not the engine's own history or log file, and not excluded by
    /// the configured filters. Sorted by name so passes are deterministic.
    fn enumerate(&self, directory: &Path) -> EngineResult<Vec<Candidate>> {
        let reserved: Vec<PathBuf> = [
            Some(self.history_path.clone()),
            self.log.path().map(Path::to_path_buf),
        ]
        .into_iter()
        .flatten()
        .map(absolute_reserved_path)
        .collect();

        let entries = fs::read_dir(directory).map_err(|e| EngineError::AccessDenied {
            path: directory.to_path_buf(),
            source: e,
        })?;

        let mut candidates = Vec::new();
        for entry in entries.flatten() {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            if self.filters.excludes(&name) {
                continue;
            }

            let path = entry.path();
            if reserved.iter().any(|r| r == &path) {
                continue;
            }

            candidates.push(Candidate { name, path });
        }

        candidates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(candidates)
    }

    /// Deletes every existing category folder (including `Others`) under the
    /// sorted root. Failures are logged and skipped; the pass continues.
    fn clean_sorted_tree(&self, sorted_root: &Path) {
        for folder in self.registry.folder_names() {
            let dir = sorted_root.join(folder);
            if dir.exists()
                && let Err(e) = fs::remove_dir_all(&dir)
            {
                self.log
                    .error(&format!("failed to remove {}: {}", dir.display(), e));
            }
        }
    }

    /// Opens the history for appending. A corrupt document is reset to empty
    /// here (with a logged warning); only undo treats corruption as fatal.
    fn open_history_lenient(&self) -> HistoryStore {
        match HistoryStore::load(&self.history_path) {
            Ok(history) => history,
            Err(EngineError::NoHistory) => HistoryStore::empty(&self.history_path),
            Err(e) => {
                self.log.warn(&format!("starting fresh history: {}", e));
                HistoryStore::empty(&self.history_path)
            }
        }
    }

    /// Processes a single candidate, updating the tally in place.
    fn sort_one(
        &self,
        candidate: &Candidate,
        sorted_root: &Path,
        history: &mut HistoryStore,
        report: &mut Report,
    ) {
        let category = self.registry.classify(&extension_of(&candidate.name));
        let category_dir = sorted_root.join(category);

        if let Err(e) = fs::create_dir_all(&category_dir) {
            self.log.error(&format!(
                "failed to create {}: {}",
                category_dir.display(),
                e
            ));
            report.failed += 1;
            return;
        }

        // Already in its own correct slot.
        if candidate.path == category_dir.join(&candidate.name) {
            report.skipped += 1;
            return;
        }

        // Same name somewhere else under Sorted/, e.g. from a previous run.
        if already_sorted(sorted_root, &self.registry, &candidate.name) {
            report.skipped += 1;
            return;
        }

        let final_name = resolve_unique_name(&category_dir, &candidate.name);
        let destination = category_dir.join(&final_name);

        match fs::rename(&candidate.path, &destination) {
            Ok(()) => {
                self.log
                    .info(&format!("moved: {} -> {}/", candidate.name, category));
                history.push(destination, candidate.path.clone());
                match history.save() {
                    Ok(()) => report.moved += 1,
                    Err(e) => {
                        self.log.error(&format!(
                            "failed to persist history after moving {}: {}",
                            candidate.name, e
                        ));
                        report.failed += 1;
                    }
                }
            }
            Err(e) => {
                self.log
                    .error(&format!("failed to move {}: {}", candidate.name, e));
                report.failed += 1;
            }
        }
    }

    pub(crate) fn history_path(&self) -> &Path {
        &self.history_path
    }

    pub(crate) fn log(&self) -> &LogSink {
        &self.log
    }
}

/// Absolute form of an engine-owned path for comparison against enumerated
/// entry paths, which are always canonical. When the file does not exist yet
/// its parent is resolved instead, so a relative configured path still
/// matches once the file appears.
fn absolute_reserved_path(path: PathBuf) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(&path) {
        return resolved;
    }

    if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
        let parent = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        if let Ok(parent) = fs::canonicalize(parent) {
            return parent.join(name);
        }
    }

    path
}

/// Lower-cased extension of a filename, with the leading dot. Empty when the
/// name has no extension; a leading dot alone does not count.
fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(pos) if pos > 0 => name[pos..].to_lowercase(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_sorter(temp_dir: &TempDir) -> Sorter {
        Sorter::new(
            temp_dir.path().join("history.json"),
            LogSink::disabled(),
        )
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("a.PNG"), ".png");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("README"), "");
        assert_eq!(extension_of(".bashrc"), "");
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let sorter = test_sorter(&temp_dir);

        let result = sorter.organize(Path::new("/no/such/directory"), true);
        assert!(matches!(
            result,
            Err(EngineError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_empty_directory_reports_zero_and_creates_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let target = temp_dir.path().join("target");
        fs::create_dir(&target).expect("Failed to create dir");

        let sorter = test_sorter(&temp_dir);
        let report = sorter.organize(&target, true).expect("Organize failed");

        assert_eq!(report, Report::default());
        assert!(!target.join(SORTED_ROOT).exists());
    }

    #[test]
    fn test_hidden_files_are_not_candidates() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let target = temp_dir.path().join("target");
        fs::create_dir(&target).expect("Failed to create dir");
        fs::write(target.join(".hidden.png"), "x").expect("Failed to write");

        let sorter = test_sorter(&temp_dir);
        let report = sorter.organize(&target, true).expect("Organize failed");

        assert_eq!(report.total(), 0);
        assert!(target.join(".hidden.png").exists());
    }

    #[test]
    fn test_basic_pass_moves_by_category() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let target = temp_dir.path().join("target");
        fs::create_dir(&target).expect("Failed to create dir");
        fs::write(target.join("photo.jpg"), "img").expect("Failed to write");
        fs::write(target.join("song.mp3"), "snd").expect("Failed to write");

        let sorter = test_sorter(&temp_dir);
        let report = sorter.organize(&target, true).expect("Organize failed");

        assert_eq!(
            report,
            Report {
                moved: 2,
                skipped: 0,
                failed: 0
            }
        );
        assert!(target.join("Sorted/Images/photo.jpg").exists());
        assert!(target.join("Sorted/Music/song.mp3").exists());
        assert!(!target.join("photo.jpg").exists());
    }

    #[test]
    fn test_history_file_inside_target_is_not_sorted() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let target = temp_dir.path().join("target");
        fs::create_dir(&target).expect("Failed to create dir");
        fs::write(target.join("notes.txt"), "n").expect("Failed to write");

        // History lives inside the directory being organized.
        let sorter = Sorter::new(target.join("history.json"), LogSink::disabled());
        let report = sorter.organize(&target, true).expect("Organize failed");

        assert_eq!(report.moved, 1);
        assert!(target.join("history.json").exists());
        assert!(!target.join("Sorted/Others/history.json").exists());
    }

    #[test]
    fn test_reserved_path_resolves_parent_when_file_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(temp_dir.path().join("sub")).expect("Failed to create dir");

        // Not on disk yet, and not in canonical form.
        let configured = temp_dir.path().join("sub").join("..").join("history.json");
        let resolved = absolute_reserved_path(configured);

        let canonical_root =
            fs::canonicalize(temp_dir.path()).expect("Failed to canonicalize");
        assert_eq!(resolved, canonical_root.join("history.json"));
    }

    #[test]
    fn test_non_canonical_history_path_is_still_guarded() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let target = temp_dir.path().join("target");
        fs::create_dir(&target).expect("Failed to create dir");
        fs::write(target.join("notes.txt"), "n").expect("Failed to write");

        // Configured path takes a detour; entries are enumerated canonically.
        let history_path = target.join("..").join("target").join("history.json");
        let sorter = Sorter::new(history_path, LogSink::disabled());

        sorter.organize(&target, true).expect("First organize failed");
        let second = sorter.organize(&target, true).expect("Second organize failed");

        assert_eq!(second.total(), 0);
        assert!(target.join("history.json").exists());
        assert!(!target.join("Sorted/Others/history.json").exists());
    }

    #[test]
    fn test_progress_callback_counts_up_to_total() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let target = temp_dir.path().join("target");
        fs::create_dir(&target).expect("Failed to create dir");
        fs::write(target.join("a.png"), "a").expect("Failed to write");
        fs::write(target.join("b.mp4"), "b").expect("Failed to write");
        fs::write(target.join("c.xyz"), "c").expect("Failed to write");

        let sorter = test_sorter(&temp_dir);
        let mut calls = Vec::new();
        sorter
            .organize_with_progress(&target, true, |processed, total| {
                calls.push((processed, total));
            })
            .expect("Organize failed");

        assert_eq!(calls, [(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_report_tally_helpers() {
        let report = Report {
            moved: 2,
            skipped: 1,
            failed: 1,
        };
        assert_eq!(report.total(), 4);
        assert!(!report.is_clean());
        assert!(Report::default().is_clean());
    }
}
