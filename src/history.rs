//! Durable move history enabling undo.
//!
//! The history is a single pretty-printed JSON document: a flat object mapping
//! each relocated path to the original path it came from, in insertion order
//! (`serde_json` is built with `preserve_order` so the order survives a
//! round-trip). Keys are unique; recording a relocated path that is already
//! present replaces the stale value. Non-string members of the object are
//! ignored on load so future additive fields stay compatible.
//!
//! There is no in-memory cache across invocations: each organize or undo call
//! reads, mutates and rewrites the whole document, making the file the only
//! source of truth even across process restarts.

use crate::error::{EngineError, EngineResult};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// One reversible file relocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// Where the file is now (unique within the store).
    pub relocated: PathBuf,
    /// Where the file came from.
    pub original: PathBuf,
}

/// Ordered collection of [`MoveRecord`]s backed by a JSON document on disk.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    records: Vec<MoveRecord>,
}

impl HistoryStore {
    /// An empty store that will persist to `path` on the first save.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    /// Loads the store from disk.
    ///
    /// Returns [`EngineError::NoHistory`] when the document is missing or holds
    /// no records, and [`EngineError::CorruptHistory`] when it cannot be parsed
    /// as a JSON object. A corrupt document is left untouched on disk so it can
    /// be recovered by hand.
    pub fn load(path: &Path) -> EngineResult<Self> {
        if !path.exists() {
            return Err(EngineError::NoHistory);
        }

        let content = fs::read_to_string(path).map_err(|e| EngineError::AccessDenied {
            path: path.to_path_buf(),
            source: e,
        })?;

        let value: Value =
            serde_json::from_str(&content).map_err(|e| EngineError::CorruptHistory {
                path: path.to_path_buf(),
                reason: format!("JSON parse error: {}", e),
            })?;

        let map = value.as_object().ok_or_else(|| EngineError::CorruptHistory {
            path: path.to_path_buf(),
            reason: "expected a JSON object mapping relocated to original paths".to_string(),
        })?;

        let records: Vec<MoveRecord> = map
            .iter()
            .filter_map(|(relocated, original)| {
                original.as_str().map(|orig| MoveRecord {
                    relocated: PathBuf::from(relocated),
                    original: PathBuf::from(orig),
                })
            })
            .collect();

        if records.is_empty() {
            return Err(EngineError::NoHistory);
        }

        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    /// The on-disk location of this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends a move, replacing any existing record for the same relocated
    /// path. A path cannot be the destination of two moves at once; original
    /// paths may repeat across runs and the newest relocation wins.
    pub fn push(&mut self, relocated: PathBuf, original: PathBuf) {
        if let Some(existing) = self.records.iter_mut().find(|r| r.relocated == relocated) {
            existing.original = original;
        } else {
            self.records.push(MoveRecord {
                relocated,
                original,
            });
        }
    }

    /// Rewrites the whole document, pretty-printed.
    pub fn save(&self) -> std::io::Result<()> {
        let mut map = serde_json::Map::new();
        for record in &self.records {
            map.insert(
                record.relocated.to_string_lossy().to_string(),
                Value::String(record.original.to_string_lossy().to_string()),
            );
        }

        let json_string = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json_string)
    }

    /// Removes the document from disk, if present.
    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
