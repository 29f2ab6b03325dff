//! Error taxonomy shared by the organize and undo engines.
//!
//! Structural preconditions (missing directory, unreadable history) surface as
//! distinguishable errors; per-file failures during a pass are recovered locally,
//! logged, and tallied in the [`Report`](crate::organizer::Report) instead.

use std::path::PathBuf;

/// Errors returned by [`Sorter::organize`](crate::Sorter::organize) and
/// [`Sorter::undo`](crate::Sorter::undo).
#[derive(Debug)]
pub enum EngineError {
    /// The directory to organize does not exist.
    DirectoryNotFound { path: PathBuf },
    /// A directory could not be listed or a required directory could not be
    /// created due to a permission or I/O failure.
    AccessDenied {
        path: PathBuf,
        source: std::io::Error,
    },
    /// No history document exists (or it is empty). Informational: there is
    /// simply nothing to undo.
    NoHistory,
    /// The history document exists but cannot be parsed. The file is left
    /// untouched so it can be inspected or repaired by hand.
    CorruptHistory { path: PathBuf, reason: String },
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryNotFound { path } => {
                write!(f, "Directory not found: {}", path.display())
            }
            Self::AccessDenied { path, source } => {
                write!(f, "Access denied for {}: {}", path.display(), source)
            }
            Self::NoHistory => {
                write!(f, "No previous organization to undo")
            }
            Self::CorruptHistory { path, reason } => {
                write!(
                    f,
                    "History file {} is corrupt: {}",
                    path.display(),
                    reason
                )
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AccessDenied { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
