//! sortify - sort files into category subfolders, reversibly.
//!
//! This library classifies the files in a directory by extension, relocates
//! them into per-category subfolders under a `Sorted/` root, and records every
//! move in a durable history document so the whole pass can be undone later.
//! The core is a small synchronous API ([`Sorter::organize`] and
//! [`Sorter::undo`]) that any front end can drive; a clap-based CLI ships in
//! the binary.

pub mod categories;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod naming;
pub mod organizer;
pub mod output;
pub mod placement;
pub mod undo;

pub use categories::{Category, OTHERS, Registry};
pub use config::{Config, ConfigError, ExcludeFilters};
pub use error::{EngineError, EngineResult};
pub use history::{HistoryStore, MoveRecord};
pub use logging::LogSink;
pub use organizer::{Report, SORTED_ROOT, Sorter};
