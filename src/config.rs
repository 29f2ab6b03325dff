//! TOML configuration: engine paths and candidate exclusion rules.
//!
//! Configuration is optional; everything has a default. Lookup order:
//!
//! 1. an explicit `--config` path
//! 2. `.sortifyrc.toml` in the working directory
//! 3. `~/.config/sortify/config.toml`
//! 4. built-in defaults
//!
//! ```toml
//! [paths]
//! history_file = "/home/me/.sortify_history.json"
//! log_file = "/home/me/sortify.log"
//!
//! [exclude]
//! filenames = ["Thumbs.db"]
//! patterns = ["*.part"]
//! extensions = ["tmp", "crdownload"]
//! regex = ['^~\$']
//! ```
//!
//! Exclusion rules are compiled once into [`ExcludeFilters`] before a pass;
//! invalid glob or regex patterns are rejected at compile time rather than
//! mid-run. Excluded files are never candidates and appear in no tally.

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised while loading or compiling configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    NotFound(PathBuf),
    /// The file is not valid TOML or has the wrong shape.
    Invalid(String),
    /// An exclusion glob pattern failed to compile.
    BadGlobPattern(String),
    /// An exclusion regex failed to compile, with the compiler's reason.
    BadRegexPattern { pattern: String, reason: String },
    /// The file could not be read.
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::BadGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::BadRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::Io(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathOverrides,
    #[serde(default)]
    pub exclude: ExcludeRules,
}

/// Overrides for the engine's well-known file locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathOverrides {
    /// Where the move history document lives. Defaults to
    /// `$HOME/.sortify_history.json`.
    #[serde(default)]
    pub history_file: Option<PathBuf>,
    /// Where the operation log is appended. Defaults to `sortify.log` in the
    /// working directory.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

/// Rules excluding files from candidate enumeration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact filenames (e.g. "Thumbs.db").
    #[serde(default)]
    pub filenames: Vec<String>,
    /// Glob patterns matched against the filename (e.g. "*.part").
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Extensions without the dot, case-insensitive (e.g. "tmp").
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Regex patterns matched against the filename.
    #[serde(default)]
    pub regex: Vec<String>,
}

impl Config {
    /// Loads configuration, falling back through the documented lookup order.
    ///
    /// Only an explicitly provided path is required to exist; the well-known
    /// locations are silently skipped when absent.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local = PathBuf::from(".sortifyrc.toml");
        if local.exists() {
            return Self::load_from_file(&local);
        }

        if let Ok(home) = std::env::var("HOME") {
            let user = PathBuf::from(home)
                .join(".config")
                .join("sortify")
                .join("config.toml");
            if user.exists() {
                return Self::load_from_file(&user);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Compiles the exclusion rules, validating every pattern.
    pub fn compile_excludes(&self) -> Result<ExcludeFilters, ConfigError> {
        ExcludeFilters::compile(&self.exclude)
    }
}

/// Pre-compiled exclusion rules for cheap per-file matching.
#[derive(Debug, Default)]
pub struct ExcludeFilters {
    filenames: HashSet<String>,
    extensions: HashSet<String>,
    patterns: Vec<Pattern>,
    regexes: Vec<Regex>,
}

impl ExcludeFilters {
    /// Filters that exclude nothing.
    pub fn none() -> Self {
        Self::default()
    }

    fn compile(rules: &ExcludeRules) -> Result<Self, ConfigError> {
        let patterns = rules
            .patterns
            .iter()
            .map(|p| Pattern::new(p).map_err(|_| ConfigError::BadGlobPattern(p.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        let regexes = rules
            .regex
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| ConfigError::BadRegexPattern {
                    pattern: p.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            filenames: rules.filenames.iter().cloned().collect(),
            extensions: rules
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            patterns,
            regexes,
        })
    }

    /// Returns true if the named file must be excluded from a pass.
    ///
    /// Hidden files are not handled here; the engine always excludes them
    /// regardless of configuration.
    pub fn excludes(&self, filename: &str) -> bool {
        if self.filenames.contains(filename) {
            return true;
        }

        if let Some(pos) = filename.rfind('.')
            && pos > 0
        {
            let ext = filename[pos + 1..].to_lowercase();
            if self.extensions.contains(&ext) {
                return true;
            }
        }

        if self.patterns.iter().any(|p| p.matches(filename)) {
            return true;
        }

        self.regexes.iter().any(|r| r.is_match(filename))
    }
}
