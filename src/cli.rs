//! Command-line front end.
//!
//! The CLI owns directory selection, flags and progress display; the engine
//! owns no UI state. Exit status is non-zero for structural errors
//! (`DirectoryNotFound`, `AccessDenied`, `CorruptHistory`, bad configuration);
//! a pass with per-file failures still exits zero, with the failures visible
//! in the summary.

use crate::config::Config;
use crate::error::EngineError;
use crate::logging::LogSink;
use crate::organizer::Sorter;
use crate::output;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sort files into category subfolders under Sorted/, reversibly.
#[derive(Debug, Parser)]
#[command(name = "sortify", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML configuration file.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the history file location.
    #[arg(long, global = true, value_name = "FILE")]
    pub history: Option<PathBuf>,

    /// Override the operation log location.
    #[arg(long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Suppress the progress bar.
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sort the files in a directory into Sorted/<Category>/ subfolders.
    Organize {
        /// The directory to organize.
        directory: PathBuf,

        /// Delete existing category folders under Sorted/ before the pass
        /// instead of preserving previously sorted files.
        #[arg(long)]
        clean: bool,
    },
    /// Move every file recorded in the history back to where it came from.
    Undo,
    /// Print the category table.
    Categories,
}

/// Runs the parsed command. Returns an error message suitable for stderr.
pub fn run(cli: Cli) -> Result<(), String> {
    let config = Config::load(cli.config.as_deref()).map_err(|e| e.to_string())?;
    let filters = config.compile_excludes().map_err(|e| e.to_string())?;

    let history_path = cli
        .history
        .or(config.paths.history_file)
        .unwrap_or_else(Sorter::default_history_path);
    let log_path = cli
        .log
        .or(config.paths.log_file)
        .unwrap_or_else(|| PathBuf::from("sortify.log"));

    let sorter = Sorter::new(history_path, LogSink::to_file(log_path)).with_filters(filters);

    match cli.command {
        Command::Organize { directory, clean } => {
            output::info(&format!("Organizing: {}", directory.display()));

            let report = if cli.quiet {
                sorter.organize(&directory, !clean)
            } else {
                let bar = output::progress_bar(0);
                let result = sorter.organize_with_progress(&directory, !clean, |processed, total| {
                    bar.set_length(total as u64);
                    bar.set_position(processed as u64);
                });
                bar.finish_and_clear();
                result
            }
            .map_err(|e| e.to_string())?;

            output::report_summary("Organized", &report);
            Ok(())
        }
        Command::Undo => {
            let result = if cli.quiet {
                sorter.undo()
            } else {
                let bar = output::progress_bar(0);
                let result = sorter.undo_with_progress(|processed, total| {
                    bar.set_length(total as u64);
                    bar.set_position(processed as u64);
                });
                bar.finish_and_clear();
                result
            };

            match result {
                Ok(report) => {
                    output::report_summary("Restored", &report);
                    Ok(())
                }
                // Nothing recorded is a no-op, not a failure.
                Err(EngineError::NoHistory) => {
                    output::warning("No previous organization to undo.");
                    Ok(())
                }
                Err(e) => Err(e.to_string()),
            }
        }
        Command::Categories => {
            for category in sorter.registry().categories() {
                println!("{}: {}", category.name, category.extensions.join(" "));
            }
            println!("{}: everything else", crate::categories::OTHERS);
            Ok(())
        }
    }
}
