//! CLI output styling.
//!
//! All user-facing formatting lives here so the rest of the crate never
//! touches a terminal directly: colored status lines, the progress bar driven
//! by the engine's progress callback, and the end-of-pass summary rendered
//! from a [`Report`].

use crate::organizer::Report;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

pub fn warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

pub fn info(message: &str) {
    println!("{}", message.cyan());
}

/// A progress bar sized for a pass of `total` files.
pub fn progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("█▓░"),
    );
    pb
}

/// Prints the end-of-pass summary. `verb` is "Organized" or "Restored".
pub fn report_summary(verb: &str, report: &Report) {
    if report.total() == 0 {
        info("Nothing to do.");
        return;
    }

    if report.moved > 0 {
        success(&format!(
            "{} {} {}",
            verb,
            report.moved.to_string().green(),
            plural(report.moved)
        ));
    }
    if report.skipped > 0 {
        info(&format!(
            "Skipped {} already sorted {}",
            report.skipped,
            plural(report.skipped)
        ));
    }
    if report.failed > 0 {
        error(&format!(
            "Failed on {} {} (see the log for details)",
            report.failed.to_string().red(),
            plural(report.failed)
        ));
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "file" } else { "files" }
}
