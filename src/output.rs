//! Console output formatting.
//!
//! Each mirror action gets one line with a colored prefix, index synthesis
//! lists the pages it wrote, and the run ends with a one-line summary.
//! Format functions are pure and return strings; thin `print_*` wrappers
//! write them to stdout (warnings and fatal errors go to stderr).

use owo_colors::OwoColorize;
use std::path::PathBuf;

use crate::changes::{ChangeEntry, ChangeKind};
use crate::mirror::{ActionKind, MirrorAction, MirrorFailure, MirrorReport};

/// One line per pending change, for the `check` dry run.
pub fn format_change_entry(entry: &ChangeEntry) -> String {
    let path = entry.path.display();
    match entry.kind {
        ChangeKind::Added => format!("{}: {path}", "add".magenta()),
        ChangeKind::Modified => format!("{}: {path}", "modify".green()),
        ChangeKind::Deleted => format!("{}: {path} (will be skipped)", "delete".dimmed()),
        ChangeKind::Renamed => match &entry.renamed_from {
            Some(old) => format!("{}: {} -> {path}", "rename".blue(), old.display()),
            None => format!("{}: {path}", "rename".blue()),
        },
    }
}

/// One line per mirror action, prefixed with the operation.
///
/// Renames show both publication paths since the old one stays behind.
pub fn format_action(action: &MirrorAction) -> String {
    let dest = action.dest.display();
    match action.kind {
        ActionKind::Create => format!("{}: {dest}", "CREATE".magenta()),
        ActionKind::Modify => format!("{}: {dest}", "MODIFY".green()),
        ActionKind::Rename => match &action.renamed_from_dest {
            Some(old) => format!("{}: {}\n     -> {dest}", "RENAME".blue(), old.display()),
            None => format!("{}: {dest}", "RENAME".blue()),
        },
        ActionKind::Delete => format!("{}: {dest} (left in place)", "DELETE".dimmed()),
    }
}

pub fn format_failure(failure: &MirrorFailure) -> String {
    format!(
        "{}: failed to mirror {}: {}",
        "WARN".yellow(),
        failure.dest.display(),
        failure.error
    )
}

/// All action and failure lines of a mirror pass, actions first.
pub fn format_mirror_report(report: &MirrorReport) -> Vec<String> {
    let mut lines: Vec<String> = report.actions.iter().map(format_action).collect();
    lines.extend(report.failures.iter().map(format_failure));
    lines
}

pub fn format_index_lines(written: &[PathBuf]) -> Vec<String> {
    written
        .iter()
        .map(|p| format!("{}", p.display().green()))
        .collect()
}

pub fn format_summary(files_written: usize, indices_written: usize) -> String {
    format!("Mirrored {files_written} files, wrote {indices_written} index pages")
}

pub fn print_mirror_report(report: &MirrorReport) {
    for line in format_mirror_report(report) {
        println!("{line}");
    }
}

pub fn print_index_lines(written: &[PathBuf]) {
    for line in format_index_lines(written) {
        println!("{line}");
    }
}

pub fn print_summary(files_written: usize, indices_written: usize) {
    println!("{}", format_summary(files_written, indices_written));
}

pub fn print_warn(message: &str) {
    eprintln!("{}: {message}", "Warn".yellow());
}

pub fn print_error(message: &str) {
    eprintln!("{}: {message}", "Error".red());
}
