//! Change detection: the set of files to mirror this run.
//!
//! Two sources produce the same [`ChangeEntry`] records:
//!
//! - **Full scan** walks the whole source tree and reports every in-scope
//!   file as added. Used by `make --full` after the publication tree has
//!   been purged.
//! - **Status parse** reads `git status --porcelain` output, so an
//!   incremental run only touches what actually changed.
//!
//! Both run every candidate through the [`PathClassifier`], which drops
//! paths under the publication root and non-target extensions.

use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::classify::PathClassifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
}

/// One changed file, with paths relative to the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    pub kind: ChangeKind,
    /// The path to mirror. For renames this is the new path.
    pub path: PathBuf,
    /// Old path, set only when `kind` is [`ChangeKind::Renamed`].
    pub renamed_from: Option<PathBuf>,
}

/// Enumerate every in-scope file under the source root as an added entry.
///
/// The result is sorted by path so repeated runs over an unchanged tree
/// produce identical mirror reports.
pub fn full_scan(
    source_root: &Path,
    classifier: &PathClassifier,
) -> io::Result<Vec<ChangeEntry>> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(source_root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry.path().strip_prefix(source_root).unwrap();
        if classifier.in_scope(rel) {
            entries.push(ChangeEntry {
                kind: ChangeKind::Added,
                path: rel.to_path_buf(),
                renamed_from: None,
            });
        }
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

/// Parse `git status --porcelain` output into change entries.
///
/// Each line carries two status characters (index, worktree) and a path;
/// renames separate old and new path with `" -> "`. Only the index status
/// letters `A`, `M`, `D` and `R` are mapped; anything else (untracked `?`,
/// worktree-only changes, copies) is skipped rather than treated as an
/// error, since the status vocabulary varies with git configuration.
pub fn parse_status(output: &str, classifier: &PathClassifier) -> Vec<ChangeEntry> {
    output
        .lines()
        .filter_map(|line| parse_status_line(line, classifier))
        .collect()
}

fn parse_status_line(line: &str, classifier: &PathClassifier) -> Option<ChangeEntry> {
    let mut chars = line.chars();
    let index_status = chars.next()?;
    let worktree_status = chars.next()?;
    if index_status == ' ' && worktree_status == ' ' {
        return None;
    }

    let kind = match index_status {
        'A' => ChangeKind::Added,
        'M' => ChangeKind::Modified,
        'D' => ChangeKind::Deleted,
        'R' => ChangeKind::Renamed,
        _ => return None,
    };

    let rest = line.get(3..)?.trim();
    if rest.is_empty() {
        return None;
    }

    let (path, renamed_from) = if kind == ChangeKind::Renamed {
        let (old, new) = rest.split_once(" -> ")?;
        (PathBuf::from(new), Some(PathBuf::from(old)))
    } else {
        (PathBuf::from(rest), None)
    };

    // For renames the new path is the one that gets written, so scoping
    // applies to it.
    if !classifier.in_scope(&path) {
        return None;
    }

    Some(ChangeEntry {
        kind,
        path,
        renamed_from,
    })
}
