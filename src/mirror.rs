//! Tree mirroring: apply a change set to the publication tree.
//!
//! Copies are additive. A rename copies the file under its new publication
//! path and leaves the old one behind; a delete is recorded but never acted
//! on. Pruning stale entries is the job of a full resync, which rebuilds
//! the publication root from scratch. Incremental runs therefore never
//! remove anything a previous run published.
//!
//! A single failed copy does not stop the run: the failure is recorded and
//! the remaining entries still get mirrored. The caller decides the exit
//! status from [`MirrorReport::is_clean`].

use filetime::FileTime;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::changes::{ChangeEntry, ChangeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Create,
    Modify,
    Rename,
    /// Recorded for the report, never executed.
    Delete,
}

/// One mirroring operation, performed or skipped.
#[derive(Debug)]
pub struct MirrorAction {
    pub kind: ActionKind,
    /// Path under the source root.
    pub source: PathBuf,
    /// Path under the publication root.
    pub dest: PathBuf,
    /// For renames, the publication path of the old name. It is reported
    /// but left in place.
    pub renamed_from_dest: Option<PathBuf>,
}

#[derive(Debug)]
pub struct MirrorFailure {
    pub dest: PathBuf,
    pub error: io::Error,
}

/// Outcome of a mirror pass: what was done and what failed.
#[derive(Debug, Default)]
pub struct MirrorReport {
    pub actions: Vec<MirrorAction>,
    pub failures: Vec<MirrorFailure>,
}

impl MirrorReport {
    /// Number of files actually written into the publication tree.
    pub fn files_written(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| a.kind != ActionKind::Delete)
            .count()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Mirror a change set into the publication tree.
///
/// Entries are processed in order; writes only ever land under
/// `output_root`.
pub fn mirror(entries: &[ChangeEntry], source_root: &Path, output_root: &Path) -> MirrorReport {
    let mut report = MirrorReport::default();

    for entry in entries {
        let dest = output_root.join(&entry.path);

        let kind = match entry.kind {
            ChangeKind::Added => ActionKind::Create,
            ChangeKind::Modified => ActionKind::Modify,
            ChangeKind::Renamed => ActionKind::Rename,
            ChangeKind::Deleted => {
                report.actions.push(MirrorAction {
                    kind: ActionKind::Delete,
                    source: entry.path.clone(),
                    dest,
                    renamed_from_dest: None,
                });
                continue;
            }
        };

        let source = source_root.join(&entry.path);
        match copy_into_tree(&source, &dest) {
            Ok(()) => report.actions.push(MirrorAction {
                kind,
                source: entry.path.clone(),
                dest,
                renamed_from_dest: entry
                    .renamed_from
                    .as_ref()
                    .map(|old| output_root.join(old)),
            }),
            Err(error) => report.failures.push(MirrorFailure { dest, error }),
        }
    }

    report
}

/// Copy `source` to `dest`, creating parent directories as needed.
///
/// `fs::copy` carries permission bits; the modification time is restored
/// separately so the mirrored file keeps the source's timestamp.
fn copy_into_tree(source: &Path, dest: &Path) -> io::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest)?;

    let metadata = fs::metadata(source)?;
    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_mtime(dest, mtime)?;
    Ok(())
}
