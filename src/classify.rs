//! Path scoping: which source files are mirrored.
//!
//! A path is in scope when it matches the selection pattern and is neither
//! part of the tool's own surface (config, template, any README) nor already
//! inside the publication tree. Without the latter check an incremental run
//! would re-mirror its own previous output into `docs/docs/...`.
//!
//! The selection pattern is compiled by [`crate::config`] and injected here
//! as an opaque predicate.

use regex::Regex;
use std::path::{Path, PathBuf};

use crate::config::CONFIG_FILE_NAME;
use crate::template::TEMPLATE_FILE_NAME;

/// Decides whether a source path participates in mirroring.
///
/// Works on paths relative to the source root; pure, no filesystem access.
#[derive(Debug, Clone)]
pub struct PathClassifier {
    pattern: Regex,
    output_root: PathBuf,
}

impl PathClassifier {
    pub fn new(pattern: Regex, output_root: impl Into<PathBuf>) -> Self {
        Self {
            pattern,
            output_root: output_root.into(),
        }
    }

    /// True when `rel` (relative to the source root) should be mirrored.
    pub fn in_scope(&self, rel: &Path) -> bool {
        if rel.starts_with(&self.output_root) {
            return false;
        }
        if let Some(name) = rel.file_name().map(|n| n.to_string_lossy()) {
            if name == CONFIG_FILE_NAME || name == TEMPLATE_FILE_NAME {
                return false;
            }
        }
        // Any README, regardless of extension or directory
        if rel
            .file_stem()
            .map(|s| s.to_string_lossy() == "README")
            .unwrap_or(false)
        {
            return false;
        }
        self.pattern.is_match(&rel.to_string_lossy())
    }
}
