//! Index page synthesis.
//!
//! After mirroring, every directory under the publication root gets one
//! `index.md`: a breadcrumb back to the site root, a bulleted list of the
//! directory's children, and a repository attribution footer.
//!
//! The walk is depth-first with an explicit inner-path parameter. Each call
//! returns the list of index paths it wrote and the parent merges them, so
//! there is no shared accumulator threaded through the recursion. Children
//! are visited before the parent's own index is written; linking only needs
//! each child's URL, which is derived from its name and position alone.
//!
//! `index.md` files are metadata about their directory, not content of it.
//! They are excluded from link tables, so re-running over an existing
//! publication tree does not list the previous run's index pages.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::template::{self, TemplateError};
use crate::url::UrlResolver;

/// Name of the generated per-directory index document.
pub const INDEX_FILE_NAME: &str = "index.md";

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Template(#[from] TemplateError),
}

/// Write an index page into every directory under the publication root.
///
/// Returns the written index paths in pre-order (each directory before its
/// subdirectories). A template error aborts the whole pass; the failing
/// directory's index is not written.
pub fn synthesize(
    output_root: &Path,
    resolver: &UrlResolver,
    template: &str,
) -> Result<Vec<PathBuf>, IndexError> {
    synthesize_dir(output_root, &[], resolver, template)
}

fn synthesize_dir(
    dir: &Path,
    inner: &[String],
    resolver: &UrlResolver,
    template: &str,
) -> Result<Vec<PathBuf>, IndexError> {
    let index_path = dir.join(INDEX_FILE_NAME);
    let mut written = vec![index_path.clone()];

    let mut children: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .map(|n| n != INDEX_FILE_NAME)
                .unwrap_or(false)
        })
        .collect();
    children.sort();

    // Directory-listing order: lexicographic by name, files and
    // subdirectories interleaved.
    let mut links: BTreeMap<String, String> = BTreeMap::new();

    for child in &children {
        let name = child.file_name().unwrap().to_string_lossy().to_string();
        if child.is_dir() {
            links.insert(name.clone(), resolver.dir_url(&name, inner));

            let mut child_inner = inner.to_vec();
            child_inner.push(name);
            written.extend(synthesize_dir(child, &child_inner, resolver, template)?);
        } else {
            links.insert(name.clone(), resolver.file_url(&name, inner));
        }
    }

    let fields = BTreeMap::from([
        ("breadcrumb", breadcrumb(resolver, inner)),
        ("indices", link_list(&links)),
        ("repo", repository_link(resolver)),
    ]);
    let content = template::render(template, &fields)?;
    fs::write(&index_path, content)?;

    Ok(written)
}

/// `root / a / b`, each crumb linked to its cumulative URL.
fn breadcrumb(resolver: &UrlResolver, inner: &[String]) -> String {
    let mut crumbs = vec![format!("[root]({})", resolver.breadcrumb_target(&[]))];
    for (i, segment) in inner.iter().enumerate() {
        crumbs.push(format!(
            "[{segment}]({})",
            resolver.breadcrumb_target(&inner[..=i])
        ));
    }
    crumbs.join(" / ")
}

fn link_list(links: &BTreeMap<String, String>) -> String {
    links
        .iter()
        .map(|(name, url)| format!("- [{name}]({url})"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn repository_link(resolver: &UrlResolver) -> String {
    let id = resolver.identity();
    format!("[{}/{}]({})", id.owner, id.name, resolver.repository_url())
}
