//! Public URL derivation for mirrored files and directories.
//!
//! Every link points at the GitHub Pages site for the repository,
//! `https://{owner}.github.io/{name}`. File links drop their extension so
//! browsers render the served page instead of showing raw Markdown source.
//! Two exceptions:
//!
//! - image files keep their full name, so the browser fetches the binary
//! - extensionless files get `/index` appended, which keeps them from
//!   colliding with a directory of the same name
//!
//! All derivations are pure functions of the repository identity and the
//! file's position in the tree.

use crate::git::RepositoryIdentity;

/// Extensions served as binaries; their links keep the full filename.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png"];

/// Derives absolute URLs from the repository identity.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    identity: RepositoryIdentity,
}

impl UrlResolver {
    pub fn new(identity: RepositoryIdentity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &RepositoryIdentity {
        &self.identity
    }

    /// Site root: `https://{owner}.github.io/{name}`.
    pub fn base(&self) -> String {
        format!(
            "https://{}.github.io/{}",
            self.identity.owner, self.identity.name
        )
    }

    /// Source repository on GitHub, for the attribution footer.
    pub fn repository_url(&self) -> String {
        format!(
            "https://github.com/{}/{}",
            self.identity.owner, self.identity.name
        )
    }

    /// URL for a file in the directory at `inner` path segments below the
    /// publication root.
    pub fn file_url(&self, file_name: &str, inner: &[String]) -> String {
        let visible = match file_name.rsplit_once('.') {
            None => format!("{file_name}/index"),
            Some((_, ext)) if IMAGE_EXTENSIONS.contains(&ext) => file_name.to_string(),
            Some((stem, _)) => stem.to_string(),
        };
        self.join(inner, &visible)
    }

    /// URL for a subdirectory; the hosting platform serves its index page.
    pub fn dir_url(&self, dir_name: &str, inner: &[String]) -> String {
        self.join(inner, dir_name)
    }

    /// Cumulative URL for a breadcrumb prefix. The empty prefix is the
    /// site root (with trailing slash).
    pub fn breadcrumb_target(&self, prefix: &[String]) -> String {
        format!("{}/{}", self.base(), prefix.join("/"))
    }

    fn join(&self, inner: &[String], leaf: &str) -> String {
        let mut url = self.base();
        for segment in inner {
            url.push('/');
            url.push_str(segment);
        }
        url.push('/');
        url.push_str(leaf);
        url
    }
}
