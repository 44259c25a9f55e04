//! Git boundary: status and remote-identity lookups.
//!
//! Everything the engine needs from version control comes through two
//! external invocations, `git status --porcelain` and
//! `git config --get remote.origin.url`. [`GitRepo`] owns the invocations;
//! the parsing of their output lives in pure functions
//! ([`parse_remote_url`] here, porcelain parsing in [`crate::changes`]) so
//! it can be tested against captured output without a real repository.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("cannot query git in {root}: {detail}")]
    RepositoryUnavailable { root: PathBuf, detail: String },
    #[error("unexpected remote repository url: {0}")]
    MalformedRemoteUrl(String),
}

/// Hosting identity of the repository, from the `origin` remote URL.
///
/// Resolved once per run and passed down explicitly; URL derivation must
/// stay a pure function of this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryIdentity {
    pub owner: String,
    pub name: String,
}

/// Handle on the git repository at the source root.
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Raw `git status --porcelain` output.
    pub fn status_porcelain(&self) -> Result<String, GitError> {
        self.run(&["status", "--porcelain"])
    }

    /// Raw `origin` remote URL.
    pub fn remote_url(&self) -> Result<String, GitError> {
        self.run(&["config", "--get", "remote.origin.url"])
    }

    /// Owner and repository name parsed from the `origin` remote.
    pub fn identity(&self) -> Result<RepositoryIdentity, GitError> {
        parse_remote_url(&self.remote_url()?)
    }

    fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| GitError::RepositoryUnavailable {
                root: self.root.clone(),
                detail: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::RepositoryUnavailable {
                root: self.root.clone(),
                detail: format!("`git {}` failed: {}", args.join(" "), stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Quick repository check, used before prompting the user.
pub fn is_git_repository(root: &Path) -> bool {
    root.join(".git").exists()
}

/// Parse a remote URL into owner and repository name.
///
/// Two shapes are accepted, with an optional `.git` suffix:
///
/// - `https://host/OWNER/NAME`
/// - `user@host:OWNER/NAME`
///
/// Anything else is a configuration error; there is no URL to publish
/// under without a hosting identity.
pub fn parse_remote_url(url: &str) -> Result<RepositoryIdentity, GitError> {
    let malformed = || GitError::MalformedRemoteUrl(url.trim().to_string());

    let trimmed = url.trim().trim_end_matches('/');
    let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    if let Some(rest) = trimmed.strip_prefix("https://") {
        // host/OWNER/NAME, possibly with extra leading path segments
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < 3 {
            return Err(malformed());
        }
        return Ok(RepositoryIdentity {
            owner: segments[segments.len() - 2].to_string(),
            name: segments[segments.len() - 1].to_string(),
        });
    }

    if let Some((user_host, path)) = trimmed.split_once(':') {
        if user_host.contains('@') {
            let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
            if let [owner, name] = segments[..] {
                return Ok(RepositoryIdentity {
                    owner: owner.to_string(),
                    name: name.to_string(),
                });
            }
        }
    }

    Err(malformed())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(owner: &str, name: &str) -> RepositoryIdentity {
        RepositoryIdentity {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn https_url_with_git_suffix() {
        let id = parse_remote_url("https://github.com/sheeputech/docdex.git").unwrap();
        assert_eq!(id, identity("sheeputech", "docdex"));
    }

    #[test]
    fn https_url_without_suffix() {
        let id = parse_remote_url("https://github.com/sheeputech/docdex").unwrap();
        assert_eq!(id, identity("sheeputech", "docdex"));
    }

    #[test]
    fn ssh_url() {
        let id = parse_remote_url("git@github.com:sheeputech/docdex.git").unwrap();
        assert_eq!(id, identity("sheeputech", "docdex"));
    }

    #[test]
    fn trailing_newline_from_command_output() {
        let id = parse_remote_url("git@github.com:sheeputech/docdex.git\n").unwrap();
        assert_eq!(id, identity("sheeputech", "docdex"));
    }

    #[test]
    fn https_url_missing_name_is_malformed() {
        assert!(matches!(
            parse_remote_url("https://github.com/sheeputech"),
            Err(GitError::MalformedRemoteUrl(_))
        ));
    }

    #[test]
    fn ssh_url_with_extra_segments_is_malformed() {
        assert!(matches!(
            parse_remote_url("git@github.com:a/b/c"),
            Err(GitError::MalformedRemoteUrl(_))
        ));
    }

    #[test]
    fn other_schemes_are_malformed() {
        for url in ["file:///srv/repo.git", "/srv/repo", "ftp://host/a/b"] {
            assert!(
                matches!(parse_remote_url(url), Err(GitError::MalformedRemoteUrl(_))),
                "accepted {url}"
            );
        }
    }

    #[test]
    fn missing_git_dir_detected() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(!is_git_repository(tmp.path()));
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        assert!(is_git_repository(tmp.path()));
    }
}
