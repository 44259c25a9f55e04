//! # docdex
//!
//! Mirror documentation assets from a git-managed project into a
//! publication tree (`docs/` by default) and generate a navigable
//! `index.md` for every directory in it, ready for GitHub Pages hosting.
//! No themes, no asset pipeline, no Markdown rendering: the mirrored files
//! are served as-is and the index pages are plain Markdown.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Mirror   change set  →  docs/              (copies, structure preserved)
//! 2. Index    docs/       →  docs/**/index.md   (breadcrumbs + link lists)
//! ```
//!
//! The change set comes from one of two sources: a full scan of the source
//! tree (`make --full`, after purging the publication root) or the parsed
//! output of `git status --porcelain` (the default incremental mode, which
//! only touches what changed since the last commit staging).
//!
//! Stages run strictly in order in a single thread. Index synthesis walks
//! the publication tree only after mirroring has settled it, because link
//! tables are read straight from the mirrored directories.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | optional `docdex.toml`, the `search_regex` selection pattern |
//! | [`classify`] | decides which source paths are in scope for mirroring |
//! | [`git`] | `git status` / remote-URL invocations, repository identity |
//! | [`changes`] | change set construction: full scan or porcelain parsing |
//! | [`mirror`] | copies the change set into the publication tree |
//! | [`url`] | GitHub Pages URL derivation for files and directories |
//! | [`index`] | recursive per-directory index page synthesis |
//! | [`template`] | `$name` substitution with fatal undefined-field handling |
//! | [`output`] | colored console lines for actions, warnings and summaries |
//!
//! # Design Decisions
//!
//! ## Additive Mirroring
//!
//! Incremental runs never delete anything from the publication tree. A
//! renamed file is copied under its new path and the old copy stays; a
//! deleted file is reported and skipped. Deciding whether an old path is
//! still referenced would require tracking the whole publication tree, so
//! pruning is delegated to `make --full`, which rebuilds it from scratch.
//!
//! ## Identity As a Value
//!
//! The repository owner and name are resolved once per run from the
//! `origin` remote and passed into URL derivation and index synthesis as a
//! plain value. Nothing reads ambient global state, which keeps every URL
//! rule testable with a fixed identity.
//!
//! ## Fatal Template Errors
//!
//! A template field that cannot be resolved aborts the whole run. An
//! override template with a bad placeholder is broken for every directory,
//! so rendering the remaining pages would only bury the error.

pub mod changes;
pub mod classify;
pub mod config;
pub mod git;
pub mod index;
pub mod mirror;
pub mod output;
pub mod template;
pub mod url;
