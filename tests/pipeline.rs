//! End-to-end pipeline tests: change detection, mirroring and index
//! synthesis run back to back over a temporary source tree, with a fixed
//! repository identity so no git invocation is needed.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tempfile::TempDir;

use docdex::changes::{self, ChangeKind};
use docdex::classify::PathClassifier;
use docdex::git::RepositoryIdentity;
use docdex::index;
use docdex::mirror;
use docdex::template::DEFAULT_TEMPLATE;
use docdex::url::UrlResolver;

fn classifier() -> PathClassifier {
    PathClassifier::new(Regex::new(r"\.(md|jpg)$").unwrap(), "docs")
}

fn resolver() -> UrlResolver {
    UrlResolver::new(RepositoryIdentity {
        owner: "octocat".to_string(),
        name: "notes".to_string(),
    })
}

/// Source tree with a README (excluded), a guide and a nested image.
fn setup_source() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("README.md"), "# Project").unwrap();
    fs::create_dir_all(tmp.path().join("docs-source/img")).unwrap();
    fs::write(tmp.path().join("docs-source/guide.md"), "# Guide").unwrap();
    fs::write(tmp.path().join("docs-source/img/photo.jpg"), "jpegdata").unwrap();
    tmp
}

/// Full resync: scan, mirror into `docs/`, synthesize indexes.
fn full_run(source: &Path) -> Vec<PathBuf> {
    let entries = changes::full_scan(source, &classifier()).unwrap();
    let output_root = source.join("docs");
    let report = mirror::mirror(&entries, source, &output_root);
    assert!(report.is_clean());

    fs::create_dir_all(&output_root).unwrap();
    index::synthesize(&output_root, &resolver(), DEFAULT_TEMPLATE).unwrap()
}

fn tree_snapshot(root: &Path) -> BTreeMap<String, String> {
    let mut snapshot = BTreeMap::new();
    for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
        let entry = entry.unwrap();
        if entry.file_type().is_file() {
            let rel = entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .to_string();
            snapshot.insert(rel, fs::read_to_string(entry.path()).unwrap());
        }
    }
    snapshot
}

#[test]
fn full_run_mirrors_and_indexes_the_source_tree() {
    let tmp = setup_source();
    let written = full_run(tmp.path());
    let docs = tmp.path().join("docs");

    // Mirrored files, structure preserved; README excluded.
    assert_eq!(
        fs::read_to_string(docs.join("docs-source/guide.md")).unwrap(),
        "# Guide"
    );
    assert!(docs.join("docs-source/img/photo.jpg").is_file());
    assert!(!docs.join("README.md").exists());

    // One index per publication directory, pre-order.
    assert_eq!(
        written,
        vec![
            docs.join("index.md"),
            docs.join("docs-source/index.md"),
            docs.join("docs-source/img/index.md"),
        ]
    );

    // Directory page: extension stripped for markdown, subdirectory linked.
    let dir_index = fs::read_to_string(docs.join("docs-source/index.md")).unwrap();
    assert!(dir_index
        .contains("- [guide.md](https://octocat.github.io/notes/docs-source/guide)"));
    assert!(dir_index.contains("- [img](https://octocat.github.io/notes/docs-source/img)"));
    assert!(!dir_index.contains("[index.md]"));

    // Image page: full filename kept, breadcrumb walks back to root.
    let img_index = fs::read_to_string(docs.join("docs-source/img/index.md")).unwrap();
    assert!(img_index
        .contains("- [photo.jpg](https://octocat.github.io/notes/docs-source/img/photo.jpg)"));
    assert!(img_index.contains(
        "[root](https://octocat.github.io/notes/) \
         / [docs-source](https://octocat.github.io/notes/docs-source) \
         / [img](https://octocat.github.io/notes/docs-source/img)"
    ));
}

#[test]
fn every_in_scope_file_has_a_mirrored_counterpart() {
    let tmp = setup_source();
    full_run(tmp.path());

    let entries = changes::full_scan(tmp.path(), &classifier()).unwrap();
    assert!(!entries.is_empty());
    for entry in entries {
        assert!(
            tmp.path().join("docs").join(&entry.path).is_file(),
            "missing mirror of {}",
            entry.path.display()
        );
    }
}

#[test]
fn full_run_is_idempotent() {
    let tmp = setup_source();

    full_run(tmp.path());
    let first = tree_snapshot(&tmp.path().join("docs"));

    full_run(tmp.path());
    let second = tree_snapshot(&tmp.path().join("docs"));

    assert_eq!(first, second);
}

#[test]
fn incremental_rename_keeps_the_old_publication_path() {
    let tmp = setup_source();
    full_run(tmp.path());
    let docs = tmp.path().join("docs");
    assert!(docs.join("docs-source/guide.md").is_file());

    // The guide moves in the source tree.
    fs::create_dir_all(tmp.path().join("manual")).unwrap();
    fs::rename(
        tmp.path().join("docs-source/guide.md"),
        tmp.path().join("manual/guide.md"),
    )
    .unwrap();

    let porcelain = "R  docs-source/guide.md -> manual/guide.md\n";
    let entries = changes::parse_status(porcelain, &classifier());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, ChangeKind::Renamed);

    let report = mirror::mirror(&entries, tmp.path(), &docs);
    assert!(report.is_clean());

    assert!(docs.join("manual/guide.md").is_file());
    assert!(docs.join("docs-source/guide.md").is_file());

    // Re-indexing after the rename picks up the new directory too.
    let written = index::synthesize(&docs, &resolver(), DEFAULT_TEMPLATE).unwrap();
    assert!(written.contains(&docs.join("manual/index.md")));
}

#[test]
fn incremental_delete_leaves_the_mirror_untouched() {
    let tmp = setup_source();
    full_run(tmp.path());
    let docs = tmp.path().join("docs");

    fs::remove_file(tmp.path().join("docs-source/guide.md")).unwrap();
    let entries = changes::parse_status("D  docs-source/guide.md\n", &classifier());
    assert_eq!(entries.len(), 1);

    let report = mirror::mirror(&entries, tmp.path(), &docs);
    assert!(report.is_clean());
    assert_eq!(report.files_written(), 0);
    assert!(docs.join("docs-source/guide.md").is_file());
}

#[test]
fn index_completeness_across_the_publication_tree() {
    let tmp = setup_source();
    full_run(tmp.path());
    let docs = tmp.path().join("docs");

    for entry in walkdir::WalkDir::new(&docs) {
        let entry = entry.unwrap();
        if !entry.file_type().is_dir() {
            continue;
        }
        let dir = entry.path();
        let index = fs::read_to_string(dir.join("index.md")).unwrap();

        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .filter(|n| n != "index.md")
            .collect();
        names.sort();

        for name in &names {
            assert!(
                index.contains(&format!("- [{name}](")),
                "{} missing from {}/index.md",
                name,
                dir.display()
            );
        }
        assert_eq!(index.matches("- [").count(), names.len());
    }
}

#[test]
fn broken_template_aborts_before_any_index_is_written() {
    let tmp = setup_source();
    let entries = changes::full_scan(tmp.path(), &classifier()).unwrap();
    let docs = tmp.path().join("docs");
    mirror::mirror(&entries, tmp.path(), &docs);

    let result = index::synthesize(&docs, &resolver(), "$breadcrumb\n$typo");
    assert!(result.is_err());
    assert!(!docs.join("index.md").exists());
}

#[test]
fn change_entry_paths_survive_the_whole_pipeline() {
    // A modify after the initial sync overwrites the mirrored copy.
    let tmp = setup_source();
    full_run(tmp.path());

    fs::write(tmp.path().join("docs-source/guide.md"), "# Guide v2").unwrap();
    let entries = changes::parse_status("M  docs-source/guide.md\n", &classifier());
    let report = mirror::mirror(&entries, tmp.path(), &tmp.path().join("docs"));
    assert!(report.is_clean());

    assert_eq!(
        fs::read_to_string(tmp.path().join("docs/docs-source/guide.md")).unwrap(),
        "# Guide v2"
    );
}
