//! End-to-end library tests: a real vault on disk exported through `export`.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vaultpub::export::SkipReason;
use vaultpub::{export, BrokenLinkPolicy, ExportJob, ExportOptions, NoteStatus, ResetOutcome, Vault};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn yes(_: &Path) -> bool {
    true
}

fn run(vault_root: &Path, dest: &str, tag: &str, options: ExportOptions) -> vaultpub::ExportSummary {
    let job = ExportJob::new(vault_root, dest, tag);
    let vault = Vault::open_excluding(vault_root, Some(&job.dest_root)).unwrap();
    export(&vault, &job, &options, Some(yes)).unwrap()
}

#[test]
fn test_resolution_prefers_own_folder_and_aliases() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "projects/Index.md",
        "---\npublish: true\n---\n[[Notes]] [[Notes#Intro]] [[Old Name|renamed]] [[#Top]]",
    );
    write(dir.path(), "projects/Notes.md", "own folder");
    write(dir.path(), "archive/Notes.md", "elsewhere");
    write(dir.path(), "Renamed.md", "---\naliases: [Old Name]\n---\n");

    let summary = run(dir.path(), "out", "", ExportOptions::default());
    assert_eq!(summary.failed(), 0);

    assert_eq!(
        fs::read_to_string(dir.path().join("out/projects/Index.mdx")).unwrap(),
        "---\npublish: true\n---\n[Notes](/projects/Notes.md) [Notes](/projects/Notes.md) [Renamed](/Renamed.md) [Index](/projects/Index.md)"
    );
}

#[test]
fn test_embedded_note_and_nested_asset_are_copied() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "post.md",
        "---\npublish: true\ntags: blog, rust\n---\n![[Snippet]]\n![[deep/dir/photo 2024.jpg]]",
    );
    write(dir.path(), "Snippet.md", "a private snippet");
    write(dir.path(), "deep/dir/photo 2024.jpg", "jpg");

    let summary = run(dir.path(), "site", "rust", ExportOptions::default());

    let out = dir.path().join("site");
    assert_eq!(
        fs::read_to_string(out.join("post.mdx")).unwrap(),
        "---\npublish: true\ntags: blog, rust\n---\n![Snippet](/Snippet.md)\n![photo 2024](/deep/dir/photo%202024.jpg)"
    );
    assert_eq!(fs::read_to_string(out.join("Snippet.md")).unwrap(), "a private snippet");
    assert!(out.join("deep/dir/photo 2024.jpg").exists());

    let mut assets: Vec<PathBuf> = summary.assets.iter().map(|a| a.path.clone()).collect();
    assets.sort();
    assert_eq!(
        assets,
        vec![PathBuf::from("Snippet.md"), PathBuf::from("deep/dir/photo 2024.jpg")]
    );
}

#[test]
fn test_previous_export_inside_vault_is_not_reexported() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.md", "---\npublish: true\n---\nA");

    // With a plain `md` extension the output would otherwise be indexed as notes.
    let options = ExportOptions {
        extension: "md".to_string(),
        ..Default::default()
    };
    run(dir.path(), "out", "", options.clone());
    assert!(dir.path().join("out/a.md").exists());

    let summary = run(dir.path(), "out", "", options);
    assert_eq!(summary.notes.len(), 1);
    assert_eq!(
        summary.reset,
        Some(ResetOutcome::Cleared {
            removed: 1,
            preserved: 0
        })
    );
    assert!(dir.path().join("out/a.md").exists());
}

#[test]
fn test_warn_policy_matches_drop_output() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.md", "---\npublish: 1\n---\nx [[Gone]] y");

    let summary = run(
        dir.path(),
        "out",
        "",
        ExportOptions {
            broken_links: BrokenLinkPolicy::Warn,
            threads: Some(1),
            ..Default::default()
        },
    );

    assert_eq!(
        fs::read_to_string(dir.path().join("out/a.mdx")).unwrap(),
        "---\npublish: 1\n---\nx  y"
    );
    assert_eq!(
        summary.note(Path::new("a.md")).unwrap().status,
        NoteStatus::Rewritten {
            resolved: 0,
            broken: vec!["Gone".to_string()]
        }
    );
}

#[test]
fn test_selection_edge_cases() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "zero.md", "---\npublish: 0\n---\n");
    write(dir.path(), "empty.md", "---\npublish: \"\"\n---\n");
    write(dir.path(), "null.md", "---\npublish:\n---\n");
    write(dir.path(), "string.md", "---\npublish: \"false\"\n---\n");
    write(dir.path(), "broken.md", "---\npublish: [oops\n---\n");

    let summary = run(dir.path(), "out", "", ExportOptions::default());

    for name in ["zero.md", "empty.md", "null.md", "broken.md"] {
        assert_eq!(
            summary.note(Path::new(name)).unwrap().status,
            NoteStatus::Skipped {
                reason: SkipReason::NotPublished
            },
            "{name}"
        );
    }
    // Any non-empty string is truthy.
    assert_eq!(
        summary.note(Path::new("string.md")).unwrap().status,
        NoteStatus::Copied
    );
}
