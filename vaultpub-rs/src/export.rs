//! The export pipeline.
//!
//! One run: reset the destination, plan one task per eligible note, run the
//! tasks on a bounded worker pool, then copy every embedded asset. Every
//! note and asset gets an outcome in the returned [`ExportSummary`]; a
//! failure in one never stops the others.

use crate::error::{PublishError, Result};
use crate::index::NoteIndex;
use crate::path_util::{is_child, normalize};
use crate::reset::{clear_dir_preserving_vcs, ResetOutcome};
use crate::rewrite::{rewrite_references, AssetCopy, BrokenLinkPolicy};
use crate::select::{is_publishable, tag_matches};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension given to every exported note.
pub const DEFAULT_EXTENSION: &str = "mdx";

/// Parameters of a single export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    /// Root of the vault being exported.
    pub source_root: PathBuf,
    /// Directory receiving the exported tree.
    pub dest_root: PathBuf,
    /// Required tag; empty exports every published note.
    pub tag_query: String,
}

impl ExportJob {
    /// Create a job; a relative `dest` is taken relative to `source_root`.
    pub fn new(
        source_root: impl Into<PathBuf>,
        dest: impl AsRef<Path>,
        tag_query: impl Into<String>,
    ) -> Self {
        let source_root = source_root.into();
        let dest = dest.as_ref();
        let dest_root = if dest.is_absolute() {
            dest.to_path_buf()
        } else {
            source_root.join(dest)
        };

        Self {
            source_root,
            dest_root: normalize(&dest_root),
            tag_query: tag_query.into().trim().to_string(),
        }
    }
}

/// Tunables for an export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// What to do with references that do not resolve.
    pub broken_links: BrokenLinkPolicy,
    /// Worker count; `None` uses one per available core.
    pub threads: Option<usize>,
    /// Extension for exported notes, without the dot.
    pub extension: String,
    /// Plan only: report what would be exported without touching disk.
    pub dry_run: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            broken_links: BrokenLinkPolicy::default(),
            threads: None,
            extension: DEFAULT_EXTENSION.to_string(),
            dry_run: false,
        }
    }
}

/// Why a note was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The note lives inside the destination directory.
    InsideDestination,
    /// No frontmatter, or `publish` is not truthy.
    NotPublished,
    /// A tag query was given and the note does not carry it.
    TagMismatch,
}

/// What happened to one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NoteStatus {
    /// Selected, but not written (dry run).
    Planned,
    /// Copied byte for byte.
    Copied,
    /// References rewritten, then written.
    Rewritten {
        resolved: usize,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        broken: Vec<String>,
    },
    /// Not selected.
    Skipped { reason: SkipReason },
    /// Selected, but reading or writing failed.
    Failed { error: String },
}

/// Outcome for one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteReport {
    /// Vault-relative source path.
    pub source: PathBuf,
    /// Destination-relative output path, for selected notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dest: Option<PathBuf>,
    #[serde(flatten)]
    pub status: NoteStatus,
}

/// Outcome for one embedded asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetReport {
    /// Vault-relative path (identical under the destination).
    pub path: PathBuf,
    /// Copy error, if the copy failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything an export run did.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub source_root: PathBuf,
    pub dest_root: PathBuf,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tag_query: String,
    pub dry_run: bool,
    /// Result of clearing the previous export; `None` on dry runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset: Option<ResetOutcome>,
    pub notes: Vec<NoteReport>,
    pub assets: Vec<AssetReport>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ExportSummary {
    /// Notes written to the destination, copied or rewritten.
    pub fn exported(&self) -> usize {
        self.notes
            .iter()
            .filter(|n| matches!(n.status, NoteStatus::Copied | NoteStatus::Rewritten { .. }))
            .count()
    }

    /// Notes left out by selection.
    pub fn skipped(&self) -> usize {
        self.notes
            .iter()
            .filter(|n| matches!(n.status, NoteStatus::Skipped { .. }))
            .count()
    }

    /// Notes and assets that failed.
    pub fn failed(&self) -> usize {
        let notes = self
            .notes
            .iter()
            .filter(|n| matches!(n.status, NoteStatus::Failed { .. }))
            .count();
        let assets = self.assets.iter().filter(|a| a.error.is_some()).count();
        notes + assets
    }

    /// Broken references across all rewritten notes.
    pub fn broken_links(&self) -> usize {
        self.notes
            .iter()
            .map(|n| match &n.status {
                NoteStatus::Rewritten { broken, .. } => broken.len(),
                _ => 0,
            })
            .sum()
    }

    /// Look up the report for a source note.
    pub fn note(&self, source: &Path) -> Option<&NoteReport> {
        self.notes.iter().find(|n| n.source == source)
    }
}

/// A selected note waiting to be written.
#[derive(Debug, Clone)]
struct NoteTask {
    source: PathBuf,
    dest: PathBuf,
}

/// Decide, for every note in the index, whether and where it is exported.
///
/// Touches nothing on disk beyond what the index itself reads.
pub fn plan<I>(index: &I, job: &ExportJob, options: &ExportOptions) -> Result<Vec<NoteReport>>
where
    I: NoteIndex + ?Sized,
{
    let mut reports = Vec::new();

    for path in index.list_notes()? {
        let source_file = index.base_path().join(&path);

        let skip = if is_child(&job.dest_root, &source_file) {
            Some(SkipReason::InsideDestination)
        } else {
            let metadata = index.metadata(&path);
            if !is_publishable(metadata) {
                Some(SkipReason::NotPublished)
            } else if !tag_matches(metadata.and_then(|m| m.frontmatter.as_ref()), &job.tag_query) {
                Some(SkipReason::TagMismatch)
            } else {
                None
            }
        };

        let report = match skip {
            Some(reason) => NoteReport {
                source: path,
                dest: None,
                status: NoteStatus::Skipped { reason },
            },
            None => NoteReport {
                dest: Some(path.with_extension(&options.extension)),
                source: path,
                status: NoteStatus::Planned,
            },
        };
        reports.push(report);
    }

    Ok(reports)
}

/// Run an export.
///
/// `confirm` gates clearing an existing destination; declining cancels the
/// run before anything is written. Returns once every note and asset has
/// been written or has failed.
pub fn export<I, F>(
    index: &I,
    job: &ExportJob,
    options: &ExportOptions,
    confirm: Option<F>,
) -> Result<ExportSummary>
where
    I: NoteIndex + ?Sized,
    F: FnOnce(&Path) -> bool,
{
    let started_at = Utc::now();
    check_destination(job)?;

    let mut notes = plan(index, job, options)?;
    let selected = notes
        .iter()
        .filter(|n| n.status == NoteStatus::Planned)
        .count();
    info!(
        "{} of {} notes selected for export to {}",
        selected,
        notes.len(),
        job.dest_root.display()
    );

    if options.dry_run {
        return Ok(ExportSummary {
            source_root: job.source_root.clone(),
            dest_root: job.dest_root.clone(),
            tag_query: job.tag_query.clone(),
            dry_run: true,
            reset: None,
            notes,
            assets: Vec::new(),
            started_at,
            finished_at: Utc::now(),
        });
    }

    let reset = clear_dir_preserving_vcs(&job.dest_root, confirm)?;
    if reset == ResetOutcome::Declined {
        return Err(PublishError::ExportCancelled(job.dest_root.clone()));
    }
    fs::create_dir_all(&job.dest_root)
        .map_err(|e| PublishError::fs("create", &job.dest_root, e))?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads.unwrap_or(0))
        .build()
        .map_err(|e| PublishError::WorkerPool(e.to_string()))?;

    let copies: BTreeSet<AssetCopy> = pool.install(|| {
        notes
            .par_iter_mut()
            .filter(|n| n.status == NoteStatus::Planned)
            .flat_map_iter(|report| {
                let task = NoteTask {
                    source: report.source.clone(),
                    dest: report.dest.clone().unwrap_or_default(),
                };
                let (status, copies) = run_note(index, job, options, &task);
                report.status = status;
                copies
            })
            .collect()
    });

    // An embedded note exported under its own name already occupies the path
    let occupied: BTreeSet<&Path> = notes.iter().filter_map(|n| n.dest.as_deref()).collect();
    let copies: Vec<AssetCopy> = copies
        .into_iter()
        .filter(|copy| {
            let taken = occupied.contains(copy.path.as_path());
            if taken {
                debug!("not copying {}: exported note in place", copy.path.display());
            }
            !taken
        })
        .collect();

    let assets: Vec<AssetReport> = pool.install(|| {
        copies
            .par_iter()
            .map(|copy| copy_asset(job, copy))
            .collect()
    });

    let summary = ExportSummary {
        source_root: job.source_root.clone(),
        dest_root: job.dest_root.clone(),
        tag_query: job.tag_query.clone(),
        dry_run: false,
        reset: Some(reset),
        notes,
        assets,
        started_at,
        finished_at: Utc::now(),
    };

    info!(
        "exported {} notes and {} assets ({} failed, {} broken links)",
        summary.exported(),
        summary.assets.len(),
        summary.failed(),
        summary.broken_links()
    );

    Ok(summary)
}

/// Refuse destinations that would clear or swallow the vault itself.
fn check_destination(job: &ExportJob) -> Result<()> {
    let source = normalize(&job.source_root);
    let dest = normalize(&job.dest_root);

    if dest == source || is_child(&dest, &source) {
        return Err(PublishError::DestinationIsVault { dest });
    }
    Ok(())
}

/// Export one note, returning its status and the assets it embeds.
fn run_note<I>(
    index: &I,
    job: &ExportJob,
    options: &ExportOptions,
    task: &NoteTask,
) -> (NoteStatus, Vec<AssetCopy>)
where
    I: NoteIndex + ?Sized,
{
    match export_note(index, job, options, task) {
        Ok(result) => {
            debug!("exported {} -> {}", task.source.display(), task.dest.display());
            result
        }
        Err(e) => {
            warn!("failed to export {}: {}", task.source.display(), e);
            (
                NoteStatus::Failed {
                    error: e.to_string(),
                },
                Vec::new(),
            )
        }
    }
}

fn export_note<I>(
    index: &I,
    job: &ExportJob,
    options: &ExportOptions,
    task: &NoteTask,
) -> Result<(NoteStatus, Vec<AssetCopy>)>
where
    I: NoteIndex + ?Sized,
{
    let source_file = index.base_path().join(&task.source);
    let dest_file = job.dest_root.join(&task.dest);

    let has_references = index
        .metadata(&task.source)
        .is_some_and(|m| m.has_references());
    if !has_references {
        copy_file(&source_file, &dest_file)?;
        return Ok((NoteStatus::Copied, Vec::new()));
    }

    let content = index.read_content(&task.source)?;
    if content.is_empty() {
        copy_file(&source_file, &dest_file)?;
        return Ok((NoteStatus::Copied, Vec::new()));
    }

    let rewrite = rewrite_references(
        &content,
        &task.source,
        |target, base| index.resolve_link(target, base),
        options.broken_links,
    );
    write_file(&dest_file, &rewrite.content)?;

    Ok((
        NoteStatus::Rewritten {
            resolved: rewrite.resolved,
            broken: rewrite.broken,
        },
        rewrite.copies,
    ))
}

fn copy_asset(job: &ExportJob, copy: &AssetCopy) -> AssetReport {
    let (from, to) = copy.endpoints(&job.source_root, &job.dest_root);
    let error = match copy_file(&from, &to) {
        Ok(()) => None,
        Err(e) => {
            warn!("failed to copy asset {}: {}", copy.path.display(), e);
            Some(e.to_string())
        }
    };

    AssetReport {
        path: copy.path.clone(),
        error,
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PublishError::fs("create", parent, e))?;
    }
    Ok(())
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    ensure_parent(to)?;
    fs::copy(from, to).map_err(|e| PublishError::fs("copy", from, e))?;
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, content).map_err(|e| PublishError::fs("write", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::Note;
    use crate::types::{LinkTarget, NoteMetadata};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// In-memory index over real files, with hand-written metadata.
    struct FakeIndex {
        root: PathBuf,
        notes: Vec<PathBuf>,
        metadata: HashMap<PathBuf, NoteMetadata>,
        targets: HashMap<String, LinkTarget>,
    }

    impl FakeIndex {
        fn new(root: &Path) -> Self {
            Self {
                root: root.to_path_buf(),
                notes: Vec::new(),
                metadata: HashMap::new(),
                targets: HashMap::new(),
            }
        }

        fn note(&mut self, rel: &str, content: &str) -> &mut Self {
            let path = self.root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();

            self.notes.push(PathBuf::from(rel));
            self.metadata
                .insert(PathBuf::from(rel), Note::new(rel, content).metadata());
            self
        }

        fn asset(&mut self, rel: &str, name: &str) -> &mut Self {
            let path = self.root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, b"\x89PNG").unwrap();
            self.target(name, rel)
        }

        fn target(&mut self, reference: &str, rel: &str) -> &mut Self {
            self.targets.insert(
                reference.to_string(),
                LinkTarget::new(rel, crate::path_util::filename(Path::new(rel))),
            );
            self
        }
    }

    impl NoteIndex for FakeIndex {
        fn base_path(&self) -> &Path {
            &self.root
        }

        fn list_notes(&self) -> Result<Vec<PathBuf>> {
            Ok(self.notes.clone())
        }

        fn metadata(&self, path: &Path) -> Option<&NoteMetadata> {
            self.metadata.get(path)
        }

        fn resolve_link(&self, reference: &str, _base: &Path) -> Option<LinkTarget> {
            self.targets.get(reference).cloned()
        }

        fn read_content(&self, path: &Path) -> Result<String> {
            Ok(fs::read_to_string(self.root.join(path))?)
        }
    }

    fn yes(_: &Path) -> bool {
        true
    }

    fn run(index: &FakeIndex, job: &ExportJob) -> ExportSummary {
        export(index, job, &ExportOptions::default(), Some(yes)).unwrap()
    }

    #[test]
    fn test_job_resolves_relative_dest() {
        let job = ExportJob::new("/vault", "out", " rust ");
        assert_eq!(job.dest_root, PathBuf::from("/vault/out"));
        assert_eq!(job.tag_query, "rust");

        let job = ExportJob::new("/vault", "/elsewhere/out", "");
        assert_eq!(job.dest_root, PathBuf::from("/elsewhere/out"));
    }

    #[test]
    fn test_export_selects_and_rewrites() {
        let dir = TempDir::new().unwrap();
        let mut index = FakeIndex::new(dir.path());
        index
            .note("plain.md", "---\npublish: true\n---\nNo references here.")
            .note("draft.md", "---\npublish: false\n---\n[[plain]]")
            .note("nometa.md", "Just text [[plain]]")
            .note(
                "docs/linked.md",
                "---\npublish: true\n---\nSee [[plain|the plain one]] and ![[image 1.png]] and [[Gone]].",
            )
            .asset("assets/image 1.png", "image 1.png")
            .target("plain", "plain.md");

        let job = ExportJob::new(dir.path(), "out", "");
        let summary = run(&index, &job);

        let out = dir.path().join("out");
        assert_eq!(
            fs::read_to_string(out.join("plain.mdx")).unwrap(),
            "---\npublish: true\n---\nNo references here."
        );
        assert_eq!(
            fs::read_to_string(out.join("docs/linked.mdx")).unwrap(),
            "---\npublish: true\n---\nSee [plain](/plain.md) and ![image 1](/assets/image%201.png) and ."
        );
        assert!(out.join("assets/image 1.png").exists());
        assert!(!out.join("draft.mdx").exists());
        assert!(!out.join("nometa.mdx").exists());

        assert_eq!(summary.exported(), 2);
        assert_eq!(summary.skipped(), 2);
        assert_eq!(summary.failed(), 0);
        assert_eq!(summary.broken_links(), 1);
        assert_eq!(summary.assets.len(), 1);
        assert_eq!(
            summary.note(Path::new("plain.md")).unwrap().status,
            NoteStatus::Copied
        );
        assert_eq!(
            summary.note(Path::new("draft.md")).unwrap().status,
            NoteStatus::Skipped {
                reason: SkipReason::NotPublished
            }
        );
    }

    #[test]
    fn test_tag_query_filters() {
        let dir = TempDir::new().unwrap();
        let mut index = FakeIndex::new(dir.path());
        index
            .note("a.md", "---\npublish: true\ntags: [rust]\n---\nA")
            .note("b.md", "---\npublish: true\ntags: [go]\n---\nB")
            .note("c.md", "---\npublish: true\n---\nC");

        let job = ExportJob::new(dir.path(), "out", "rust");
        let summary = run(&index, &job);

        assert!(dir.path().join("out/a.mdx").exists());
        assert!(!dir.path().join("out/b.mdx").exists());
        assert!(!dir.path().join("out/c.mdx").exists());
        assert_eq!(
            summary.note(Path::new("b.md")).unwrap().status,
            NoteStatus::Skipped {
                reason: SkipReason::TagMismatch
            }
        );
    }

    #[test]
    fn test_notes_inside_destination_are_skipped() {
        let dir = TempDir::new().unwrap();
        let mut index = FakeIndex::new(dir.path());
        index
            .note("a.md", "---\npublish: true\n---\nA")
            .note("out/old.md", "---\npublish: true\n---\nold");

        let job = ExportJob::new(dir.path(), "out", "");
        let options = ExportOptions {
            dry_run: true,
            ..Default::default()
        };
        let summary = export(&index, &job, &options, Some(yes)).unwrap();

        assert_eq!(
            summary.note(Path::new("out/old.md")).unwrap().status,
            NoteStatus::Skipped {
                reason: SkipReason::InsideDestination
            }
        );
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let mut index = FakeIndex::new(dir.path());
        index.note("a.md", "---\npublish: true\n---\nA");
        fs::create_dir_all(dir.path().join("out")).unwrap();
        fs::write(dir.path().join("out/keep.txt"), "x").unwrap();

        let job = ExportJob::new(dir.path(), "out", "");
        let options = ExportOptions {
            dry_run: true,
            ..Default::default()
        };
        let summary = export(&index, &job, &options, None::<fn(&Path) -> bool>).unwrap();

        assert!(summary.dry_run);
        assert!(summary.reset.is_none());
        assert!(dir.path().join("out/keep.txt").exists());
        assert!(!dir.path().join("out/a.mdx").exists());
        let report = summary.note(Path::new("a.md")).unwrap();
        assert_eq!(report.status, NoteStatus::Planned);
        assert_eq!(report.dest, Some(PathBuf::from("a.mdx")));
    }

    #[test]
    fn test_declined_reset_cancels() {
        let dir = TempDir::new().unwrap();
        let mut index = FakeIndex::new(dir.path());
        index.note("a.md", "---\npublish: true\n---\nA");
        fs::create_dir_all(dir.path().join("out")).unwrap();
        fs::write(dir.path().join("out/old.mdx"), "old").unwrap();

        let job = ExportJob::new(dir.path(), "out", "");
        let result = export(&index, &job, &ExportOptions::default(), Some(|_: &Path| false));

        assert!(matches!(result, Err(PublishError::ExportCancelled(_))));
        assert!(dir.path().join("out/old.mdx").exists());
        assert!(!dir.path().join("out/a.mdx").exists());
    }

    #[test]
    fn test_rerun_clears_stale_output_but_keeps_git() {
        let dir = TempDir::new().unwrap();
        let mut index = FakeIndex::new(dir.path());
        index.note("a.md", "---\npublish: true\n---\nA");

        let out = dir.path().join("out");
        fs::create_dir_all(out.join(".git")).unwrap();
        fs::write(out.join(".git/HEAD"), "ref").unwrap();
        fs::write(out.join(".gitignore"), "node_modules").unwrap();
        fs::write(out.join("stale.mdx"), "stale").unwrap();

        let job = ExportJob::new(dir.path(), "out", "");
        let summary = run(&index, &job);

        assert!(out.join(".git/HEAD").exists());
        assert!(out.join(".gitignore").exists());
        assert!(!out.join("stale.mdx").exists());
        assert!(out.join("a.mdx").exists());
        assert_eq!(
            summary.reset,
            Some(ResetOutcome::Cleared {
                removed: 1,
                preserved: 2
            })
        );
    }

    #[test]
    fn test_destination_cannot_be_vault() {
        let dir = TempDir::new().unwrap();
        let index = FakeIndex::new(dir.path());

        let job = ExportJob::new(dir.path(), ".", "");
        let result = export(&index, &job, &ExportOptions::default(), Some(yes));
        assert!(matches!(result, Err(PublishError::DestinationIsVault { .. })));

        let job = ExportJob::new(dir.path(), "..", "");
        let result = export(&index, &job, &ExportOptions::default(), Some(yes));
        assert!(matches!(result, Err(PublishError::DestinationIsVault { .. })));
    }

    #[test]
    fn test_missing_asset_is_reported_not_fatal() {
        let dir = TempDir::new().unwrap();
        let mut index = FakeIndex::new(dir.path());
        index
            .note("a.md", "---\npublish: true\n---\n![[ghost.png]]")
            .note("b.md", "---\npublish: true\n---\nB")
            .target("ghost.png", "img/ghost.png");

        let job = ExportJob::new(dir.path(), "out", "");
        let summary = run(&index, &job);

        assert_eq!(summary.exported(), 2);
        assert_eq!(summary.failed(), 1);
        assert!(summary.assets[0].error.is_some());
        assert_eq!(
            fs::read_to_string(dir.path().join("out/a.mdx")).unwrap(),
            "---\npublish: true\n---\n![ghost](/img/ghost.png)"
        );
    }

    #[test]
    fn test_unreadable_note_fails_alone() {
        let dir = TempDir::new().unwrap();
        let mut index = FakeIndex::new(dir.path());
        index
            .note("a.md", "---\npublish: true\n---\nA")
            .note("b.md", "---\npublish: true\n---\nB");
        fs::remove_file(dir.path().join("b.md")).unwrap();

        let job = ExportJob::new(dir.path(), "out", "");
        let summary = run(&index, &job);

        assert!(dir.path().join("out/a.mdx").exists());
        assert!(matches!(
            summary.note(Path::new("b.md")).unwrap().status,
            NoteStatus::Failed { .. }
        ));
    }

    #[test]
    fn test_shared_asset_copied_once() {
        let dir = TempDir::new().unwrap();
        let mut index = FakeIndex::new(dir.path());
        index
            .note("a.md", "---\npublish: true\n---\n![[logo.png]]")
            .note("b.md", "---\npublish: true\n---\n![[logo.png]]")
            .asset("img/logo.png", "logo.png");

        let job = ExportJob::new(dir.path(), "out", "");
        let options = ExportOptions {
            threads: Some(2),
            ..Default::default()
        };
        let summary = export(&index, &job, &options, Some(yes)).unwrap();

        assert_eq!(summary.assets.len(), 1);
        assert!(dir.path().join("out/img/logo.png").exists());
    }

    #[test]
    fn test_embedded_note_does_not_overwrite_its_export() {
        let dir = TempDir::new().unwrap();
        let mut index = FakeIndex::new(dir.path());
        index
            .note("A.md", "---\npublish: true\n---\n![[B]]")
            .note("B.md", "---\npublish: true\n---\nsee [[A]]")
            .target("B", "B.md")
            .target("A", "A.md");

        let job = ExportJob::new(dir.path(), "out", "");
        let options = ExportOptions {
            extension: "md".to_string(),
            ..Default::default()
        };
        let summary = export(&index, &job, &options, Some(yes)).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("out/B.md")).unwrap(),
            "---\npublish: true\n---\nsee [A](/A.md)"
        );
        assert!(summary.assets.is_empty());
        assert_eq!(
            summary.note(Path::new("B.md")).unwrap().status,
            NoteStatus::Rewritten {
                resolved: 1,
                broken: Vec::new()
            }
        );
    }

    #[test]
    fn test_custom_extension() {
        let dir = TempDir::new().unwrap();
        let mut index = FakeIndex::new(dir.path());
        index.note("a.md", "---\npublish: true\n---\nA");

        let job = ExportJob::new(dir.path(), "out", "");
        let options = ExportOptions {
            extension: "md".to_string(),
            ..Default::default()
        };
        export(&index, &job, &options, Some(yes)).unwrap();

        assert!(dir.path().join("out/a.md").exists());
    }
}
