//! Check command: preview selection and broken references.

use crate::cli::args::CheckArgs;
use crate::cli::output::Output;
use crate::config::Config;
use crate::error::{ExitCode, Result};
use crate::export::{plan, ExportJob, NoteStatus};
use crate::index::NoteIndex;
use crate::types::Link;
use crate::vault::Vault;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Output for the check command.
#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub selected: Vec<CheckedNote>,
    pub skipped: usize,
    pub broken_links: usize,
}

/// A note that would be exported.
#[derive(Debug, Serialize)]
pub struct CheckedNote {
    pub path: PathBuf,
    pub dest: PathBuf,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub broken: Vec<BrokenReference>,
}

/// A reference that does not resolve.
#[derive(Debug, Serialize)]
pub struct BrokenReference {
    pub target: String,
    pub line: usize,
    pub embed: bool,
}

/// Collect the check report for any index.
pub fn check<I>(index: &I, job: &ExportJob, config: &Config) -> Result<CheckOutput>
where
    I: NoteIndex + ?Sized,
{
    let reports = plan(index, job, &config.export.options())?;
    let mut selected = Vec::new();
    let mut skipped = 0;

    for report in reports {
        let (NoteStatus::Planned, Some(dest)) = (&report.status, report.dest) else {
            skipped += 1;
            continue;
        };
        let broken = broken_references(index, &report.source);
        selected.push(CheckedNote {
            path: report.source,
            dest,
            broken,
        });
    }

    let broken_links = selected.iter().map(|n| n.broken.len()).sum();
    Ok(CheckOutput {
        selected,
        skipped,
        broken_links,
    })
}

fn broken_references<I>(index: &I, path: &Path) -> Vec<BrokenReference>
where
    I: NoteIndex + ?Sized,
{
    let Some(meta) = index.metadata(path) else {
        return Vec::new();
    };

    let mut occurrences: Vec<&Link> = meta
        .links
        .iter()
        .chain(meta.embeds.iter())
        .flatten()
        .collect();
    occurrences.sort_by_key(|l| l.line);

    occurrences
        .into_iter()
        .filter(|l| index.resolve_link(&l.target, path).is_none())
        .map(|l| BrokenReference {
            target: l.target.clone(),
            line: l.line,
            embed: l.embed,
        })
        .collect()
}

/// Run the check command against the vault at `root`.
pub fn run(root: &Path, config: &Config, args: &CheckArgs, output: &Output) -> Result<ExitCode> {
    let job = ExportJob::new(root, &config.export.dir, args.tag.as_str());
    let vault = Vault::open_excluding(root, Some(&job.dest_root))?;

    let report = check(&vault, &job, config)?;
    output.info(&format!(
        "{} notes selected, {} skipped, {} broken references",
        report.selected.len(),
        report.skipped,
        report.broken_links
    ));
    output.print(&report)?;

    Ok(ExitCode::Success)
}
