//! Export command.

use crate::cli::args::ExportArgs;
use crate::cli::output::Output;
use crate::config::Config;
use crate::error::{ExitCode, Result};
use crate::export::{export, ExportJob, ExportSummary};
use crate::vault::Vault;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

/// Build the export options: config first, then CLI overrides.
pub fn options(config: &Config, args: &ExportArgs) -> crate::export::ExportOptions {
    let mut options = config.export.options();
    if let Some(policy) = args.broken_links {
        options.broken_links = policy;
    }
    if let Some(threads) = args.threads {
        options.threads = Some(threads);
    }
    if let Some(ext) = &args.extension {
        options.extension = ext.trim_start_matches('.').to_string();
    }
    options.dry_run = args.dry_run;
    options
}

/// Run the export against the vault at `root`.
pub fn run(root: &Path, config: &Config, args: &ExportArgs, output: &Output) -> Result<ExitCode> {
    let dest = args.dest.as_deref().unwrap_or(&config.export.dir);
    let job = ExportJob::new(root, dest, args.tag.as_str());
    let options = options(config, args);

    let vault = Vault::open_excluding(root, Some(&job.dest_root))?;

    let summary = if args.yes {
        export(&vault, &job, &options, Some(|_: &Path| true))?
    } else {
        export(&vault, &job, &options, Some(prompt_clear))?
    };

    report(&summary, output);
    output.print(&summary)?;

    Ok(if summary.failed() > 0 {
        ExitCode::PartialFailure
    } else {
        ExitCode::Success
    })
}

fn report(summary: &ExportSummary, output: &Output) {
    if summary.dry_run {
        output.info(&format!(
            "Dry run: {} notes would be exported to {}",
            summary.notes.len() - summary.skipped(),
            summary.dest_root.display()
        ));
        return;
    }

    output.info(&format!(
        "Exported {} notes and {} assets to {}",
        summary.exported(),
        summary.assets.len(),
        summary.dest_root.display()
    ));
    if summary.broken_links() > 0 {
        output.warn(&format!("{} broken references", summary.broken_links()));
    }
    if summary.failed() > 0 {
        output.warn(&format!("{} notes or assets failed to export", summary.failed()));
    }
}

/// Ask on the terminal whether `dir` may be cleared.
///
/// Non-interactive stdin counts as a refusal; pass `--yes` instead.
fn prompt_clear(dir: &Path) -> bool {
    let stdin = io::stdin();
    if !stdin.is_terminal() {
        return false;
    }

    eprint!(
        "{} already exists. Delete its contents (keeping .git and .gitignore)? [y/N] ",
        dir.display()
    );
    if io::stderr().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if stdin.lock().read_line(&mut answer).is_err() {
        return false;
    }
    is_yes(&answer)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
