//! CLI argument definitions using clap.

use crate::rewrite::BrokenLinkPolicy;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vaultpub")]
#[command(author, version, about = "Publish tagged notes from an Obsidian-style vault", long_about = None)]
pub struct Cli {
    /// Path to the vault (overrides config default)
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// Output as JSON (default)
    #[arg(long, global = true, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output as YAML
    #[arg(long, global = true, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output as TOML
    #[arg(long, global = true, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (can be repeated)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }

    /// Default log filter for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export published notes, rewriting wikilinks into markdown links
    Export(ExportArgs),

    /// Show which notes would be exported and their broken references
    Check(CheckArgs),
}

// === Export ===

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Only export notes carrying this tag
    #[arg(long, default_value = "")]
    pub tag: String,

    /// Destination directory (relative paths are taken from the vault root)
    #[arg(long)]
    pub dest: Option<PathBuf>,

    /// Clear an existing destination without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Print the export plan without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Number of worker threads (default: one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// What to do with references that do not resolve
    #[arg(long, value_enum)]
    pub broken_links: Option<BrokenLinkPolicy>,

    /// Extension for exported notes
    #[arg(long)]
    pub extension: Option<String>,
}

// === Check ===

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Only consider notes carrying this tag
    #[arg(long, default_value = "")]
    pub tag: String,
}
