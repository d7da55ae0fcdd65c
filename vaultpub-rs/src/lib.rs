//! vaultpub - publish the shareable part of an Obsidian-style vault.
//!
//! # Overview
//!
//! An export selects notes whose frontmatter marks them `publish`, optionally
//! narrowed to a tag, and writes them to a destination directory with
//! `[[wikilinks]]` and `![[embeds]]` rewritten into plain markdown links.
//! Embedded files are copied alongside. A previous export in the destination
//! is cleared first, keeping `.git` and `.gitignore`.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use vaultpub::{export, ExportJob, ExportOptions, Vault};
//!
//! let vault = Vault::open("/path/to/vault").unwrap();
//! let job = ExportJob::new("/path/to/vault", "__EXPORT__", "rust");
//! let summary = export(&vault, &job, &ExportOptions::default(), Some(|_: &Path| true)).unwrap();
//! println!("exported {} notes", summary.exported());
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod index;
pub mod note;
pub mod parser;
pub mod path_util;
pub mod reset;
pub mod rewrite;
pub mod select;
pub mod types;
pub mod vault;

// Re-export main types at crate root
pub use config::Config;
pub use error::{PublishError, Result};
pub use export::{export, ExportJob, ExportOptions, ExportSummary, NoteReport, NoteStatus};
pub use index::NoteIndex;
pub use note::Note;
pub use reset::{clear_dir_preserving_vcs, ResetOutcome};
pub use rewrite::{rewrite_references, AssetCopy, BrokenLinkPolicy};
pub use types::*;
pub use vault::Vault;
