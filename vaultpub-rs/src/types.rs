//! Shared types for vaultpub.

use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;

/// A wikilink or embed occurrence found in a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The reference text used for resolution (alias removed).
    pub target: String,

    /// Optional display alias (the part after the last |).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Whether this is an embed (![[...]]) rather than a link.
    pub embed: bool,

    /// Line number where this occurrence appears (1-indexed).
    pub line: usize,
}

/// A reference resolved to a concrete file in the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTarget {
    /// Vault-relative path with forward slashes (e.g. "assets/image 1.png").
    pub path: String,

    /// File name without extension (e.g. "image 1").
    pub basename: String,
}

impl LinkTarget {
    pub fn new(path: impl Into<String>, basename: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            basename: basename.into(),
        }
    }
}

/// Parsed metadata for a note, as the index sees it.
///
/// `links` and `embeds` are `None` when the note contains no occurrence of
/// that kind, never `Some(vec![])`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteMetadata {
    /// Parsed YAML frontmatter, if the note has any.
    pub frontmatter: Option<YamlValue>,

    /// Plain wikilink occurrences.
    pub links: Option<Vec<Link>>,

    /// Embed occurrences.
    pub embeds: Option<Vec<Link>>,
}

impl NoteMetadata {
    /// Build metadata from frontmatter and a mixed list of occurrences.
    pub fn from_parts(frontmatter: Option<YamlValue>, occurrences: Vec<Link>) -> Self {
        let (embeds, links): (Vec<Link>, Vec<Link>) =
            occurrences.into_iter().partition(|l| l.embed);

        Self {
            frontmatter,
            links: (!links.is_empty()).then_some(links),
            embeds: (!embeds.is_empty()).then_some(embeds),
        }
    }

    /// Whether the note has any internal reference that needs rewriting.
    pub fn has_references(&self) -> bool {
        self.links.is_some() || self.embeds.is_some()
    }
}
