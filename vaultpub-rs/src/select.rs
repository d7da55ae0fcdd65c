//! Deciding which notes are eligible for export.

use crate::types::NoteMetadata;
use serde_yaml::Value as YamlValue;

/// Frontmatter key marking a note for export.
pub const PUBLISH_KEY: &str = "publish";

/// Frontmatter key holding the note's tag list.
pub const TAGS_KEY: &str = "tags";

/// Truthiness of a frontmatter value.
///
/// Follows the loose rules note authors expect: `false`, `null`, zero and
/// the empty string are false; any other scalar, list or map is true.
pub fn is_truthy(value: &YamlValue) -> bool {
    match value {
        YamlValue::Null => false,
        YamlValue::Bool(b) => *b,
        YamlValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        YamlValue::String(s) => !s.is_empty(),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => true,
        YamlValue::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

/// A note is publishable iff it has frontmatter with a truthy `publish` field.
pub fn is_publishable(metadata: Option<&NoteMetadata>) -> bool {
    metadata
        .and_then(|m| m.frontmatter.as_ref())
        .and_then(|fm| fm.get(PUBLISH_KEY))
        .is_some_and(is_truthy)
}

/// Check a note's tags against the export query.
///
/// An empty query matches everything. Otherwise the frontmatter must carry a
/// `tags` field containing the query exactly: as an element of a list, or
/// as one of the comma/space separated words of a single string.
pub fn tag_matches(frontmatter: Option<&YamlValue>, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }

    let Some(tags) = frontmatter.and_then(|fm| fm.get(TAGS_KEY)) else {
        return false;
    };

    match tags {
        YamlValue::Sequence(items) => items
            .iter()
            .any(|item| scalar_to_string(item).is_some_and(|t| t == query)),
        YamlValue::String(s) => s
            .split(|c: char| c == ',' || c.is_whitespace())
            .any(|t| t == query),
        other => scalar_to_string(other).is_some_and(|t| t == query),
    }
}

fn scalar_to_string(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
