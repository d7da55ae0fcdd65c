//! YAML frontmatter parsing.

use crate::error::{PublishError, Result};
use serde_yaml::Value;
use std::path::Path;

/// A note split at its frontmatter delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// The raw YAML between the `---` lines, if any.
    pub yaml: Option<&'a str>,
    /// Everything after the closing delimiter line.
    pub body: &'a str,
}

/// Split content into frontmatter and body.
///
/// Frontmatter must open with `---` on the first line and close with a line
/// that is exactly `---`. Anything else is treated as body text.
pub fn split_frontmatter(content: &str) -> FrontmatterSplit<'_> {
    let no_frontmatter = FrontmatterSplit {
        yaml: None,
        body: content,
    };

    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return no_frontmatter;
    };
    let yaml_start = content.len() - rest.len();

    // Walk line by line looking for the closing delimiter
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            let yaml_end = yaml_start + offset;
            let body_start = yaml_end + line.len();
            // The newline before the delimiter belongs to neither part
            let yaml = content[yaml_start..yaml_end]
                .strip_suffix('\n')
                .map(|y| y.strip_suffix('\r').unwrap_or(y))
                .unwrap_or("");
            return FrontmatterSplit {
                yaml: Some(yaml),
                body: &content[body_start..],
            };
        }
        offset += line.len();
    }

    no_frontmatter
}

/// Extract frontmatter as a raw YAML string.
pub fn extract_frontmatter(content: &str) -> Option<&str> {
    split_frontmatter(content).yaml
}

/// Parse frontmatter with path context for error messages.
///
/// An empty frontmatter block parses to `None`.
pub fn parse_frontmatter_with_path(content: &str, path: &Path) -> Result<Option<Value>> {
    let Some(yaml) = extract_frontmatter(content) else {
        return Ok(None);
    };

    if yaml.trim().is_empty() {
        return Ok(None);
    }

    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| PublishError::InvalidFrontmatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(Some(value))
}
