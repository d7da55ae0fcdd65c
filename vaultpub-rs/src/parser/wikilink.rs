//! Wikilink and embed parsing.

use crate::parser::code_block::{find_code_block_ranges, is_in_code_block};
use crate::types::Link;
use regex::Regex;
use std::sync::LazyLock;

/// Reference grammar: `[[TARGET]]` or `![[TARGET]]`, where TARGET is any
/// non-empty run of characters other than `]`.
///
/// Group 1 is the embed marker, group 2 the bracketed reference.
pub static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(!)?\[\[([^\]]+)\]\]").expect("valid regex"));

/// Split a bracketed reference into its target and optional alias.
///
/// The alias is the last `|` segment; everything before it, pipes included,
/// is the target.
pub fn split_reference(reference: &str) -> (&str, Option<&str>) {
    match reference.rsplit_once('|') {
        Some((target, alias)) => (target, Some(alias)),
        None => (reference, None),
    }
}

/// Parse all wikilinks and embeds from content, skipping code.
pub fn parse_all_links(content: &str) -> Vec<Link> {
    let code_ranges = find_code_block_ranges(content);
    let mut links = Vec::new();

    for cap in REFERENCE.captures_iter(content) {
        let Some(full) = cap.get(0) else { continue };
        if is_in_code_block(full.start(), &code_ranges) {
            continue;
        }

        let (target, alias) = split_reference(&cap[2]);

        links.push(Link {
            target: target.trim().to_string(),
            alias: alias.map(|a| a.to_string()),
            embed: cap.get(1).is_some(),
            line: content[..full.start()].matches('\n').count() + 1,
        });
    }

    links
}
