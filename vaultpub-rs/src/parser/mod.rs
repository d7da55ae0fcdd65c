//! Parsers for Obsidian markdown syntax.

pub mod code_block;
pub mod frontmatter;
pub mod wikilink;

pub use code_block::{find_code_block_ranges, is_in_code_block, CodeBlockRange};
pub use frontmatter::{extract_frontmatter, parse_frontmatter_with_path, split_frontmatter};
pub use wikilink::{parse_all_links, split_reference};
