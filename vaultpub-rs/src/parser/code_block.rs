//! Code span detection, so references inside code are never rewritten.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// A byte range of content that is inside a fenced block or inline code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlockRange {
    /// Byte offsets covered, end exclusive.
    pub span: Range<usize>,
    /// Whether this is a fenced block (vs inline code).
    pub is_fenced: bool,
}

// Opening fence: ``` or ~~~ at the start of a line
static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(`{3,}|~{3,})").expect("valid regex"));

// Inline code with one or two backticks. Double-backtick spans may wrap
// lines but never cross a blank line.
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"``(?:[^`\n]|`[^`\n]|\n[^`\n])*``|`[^`\n]+`").expect("valid regex")
});

/// Find every fenced code block and inline code span in content.
pub fn find_code_block_ranges(content: &str) -> Vec<CodeBlockRange> {
    let mut ranges = find_fenced(content);

    for m in INLINE_CODE.find_iter(content) {
        if ranges.iter().any(|r| overlaps(&r.span, &m.range())) {
            continue;
        }
        ranges.push(CodeBlockRange {
            span: m.range(),
            is_fenced: false,
        });
    }

    ranges.sort_by_key(|r| r.span.start);
    ranges
}

fn find_fenced(content: &str) -> Vec<CodeBlockRange> {
    let mut ranges = Vec::new();
    let mut pos = 0;

    while let Some(open) = FENCE_OPEN.find_at(content, pos) {
        let fence = open.as_str();
        let fence_char = fence.chars().next().unwrap_or('`');
        let body_start = line_end(content, open.start());

        // The closing fence uses the same character and is at least as long
        let mut cursor = body_start;
        let mut close = None;
        while cursor < content.len() {
            let end = line_end(content, cursor);
            let line = content[cursor..end].trim();
            if line.len() >= fence.len() && line.chars().all(|c| c == fence_char) {
                close = Some(end);
                break;
            }
            cursor = end;
        }

        match close {
            Some(end) => {
                ranges.push(CodeBlockRange {
                    span: open.start()..end,
                    is_fenced: true,
                });
                pos = end;
            }
            // Unclosed fence: not a block, keep scanning after it
            None => pos = body_start,
        }

        if pos >= content.len() {
            break;
        }
    }

    ranges
}

/// Offset just past the newline ending the line that contains `from`.
fn line_end(content: &str, from: usize) -> usize {
    content[from..]
        .find('\n')
        .map(|i| from + i + 1)
        .unwrap_or(content.len())
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Check if a byte offset is inside any code range.
pub fn is_in_code_block(offset: usize, ranges: &[CodeBlockRange]) -> bool {
    ranges.iter().any(|r| r.span.contains(&offset))
}
