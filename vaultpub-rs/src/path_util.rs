//! Lexical path helpers.
//!
//! Nothing here touches the filesystem: paths are compared as written, after
//! folding `.` and `..` segments.

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path, dropping `.` segments and folding `..` into
/// the preceding segment where possible.
pub fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `/..` is still `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    parts.iter().map(|c| c.as_os_str()).collect()
}

/// Compute the relative path leading from `from` to `to`.
///
/// Returns `None` when the two paths share no common root (one absolute and
/// one relative, or different Windows prefixes).
pub fn relative_to(from: &Path, to: &Path) -> Option<PathBuf> {
    let from = normalize(from);
    let to = normalize(to);

    if from.has_root() != to.has_root() {
        return None;
    }

    let from_parts: Vec<Component<'_>> = from.components().collect();
    let to_parts: Vec<Component<'_>> = to.components().collect();

    if let (Some(Component::Prefix(a)), Some(Component::Prefix(b))) =
        (from_parts.first(), to_parts.first())
    {
        if a != b {
            return None;
        }
    }

    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..from_parts.len() {
        relative.push("..");
    }
    for part in &to_parts[common..] {
        relative.push(part.as_os_str());
    }

    Some(relative)
}

/// Check whether `child` lies strictly inside `parent`.
///
/// A path is never its own child, and neither ancestors of `parent` nor
/// unrelated paths are children.
pub fn is_child(parent: &Path, child: &Path) -> bool {
    match relative_to(parent, child) {
        Some(relative) => {
            !relative.as_os_str().is_empty()
                && !matches!(relative.components().next(), Some(Component::ParentDir))
                && !relative.is_absolute()
        }
        None => false,
    }
}

/// Last path segment with its extension stripped.
pub fn filename(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Render a relative path with forward slashes regardless of platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
