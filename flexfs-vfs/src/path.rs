//! Lexical path normalization for store paths
//!
//! Store paths are slash-separated and relative to the store root. The root
//! itself is `"."`.

use crate::error::{VfsError, VfsResult};

/// Path of the store root.
pub const ROOT: &str = ".";

/// Normalize a single path.
///
/// Backslashes become slashes, repeated slashes collapse, `.` segments are
/// dropped and `..` pops the previous segment. The empty path becomes `"."`.
pub fn normalize_path(path: &str) -> String {
    join_paths(&[path])
}

/// Join path segments and normalize the result.
///
/// Empty segments are ignored.
pub fn join_paths(parts: &[&str]) -> String {
    let joined = parts
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| p.replace('\\', "/"))
        .collect::<Vec<_>>()
        .join("/");
    clean(&joined)
}

fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // `/..` is `/`
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let body = segments.join("/");
    match (rooted, body.is_empty()) {
        (true, _) => format!("/{}", body),
        (false, true) => ROOT.to_string(),
        (false, false) => body,
    }
}

/// Reject normalized paths that are rooted or escape the store root.
pub(crate) fn validate(path: &str) -> VfsResult<()> {
    if path.starts_with('/') {
        return Err(VfsError::InvalidPath {
            path: path.to_string(),
            reason: "store paths must be relative".to_string(),
        });
    }
    if path == ".." || path.starts_with("../") {
        return Err(VfsError::InvalidPath {
            path: path.to_string(),
            reason: "path escapes the store root".to_string(),
        });
    }
    Ok(())
}

/// Last segment of a normalized path. The root's base name is `"."`.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Path of `name` inside the normalized directory `dir`.
pub(crate) fn child_path(dir: &str, name: &str) -> String {
    if dir == ROOT {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Parent directories of a normalized path, nearest last, excluding the root.
pub(crate) fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices('/').map(move |(i, _)| &path[..i])
}
