//! Generic depth-first walk over any `FileTree`

use crate::error::VfsResult;
use crate::path::{base_name, child_path, normalize_path};
use crate::r#trait::{FileTree, WalkEntry};
use std::ops::ControlFlow;

/// Walk `root` using only `stat` and `read_dir`.
///
/// Pre-order: a directory is visited before its children, children are
/// visited in the order `read_dir` returns them (sorted by name).
pub(crate) fn walk_tree<T: FileTree + ?Sized>(
    tree: &T,
    root: &str,
    visit: &mut dyn FnMut(&WalkEntry) -> ControlFlow<()>,
) -> VfsResult<()> {
    let root = normalize_path(root);
    let metadata = tree.stat(&root)?;
    let entry = WalkEntry {
        name: base_name(&root).to_string(),
        path: root,
        kind: metadata.kind,
    };
    walk_entry(tree, entry, visit).map(|_| ())
}

fn walk_entry<T: FileTree + ?Sized>(
    tree: &T,
    entry: WalkEntry,
    visit: &mut dyn FnMut(&WalkEntry) -> ControlFlow<()>,
) -> VfsResult<ControlFlow<()>> {
    if visit(&entry).is_break() {
        return Ok(ControlFlow::Break(()));
    }
    if !entry.is_dir() {
        return Ok(ControlFlow::Continue(()));
    }

    for child in tree.read_dir(&entry.path)? {
        let next = WalkEntry {
            path: child_path(&entry.path, &child.name),
            name: child.name,
            kind: child.kind,
        };
        if walk_entry(tree, next, visit)?.is_break() {
            return Ok(ControlFlow::Break(()));
        }
    }
    Ok(ControlFlow::Continue(()))
}
