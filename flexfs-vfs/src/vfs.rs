//! The `VirtualFileSystem` facade

use crate::embedded::{Bundle, EmbeddedFileSystem};
use crate::error::{VfsError, VfsResult};
use crate::native::NativeFileSystem;
use crate::path::normalize_path;
use crate::r#trait::{FileHandle, FileTree};
use crate::serve::ServeRoot;
use regex::Regex;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::Arc;

/// Uniform read-only query surface over an injected [`FileTree`].
///
/// Every path argument is normalized before use, so `./a//b.txt`,
/// `a/./b.txt` and `a/b.txt` name the same entry. The facade holds no state
/// besides the tree; clones share it.
///
/// # Example
/// ```
/// use flexfs_vfs::VirtualFileSystem;
///
/// let vfs = VirtualFileSystem::from_directory(".");
/// assert!(vfs.exists("Cargo.toml").unwrap());
/// assert!(!vfs.exists("src").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct VirtualFileSystem {
    tree: Arc<dyn FileTree>,
}

impl VirtualFileSystem {
    /// Wrap any file tree.
    pub fn new(tree: impl FileTree + 'static) -> Self {
        Self {
            tree: Arc::new(tree),
        }
    }

    /// Wrap an already shared file tree.
    pub fn from_tree(tree: Arc<dyn FileTree>) -> Self {
        Self { tree }
    }

    /// Root the file system at a local directory.
    pub fn from_directory(path: impl Into<PathBuf>) -> Self {
        Self::new(NativeFileSystem::new(path))
    }

    /// Root the file system at a compiled-in bundle.
    pub fn from_embedded(bundle: Bundle) -> Self {
        Self::new(EmbeddedFileSystem::new(bundle))
    }

    /// Check whether `path` is an existing file.
    ///
    /// Directories and absent entries both yield `Ok(false)`; any other stat
    /// failure is returned.
    pub fn exists(&self, path: &str) -> VfsResult<bool> {
        let path = normalize_path(path);
        match self.tree.stat(&path) {
            Ok(metadata) => Ok(!metadata.is_dir()),
            Err(VfsError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Open a file for sequential reading. The handle is released on drop.
    pub fn open(&self, path: &str) -> VfsResult<FileHandle> {
        self.tree.open(&normalize_path(path))
    }

    /// Read a whole file into memory.
    pub fn read_file(&self, path: &str) -> VfsResult<Vec<u8>> {
        self.tree.read_file(&normalize_path(path))
    }

    /// First file under `dir` whose base name matches `pattern`, in walk order.
    pub fn find(&self, dir: &str, pattern: &str) -> VfsResult<Option<String>> {
        let rx = Regex::new(pattern).map_err(|source| VfsError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.first_file(dir, |name| rx.is_match(name))
    }

    /// Every file under `dir` whose base name matches `pattern`, in walk order.
    ///
    /// Returns an empty vector when nothing matches.
    pub fn lookup(&self, dir: &str, pattern: &str) -> VfsResult<Vec<String>> {
        let rx = Regex::new(pattern).map_err(|source| VfsError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        let mut found = Vec::new();
        self.tree.walk(&normalize_path(dir), &mut |entry| {
            if !entry.is_dir() && rx.is_match(&entry.name) {
                found.push(normalize_path(&entry.path));
            }
            ControlFlow::Continue(())
        })?;
        Ok(found)
    }

    /// First file under `dir` whose name contains `phrase` and, when `ext` is
    /// given, ends with `.ext`. Names matching `ignore` are skipped.
    ///
    /// `phrase` and `ignore` are regular expression fragments, not literals.
    /// Leading dots on `ext` are dropped and the rest is matched literally.
    pub fn search(
        &self,
        dir: &str,
        phrase: &str,
        ignore: &str,
        ext: &str,
    ) -> VfsResult<Option<String>> {
        let ext = ext.trim_start_matches('.');
        // A fragment must compile on its own, or a stray `)` could close the
        // group and detach the extension suffix.
        Regex::new(phrase).map_err(|source| VfsError::InvalidSearchPattern {
            pattern: phrase.to_string(),
            source,
        })?;
        let find_pattern = if ext.is_empty() {
            format!("(?:{}).*", phrase)
        } else {
            format!(r"(?:{}).*\.{}$", phrase, regex::escape(ext))
        };
        let rx_find = Regex::new(&find_pattern).map_err(|source| {
            VfsError::InvalidSearchPattern {
                pattern: find_pattern.clone(),
                source,
            }
        })?;

        let rx_skip = if ignore.is_empty() {
            None
        } else {
            Regex::new(ignore).map_err(|source| VfsError::InvalidIgnorePattern {
                pattern: ignore.to_string(),
                source,
            })?;
            let skip_pattern = format!(".*(?:{}).*", ignore);
            let rx = Regex::new(&skip_pattern).map_err(|source| {
                VfsError::InvalidIgnorePattern {
                    pattern: skip_pattern.clone(),
                    source,
                }
            })?;
            Some(rx)
        };

        self.first_file(dir, |name| {
            rx_find.is_match(name) && !rx_skip.as_ref().is_some_and(|rx| rx.is_match(name))
        })
    }

    /// The underlying tree, for callers composing with other tooling.
    pub fn tree(&self) -> Arc<dyn FileTree> {
        Arc::clone(&self.tree)
    }

    /// The tree adapted for an HTTP static-file handler.
    pub fn serve_root(&self) -> ServeRoot {
        ServeRoot::new(self.tree())
    }

    fn first_file(
        &self,
        dir: &str,
        matches: impl Fn(&str) -> bool,
    ) -> VfsResult<Option<String>> {
        let mut result = None;
        self.tree.walk(&normalize_path(dir), &mut |entry| {
            if !entry.is_dir() && matches(&entry.name) {
                result = Some(normalize_path(&entry.path));
                return ControlFlow::Break(());
            }
            ControlFlow::Continue(())
        })?;
        Ok(result)
    }
}
