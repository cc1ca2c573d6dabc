//! FileTree trait definition

use crate::error::{VfsError, VfsResult};
use crate::walk;
use std::fmt;
use std::io::{self, Read};
use std::ops::ControlFlow;

/// Kind of an entry in a file tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

impl EntryKind {
    pub fn is_dir(self) -> bool {
        self == EntryKind::Dir
    }
}

/// Metadata about a file or directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    pub kind: EntryKind,
    /// Size in bytes (0 for directories).
    pub len: u64,
}

impl Metadata {
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

/// One child of a directory, as returned by `read_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Name of the entry (not full path).
    pub name: String,
    pub kind: EntryKind,
}

/// An entry visited during a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Normalized path relative to the tree root.
    pub path: String,
    /// Base name of `path`.
    pub name: String,
    pub kind: EntryKind,
}

impl WalkEntry {
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

/// A sequential read handle on a file.
///
/// The underlying resource is released when the handle is dropped.
pub struct FileHandle {
    path: String,
    metadata: Metadata,
    reader: Box<dyn Read + Send>,
}

impl FileHandle {
    pub fn new(path: impl Into<String>, metadata: Metadata, reader: Box<dyn Read + Send>) -> Self {
        Self {
            path: path.into(),
            metadata,
            reader,
        }
    }

    /// Normalized path the handle was opened with.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn metadata(&self) -> Metadata {
        self.metadata
    }

    /// Read the remaining content into memory.
    pub fn read_all(&mut self) -> VfsResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.metadata.len as usize);
        self.reader
            .read_to_end(&mut buf)
            .map_err(|e| VfsError::from_io(&self.path, e))?;
        Ok(buf)
    }
}

impl Read for FileHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("path", &self.path)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Read-only hierarchical file tree
///
/// Provides the minimal capability set the `VirtualFileSystem` facade needs,
/// decoupling it from where the bytes actually live.
///
/// All paths are normalized store paths (see [`crate::normalize_path`]),
/// relative to the tree root. The root is `"."`.
///
/// # Implementations
/// - `NativeFileSystem`: a directory on the host file system
/// - `EmbeddedFileSystem`: a bundle compiled into the binary
pub trait FileTree: Send + Sync + fmt::Debug {
    /// Get metadata for a file or directory
    ///
    /// # Returns
    /// `VfsError::NotFound` if the entry does not exist
    fn stat(&self, path: &str) -> VfsResult<Metadata>;

    /// Open a file for sequential reading
    ///
    /// # Returns
    /// A handle owned by the caller, or `VfsError::IsADirectory` for directories
    fn open(&self, path: &str) -> VfsResult<FileHandle>;

    /// List a directory, sorted by name
    fn read_dir(&self, path: &str) -> VfsResult<Vec<DirEntry>>;

    /// Read file contents
    fn read_file(&self, path: &str) -> VfsResult<Vec<u8>> {
        self.open(path)?.read_all()
    }

    /// Walk the subtree at `root` depth-first in lexical order
    ///
    /// `root` itself is visited first. Returning `ControlFlow::Break` from
    /// `visit` stops the walk. Failing to stat the root or to list any
    /// directory aborts the walk with that error.
    fn walk(
        &self,
        root: &str,
        visit: &mut dyn FnMut(&WalkEntry) -> ControlFlow<()>,
    ) -> VfsResult<()> {
        walk::walk_tree(self, root, visit)
    }
}
