//! Native file system implementation

use crate::error::{VfsError, VfsResult};
use crate::path::{base_name, join_paths, normalize_path, validate, ROOT};
use crate::r#trait::{DirEntry, EntryKind, FileHandle, FileTree, Metadata, WalkEntry};
use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file tree rooted at a directory on the host file system.
///
/// Store paths resolve beneath `root`; rooted paths and paths climbing out of
/// the root are rejected before touching the disk.
///
/// # Example
/// ```
/// use flexfs_vfs::{FileTree, NativeFileSystem};
///
/// let fs = NativeFileSystem::new(".");
/// assert!(fs.stat("Cargo.toml").is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct NativeFileSystem {
    root: PathBuf,
}

impl NativeFileSystem {
    /// Create a native file system rooted at `root`.
    ///
    /// The root is not checked here; a missing root surfaces as `NotFound`
    /// on first use.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The host directory this tree is rooted at.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> VfsResult<(String, PathBuf)> {
        let path = normalize_path(path);
        validate(&path)?;
        let host = if path == ROOT {
            self.root.clone()
        } else {
            self.root.join(&path)
        };
        Ok((path, host))
    }

    fn relative(&self, host: &Path) -> String {
        host.strip_prefix(&self.root)
            .map(|p| normalize_path(&p.to_string_lossy()))
            .unwrap_or_else(|_| host.display().to_string())
    }
}

fn kind_of(file_type: fs::FileType) -> EntryKind {
    if file_type.is_dir() {
        EntryKind::Dir
    } else {
        EntryKind::File
    }
}

impl FileTree for NativeFileSystem {
    fn stat(&self, path: &str) -> VfsResult<Metadata> {
        let (path, host) = self.resolve(path)?;
        let meta = fs::metadata(&host).map_err(|e| VfsError::from_io(&path, e))?;
        Ok(Metadata {
            kind: kind_of(meta.file_type()),
            len: if meta.is_dir() { 0 } else { meta.len() },
        })
    }

    fn open(&self, path: &str) -> VfsResult<FileHandle> {
        let (path, host) = self.resolve(path)?;
        let metadata = self.stat(&path)?;
        if metadata.is_dir() {
            return Err(VfsError::IsADirectory { path });
        }
        let file = fs::File::open(&host).map_err(|e| VfsError::from_io(&path, e))?;
        Ok(FileHandle::new(path, metadata, Box::new(file)))
    }

    fn read_dir(&self, path: &str) -> VfsResult<Vec<DirEntry>> {
        let (path, host) = self.resolve(path)?;
        if !self.stat(&path)?.is_dir() {
            return Err(VfsError::NotADirectory { path });
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&host).map_err(|e| VfsError::from_io(&path, e))? {
            let entry = entry.map_err(|e| VfsError::from_io(&path, e))?;
            // Names that are not UTF-8 have no store path.
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            let file_type = entry.file_type().map_err(|e| VfsError::from_io(&path, e))?;
            entries.push(DirEntry {
                name,
                kind: kind_of(file_type),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn walk(
        &self,
        root: &str,
        visit: &mut dyn FnMut(&WalkEntry) -> ControlFlow<()>,
    ) -> VfsResult<()> {
        let (root, base) = self.resolve(root)?;

        let mut entries = WalkDir::new(&base)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();
        while let Some(entry) = entries.next() {
            let entry = entry.map_err(|e| {
                let at = e
                    .path()
                    .map(|p| self.relative(p))
                    .unwrap_or_else(|| root.clone());
                VfsError::from_io(&at, e.into())
            })?;

            let Some(rel) = entry.path().strip_prefix(&base).ok().and_then(Path::to_str) else {
                if entry.file_type().is_dir() {
                    entries.skip_current_dir();
                }
                continue;
            };
            let path = join_paths(&[&root, rel]);
            let walked = WalkEntry {
                name: base_name(&path).to_string(),
                kind: kind_of(entry.file_type()),
                path,
            };
            if visit(&walked).is_break() {
                break;
            }
        }
        Ok(())
    }
}
