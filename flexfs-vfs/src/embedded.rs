//! Embedded (compiled-in) file system implementation

use crate::error::{VfsError, VfsResult};
use crate::path::{ancestors, normalize_path, validate, ROOT};
use crate::r#trait::{DirEntry, EntryKind, FileHandle, FileTree, Metadata};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::Arc;

/// A bundle of files compiled into the binary: `(path, bytes)` pairs.
///
/// Usually produced with [`embed_bundle!`](crate::embed_bundle).
pub type Bundle = &'static [(&'static str, &'static [u8])];

#[derive(Debug, Clone)]
enum Contents {
    Static(&'static [u8]),
    Shared(Arc<[u8]>),
}

impl AsRef<[u8]> for Contents {
    fn as_ref(&self) -> &[u8] {
        match self {
            Contents::Static(bytes) => *bytes,
            Contents::Shared(bytes) => &bytes[..],
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    File(Contents),
    Dir,
}

/// A read-only file tree over an embedded bundle.
///
/// Entries live in a `BTreeMap` keyed by normalized path, so listings come
/// out in lexical order. Directories are implied by file paths; the root
/// `"."` always exists. When a path is used both as a file and as the parent
/// of another file, the directory wins.
///
/// # Example
/// ```
/// use flexfs_vfs::{EmbeddedFileSystem, FileTree};
///
/// static ASSETS: flexfs_vfs::Bundle = &[("web/index.html", b"<html></html>" as &[u8])];
///
/// let fs = EmbeddedFileSystem::new(ASSETS);
/// assert!(fs.stat("web").unwrap().is_dir());
/// assert_eq!(fs.read_file("web/index.html").unwrap(), b"<html></html>");
/// ```
#[derive(Debug, Clone)]
pub struct EmbeddedFileSystem {
    entries: Arc<BTreeMap<String, Node>>,
}

impl EmbeddedFileSystem {
    /// Create a file system over a static bundle.
    pub fn new(bundle: Bundle) -> Self {
        Self::build(
            bundle
                .iter()
                .map(|&(path, bytes)| (path, Contents::Static(bytes))),
        )
    }

    /// Create a file system pre-populated with owned files.
    ///
    /// # Arguments
    /// * `files` - Iterator of (path, content) tuples
    pub fn with_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<u8>)>,
        S: AsRef<str>,
    {
        let files: Vec<(S, Vec<u8>)> = files.into_iter().collect();
        Self::build(
            files
                .iter()
                .map(|(path, content)| (path.as_ref(), Contents::Shared(Arc::from(content.as_slice())))),
        )
    }

    /// Index files by normalized path.
    ///
    /// A leading `/` is dropped; entries that still land outside the root, or
    /// on the root itself, are skipped.
    fn build<'a>(files: impl Iterator<Item = (&'a str, Contents)>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(ROOT.to_string(), Node::Dir);

        for (raw, contents) in files {
            let path = normalize_path(raw.trim_start_matches('/'));
            if path == ROOT || validate(&path).is_err() {
                continue;
            }
            for dir in ancestors(&path) {
                entries.insert(dir.to_string(), Node::Dir);
            }
            if !matches!(entries.get(&path), Some(Node::Dir)) {
                entries.insert(path, Node::File(contents));
            }
        }

        Self {
            entries: Arc::new(entries),
        }
    }

    /// Number of files in the bundle.
    pub fn file_count(&self) -> usize {
        self.entries
            .values()
            .filter(|node| matches!(node, Node::File(_)))
            .count()
    }

    fn lookup(&self, path: &str) -> VfsResult<(String, &Node)> {
        let path = normalize_path(path);
        validate(&path)?;
        match self.entries.get(&path) {
            Some(node) => Ok((path, node)),
            None => Err(VfsError::NotFound { path }),
        }
    }
}

impl FileTree for EmbeddedFileSystem {
    fn stat(&self, path: &str) -> VfsResult<Metadata> {
        let (_, node) = self.lookup(path)?;
        Ok(match node {
            Node::File(contents) => Metadata {
                kind: EntryKind::File,
                len: contents.as_ref().len() as u64,
            },
            Node::Dir => Metadata {
                kind: EntryKind::Dir,
                len: 0,
            },
        })
    }

    fn open(&self, path: &str) -> VfsResult<FileHandle> {
        match self.lookup(path)? {
            (path, Node::File(contents)) => {
                let metadata = Metadata {
                    kind: EntryKind::File,
                    len: contents.as_ref().len() as u64,
                };
                Ok(FileHandle::new(
                    path,
                    metadata,
                    Box::new(Cursor::new(contents.clone())),
                ))
            }
            (path, Node::Dir) => Err(VfsError::IsADirectory { path }),
        }
    }

    fn read_file(&self, path: &str) -> VfsResult<Vec<u8>> {
        match self.lookup(path)? {
            (_, Node::File(contents)) => Ok(contents.as_ref().to_vec()),
            (path, Node::Dir) => Err(VfsError::IsADirectory { path }),
        }
    }

    fn read_dir(&self, path: &str) -> VfsResult<Vec<DirEntry>> {
        let (path, node) = self.lookup(path)?;
        if let Node::File(_) = node {
            return Err(VfsError::NotADirectory { path });
        }

        let prefix = if path == ROOT {
            String::new()
        } else {
            format!("{}/", path)
        };

        Ok(self
            .entries
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter_map(|(key, node)| {
                let name = &key[prefix.len()..];
                if name.is_empty() || name == ROOT || name.contains('/') {
                    return None;
                }
                Some(DirEntry {
                    name: name.to_string(),
                    kind: match node {
                        Node::File(_) => EntryKind::File,
                        Node::Dir => EntryKind::Dir,
                    },
                })
            })
            .collect())
    }
}
