//! Adapter exposing a `FileTree` to HTTP static-file handlers

use crate::error::{VfsError, VfsResult};
use crate::path::normalize_path;
use crate::r#trait::{DirEntry, FileHandle, FileTree, Metadata};
use std::sync::Arc;

/// A file tree as seen by a static-file handler.
///
/// Request paths are URL-style: `/` is the root and a leading slash is
/// optional. Paths that climb above the root are rejected.
#[derive(Debug, Clone)]
pub struct ServeRoot {
    tree: Arc<dyn FileTree>,
}

/// A resolved request: a directory, or a file with an open handle.
#[derive(Debug)]
pub struct ServedFile {
    path: String,
    metadata: Metadata,
    content_type: Option<&'static str>,
    handle: Option<FileHandle>,
}

impl ServedFile {
    /// Normalized store path.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn metadata(&self) -> Metadata {
        self.metadata
    }

    pub fn is_dir(&self) -> bool {
        self.metadata.is_dir()
    }

    /// Content type guessed from the extension; `None` for directories.
    pub fn content_type(&self) -> Option<&'static str> {
        self.content_type
    }

    /// Take the open handle; `None` for directories.
    pub fn into_handle(self) -> Option<FileHandle> {
        self.handle
    }
}

impl ServeRoot {
    pub fn new(tree: Arc<dyn FileTree>) -> Self {
        Self { tree }
    }

    /// Map a request path to a store path.
    pub fn store_path(request_path: &str) -> VfsResult<String> {
        let path = normalize_path(request_path.trim_start_matches('/'));
        if path == ".." || path.starts_with("../") {
            return Err(VfsError::InvalidPath {
                path: request_path.to_string(),
                reason: "request path escapes the served root".to_string(),
            });
        }
        Ok(path)
    }

    /// Resolve a request path.
    pub fn open(&self, request_path: &str) -> VfsResult<ServedFile> {
        let path = Self::store_path(request_path)?;
        let metadata = self.tree.stat(&path)?;
        if metadata.is_dir() {
            return Ok(ServedFile {
                path,
                metadata,
                content_type: None,
                handle: None,
            });
        }

        let handle = self.tree.open(&path)?;
        Ok(ServedFile {
            content_type: Some(content_type_for(&path)),
            path,
            metadata,
            handle: Some(handle),
        })
    }

    /// List a directory for index pages.
    pub fn read_dir(&self, request_path: &str) -> VfsResult<Vec<DirEntry>> {
        self.tree.read_dir(&Self::store_path(request_path)?)
    }
}

/// Content type for a path, from its extension.
pub fn content_type_for(path: &str) -> &'static str {
    let ext = match path.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.contains('/') => ext.to_ascii_lowercase(),
        _ => return "application/octet-stream",
    };

    match ext.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        "md" => "text/markdown; charset=utf-8",
        "xml" => "text/xml; charset=utf-8",
        "csv" => "text/csv; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "wasm" => "application/wasm",
        "pdf" => "application/pdf",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}
