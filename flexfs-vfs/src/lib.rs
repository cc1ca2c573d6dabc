//! flexfs Virtual File System
//!
//! A read-only file system abstraction with two backends: a directory on the
//! local disk and a bundle compiled into the binary. Calling code goes
//! through [`VirtualFileSystem`] and does not care which one it got.
//!
//! # Usage
//! ```rust,ignore
//! use flexfs_vfs::VirtualFileSystem;
//!
//! let vfs = VirtualFileSystem::from_directory("assets");
//! if let Some(page) = vfs.search("pages", "about", "draft", "html")? {
//!     let html = vfs.read_file(&page)?;
//! }
//! ```

mod embedded;
mod error;
mod macros;
mod native;
mod path;
mod serve;
mod r#trait;
mod vfs;
mod walk;

pub use embedded::{Bundle, EmbeddedFileSystem};
pub use error::{VfsError, VfsResult};
pub use native::NativeFileSystem;
pub use path::{base_name, join_paths, normalize_path, ROOT};
pub use r#trait::{DirEntry, EntryKind, FileHandle, FileTree, Metadata, WalkEntry};
pub use serve::{content_type_for, ServeRoot, ServedFile};
pub use vfs::VirtualFileSystem;
