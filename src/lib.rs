//! flexfs - one read-only interface over local directories and embedded bundles
//!
//! # Architecture
//!
//! ```text
//! flexfs-config/  - Pure configuration data (store source, logging)
//! flexfs-vfs/     - FileTree backends, walker, VirtualFileSystem facade
//! flexfs-cli/     - `flexfs` command line front end
//! ```
//!
//! # Quick Start
//!
//! ```
//! use flexfs::VirtualFileSystem;
//!
//! let vfs = VirtualFileSystem::from_directory(".");
//! let manifest = vfs.find(".", r"^Cargo\.toml$").unwrap();
//! assert_eq!(manifest.as_deref(), Some("Cargo.toml"));
//! ```

pub use flexfs_config as config;
pub use flexfs_vfs::*;

use flexfs_config::{SourceConfig, SourceKind};

/// Build a file system from configuration.
///
/// Directory sources are rooted at `source.root`; embedded sources use
/// `bundle`, which the caller compiles in with [`embed_bundle!`].
pub fn from_config(source: &SourceConfig, bundle: Bundle) -> VirtualFileSystem {
    match source.kind {
        SourceKind::Directory => VirtualFileSystem::from_directory(&source.root),
        SourceKind::Embedded => VirtualFileSystem::from_embedded(bundle),
    }
}
