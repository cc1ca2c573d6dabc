//! 测试辅助工具
//!
//! The same fixture tree, once on disk and once as an embedded bundle.

use flexfs::{EmbeddedFileSystem, VirtualFileSystem};
use tempfile::TempDir;

/// Files of the fixture tree
pub const FIXTURE: &[(&str, &[u8])] = &[
    ("a/b.txt", b"bee"),
    ("a/c.log", b"sea"),
    ("a/sub/d.txt", b"dee"),
    ("assets/index.html", b"<h1>index</h1>"),
    ("assets/css/site.css", b"body { margin: 0 }"),
    ("readme.md", b"# fixture"),
];

/// A named backend over the fixture tree.
pub struct Backend {
    pub name: &'static str,
    pub vfs: VirtualFileSystem,
    /// Keeps the on-disk copy alive
    #[allow(unused)]
    dir: Option<TempDir>,
}

/// The fixture on disk under a fresh temporary directory
pub fn native() -> Backend {
    let dir = TempDir::new().expect("create temp dir");
    for (path, content) in FIXTURE {
        let target = dir.path().join(path);
        std::fs::create_dir_all(target.parent().expect("fixture file has a parent"))
            .expect("create fixture dirs");
        std::fs::write(&target, content).expect("write fixture file");
    }
    Backend {
        name: "native",
        vfs: VirtualFileSystem::from_directory(dir.path()),
        dir: Some(dir),
    }
}

/// The fixture as an embedded bundle
pub fn embedded() -> Backend {
    Backend {
        name: "embedded",
        vfs: VirtualFileSystem::new(EmbeddedFileSystem::new(FIXTURE)),
        dir: None,
    }
}

/// Both backends
pub fn backends() -> Vec<Backend> {
    vec![native(), embedded()]
}
