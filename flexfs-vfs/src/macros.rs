//! Bundle construction macro

/// Build a [`Bundle`](crate::Bundle) from files compiled into the binary.
///
/// Each entry maps a bundle path to a source file resolved like
/// `include_bytes!`, relative to the file invoking the macro.
///
/// ```ignore
/// use flexfs_vfs::{embed_bundle, VirtualFileSystem};
///
/// let vfs = VirtualFileSystem::from_embedded(embed_bundle!(
///     "index.html" => "../assets/index.html",
///     "css/site.css" => "../assets/css/site.css",
/// ));
/// ```
#[macro_export]
macro_rules! embed_bundle {
    ($($name:literal => $file:literal),* $(,)?) => {{
        const BUNDLE: $crate::Bundle = &[$(($name, include_bytes!($file) as &[u8])),*];
        BUNDLE
    }};
}
