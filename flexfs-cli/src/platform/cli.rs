//! CLI 格式化输出
//!
//! 错误信息、目录列表和静态文件解析结果的终端显示。

use flexfs::{EntryKind, ServedFile, VfsError};
use std::error::Error;
use std::io::{self, Write};

/// 打印错误及其原因链
pub fn print_error(e: &VfsError) {
    eprintln!("Error: {}", e);

    let mut source = e.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}

/// Print `(path, kind)` pairs one per line, directories with a trailing `/`
pub fn print_entries<'a, I>(out: &mut impl Write, entries: I) -> io::Result<()>
where
    I: IntoIterator<Item = (&'a str, EntryKind)>,
{
    for (path, kind) in entries {
        match kind {
            EntryKind::Dir => writeln!(out, "{}/", path)?,
            EntryKind::File => writeln!(out, "{}", path)?,
        }
    }
    Ok(())
}

/// Print what a static file handler would serve for a request
pub fn print_served(out: &mut impl Write, served: &ServedFile) -> io::Result<()> {
    let metadata = served.metadata();
    if served.is_dir() {
        writeln!(out, "{}\tdirectory", served.path())
    } else {
        writeln!(
            out,
            "{}\t{}\t{} bytes",
            served.path(),
            served.content_type().unwrap_or("application/octet-stream"),
            metadata.len
        )
    }
}
