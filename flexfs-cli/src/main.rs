//! flexfs CLI - Command line interface
//!
//! Answers existence, read and search queries against a local directory or
//! the bundle compiled into this binary.

use clap::{Parser, Subcommand};
use flexfs::{embed_bundle, Bundle, VfsError, VirtualFileSystem};
use std::io::{self, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::process;

mod config;
mod logging;
mod platform;

use crate::config::{apply_overrides, load_config, Overrides};
use crate::logging::TARGET;
use crate::platform::{print_entries, print_error, print_served};

/// The CLI's own sources, served by `--embedded`
const EMBEDDED: Bundle = embed_bundle!(
    "main.rs" => "main.rs",
    "config.rs" => "config.rs",
    "logging.rs" => "logging.rs",
    "platform/mod.rs" => "platform/mod.rs",
    "platform/cli.rs" => "platform/cli.rs",
);

/// Exit code for a query that ran fine but came back empty
const EXIT_NEGATIVE: i32 = 2;

#[derive(Parser)]
#[command(
    name = "flexfs",
    about = "Read-only queries over a directory or an embedded bundle",
    version
)]
struct Cli {
    /// Configuration file (default: ./flexfs.json when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory to query
    #[arg(long, value_name = "DIR", conflicts_with = "embedded")]
    root: Option<PathBuf>,

    /// Query the bundle compiled into this binary
    #[arg(long)]
    embedded: bool,

    /// Log level: silent, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Log format: pretty, compact, json
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether a file exists (directories do not count)
    Exists { path: String },
    /// Print a file to stdout
    Cat { path: String },
    /// First file under DIR whose name matches PATTERN
    Find { dir: String, pattern: String },
    /// Every file under DIR whose name matches PATTERN
    Lookup { dir: String, pattern: String },
    /// First file under DIR whose name contains PHRASE
    Search {
        dir: String,
        phrase: String,
        /// Skip names matching this fragment
        #[arg(long, default_value = "")]
        ignore: String,
        /// Required extension
        #[arg(long, default_value = "")]
        ext: String,
    },
    /// List the tree under DIR
    Ls {
        #[arg(default_value = ".")]
        dir: String,
    },
    /// Show what a static file handler would serve for a request path
    Resolve { url_path: String },
}

fn main() {
    let cli = Cli::parse();

    let overrides = Overrides {
        root: cli.root.clone(),
        embedded: cli.embedded,
        log_level: cli.log_level.clone(),
        log_format: cli.log_format.clone(),
    };
    let config = match load_config(cli.config.as_deref()).and_then(|c| apply_overrides(c, &overrides)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = logging::init(&config.log) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    tracing::debug!(target: TARGET, source = ?config.source, "opening file system");
    let vfs = flexfs::from_config(&config.source, EMBEDDED);

    match run(&vfs, &cli.command) {
        Ok(true) => {}
        Ok(false) => process::exit(EXIT_NEGATIVE),
        Err(e) => {
            tracing::debug!(target: TARGET, error = ?e, "command failed");
            print_error(&e);
            process::exit(1);
        }
    }
}

/// Run one command. `Ok(false)` means the query found nothing.
fn run(vfs: &VirtualFileSystem, command: &Command) -> Result<bool, VfsError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Exists { path } => {
            let found = vfs.exists(path)?;
            tracing::info!(target: TARGET, %path, found, "exists");
            writeln!(out, "{}", found).map_err(stdout_error)?;
            Ok(found)
        }
        Command::Cat { path } => {
            let mut handle = vfs.open(path)?;
            tracing::info!(target: TARGET, path = handle.path(), len = handle.metadata().len, "cat");
            io::copy(&mut handle, &mut out).map_err(stdout_error)?;
            Ok(true)
        }
        Command::Find { dir, pattern } => {
            let found = vfs.find(dir, pattern)?;
            tracing::info!(target: TARGET, %dir, %pattern, ?found, "find");
            print_optional(&mut out, found)
        }
        Command::Lookup { dir, pattern } => {
            let found = vfs.lookup(dir, pattern)?;
            tracing::info!(target: TARGET, %dir, %pattern, count = found.len(), "lookup");
            for path in &found {
                writeln!(out, "{}", path).map_err(stdout_error)?;
            }
            Ok(!found.is_empty())
        }
        Command::Search {
            dir,
            phrase,
            ignore,
            ext,
        } => {
            let found = vfs.search(dir, phrase, ignore, ext)?;
            tracing::info!(target: TARGET, %dir, %phrase, %ignore, %ext, ?found, "search");
            print_optional(&mut out, found)
        }
        Command::Ls { dir } => {
            let mut entries = Vec::new();
            vfs.tree().walk(&flexfs::normalize_path(dir), &mut |entry| {
                entries.push((entry.path.clone(), entry.kind));
                ControlFlow::Continue(())
            })?;
            tracing::info!(target: TARGET, %dir, count = entries.len(), "ls");
            print_entries(&mut out, entries.iter().map(|(p, k)| (p.as_str(), *k)))
                .map_err(stdout_error)?;
            Ok(true)
        }
        Command::Resolve { url_path } => {
            let served = vfs.serve_root().open(url_path)?;
            tracing::info!(target: TARGET, %url_path, path = served.path(), "resolve");
            print_served(&mut out, &served).map_err(stdout_error)?;
            Ok(true)
        }
    }
}

fn print_optional(out: &mut impl Write, found: Option<String>) -> Result<bool, VfsError> {
    match found {
        Some(path) => {
            writeln!(out, "{}", path).map_err(stdout_error)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn stdout_error(e: io::Error) -> VfsError {
    VfsError::Io {
        path: "<stdout>".to_string(),
        source: e,
    }
}
