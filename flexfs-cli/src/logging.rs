//! CLI 日志系统初始化
//!
//! 基于 `tracing-subscriber`，日志写到 stderr，stdout 只留给命令输出。

use crate::config::tracing_level;
use flexfs_config::{LogConfig, LogFormat};
use std::io;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

/// Log target used by the CLI
pub const TARGET: &str = "flexfs::cli";

/// 使用日志配置初始化日志系统
pub fn init(log_config: &LogConfig) -> Result<(), String> {
    let level = tracing_level(log_config.level);
    let targets = Targets::new()
        .with_default(level)
        .with_target(TARGET, level);

    let stderr_layer = create_format_layer(log_config.format, io::stderr).with_filter(targets.clone());

    // If file specified, output to both stderr and file
    if let Some(path) = &log_config.file {
        let file_handle = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| format!("cannot open log file '{}': {}", path.display(), e))?;

        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file_handle))
            .with_filter(targets);

        tracing_subscriber::registry()
            .with(stderr_layer)
            .with(file_layer)
            .try_init()
            .map_err(|e| e.to_string())
    } else {
        tracing_subscriber::registry()
            .with(stderr_layer)
            .try_init()
            .map_err(|e| e.to_string())
    }
}

/// Create formatter layer based on format
fn create_format_layer<W, F>(format: LogFormat, make_writer: F) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: io::Write + Send + Sync + 'static,
    F: Fn() -> W + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_timer(fmt::time::time())
            .with_writer(make_writer)
            .boxed(),
    }
}
