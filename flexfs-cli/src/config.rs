//! CLI 配置
//!
//! 配置文件（JSON）加载，以及命令行参数对配置的覆盖。

use flexfs_config::{Config, LogFormat, LogLevel, SourceConfig};
use std::path::{Path, PathBuf};
use tracing::Level;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "flexfs.json";

/// Command line values that override the config file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub embedded: bool,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

/// Load the configuration.
///
/// An explicit path must exist. Without one, `flexfs.json` in the working
/// directory is used when present, otherwise the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, String> {
    match path {
        Some(path) => read_config(path),
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.is_file() {
                read_config(fallback)
            } else {
                Ok(Config::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
    let mut config: Config = serde_json::from_str(&content)
        .map_err(|e| format!("cannot parse '{}': {}", path.display(), e))?;

    // Directory roots are relative to the config file
    if config.source.root.is_relative() {
        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.source.root = base.join(&config.source.root);
        }
    }
    Ok(config)
}

/// Apply command line overrides on top of a loaded config.
pub fn apply_overrides(mut config: Config, overrides: &Overrides) -> Result<Config, String> {
    if overrides.embedded {
        config.source = SourceConfig::embedded();
    } else if let Some(root) = &overrides.root {
        config.source = SourceConfig::directory(root);
    }
    if let Some(level) = &overrides.log_level {
        config.log.level = level.parse::<LogLevel>()?;
    }
    if let Some(format) = &overrides.log_format {
        config.log.format = format.parse::<LogFormat>()?;
    }
    Ok(config)
}

/// Map the configured verbosity to a tracing level
pub fn tracing_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}
