//! Configuration loading and parsing.
//!
//! Parses `quill.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [history]
//! batch_window_ms = 500
//! max_depth = 100
//!
//! [log]
//! filter = "info"
//! ```
//!
//! Missing files and parse errors fall back to defaults. Unknown fields are
//! ignored so the file can grow without breaking older builds.

use anyhow::Result;
use core_state::{HistoryLimits, UNDO_HISTORY_MAX};
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

/// Config file name looked up in the working directory and the platform config dir.
pub const CONFIG_FILE_NAME: &str = "quill.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    #[serde(default = "HistoryConfig::default_batch_window_ms")]
    pub batch_window_ms: u64,
    #[serde(default = "HistoryConfig::default_max_depth")]
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            batch_window_ms: Self::default_batch_window_ms(),
            max_depth: Self::default_max_depth(),
        }
    }
}

impl HistoryConfig {
    const fn default_batch_window_ms() -> u64 {
        500
    }
    const fn default_max_depth() -> usize {
        UNDO_HISTORY_MAX
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "LogConfig::default_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: Self::default_filter(),
        }
    }
}

impl LogConfig {
    fn default_filter() -> String {
        "info".to_string()
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>,     // original file string (optional)
    pub source: Option<PathBuf>, // path the file was read from
    pub file: ConfigFile,        // parsed (or default) data
}

/// Best-effort config path: working directory first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("quill").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                source: Some(path),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// History limits for the editing session. A zero depth is clamped to 1.
    pub fn history_limits(&self) -> HistoryLimits {
        let raw = self.file.history.max_depth;
        let max_depth = raw.max(1);
        if max_depth != raw {
            info!(target: "config", raw, clamped = max_depth, "history_max_depth_clamped");
        }
        HistoryLimits {
            batch_window: Duration::from_millis(self.file.history.batch_window_ms),
            max_depth,
        }
    }

    pub fn log_filter(&self) -> &str {
        &self.file.log.filter
    }
}
