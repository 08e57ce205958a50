//! Configuration file loading with precedence handling.

use crate::feed::FeedSettings;
use crate::layout::{Breakpoint, Breakpoints, HeightParams, LayoutConfig};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value parsed but is out of range.
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Config key.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/waterfall/config.toml`.
///
/// ```toml
/// gap = 12.0
/// content_chrome_height = 72.0
/// dead_band = 0.05
/// page_size = 30
///
/// [[breakpoints]]
/// min_width = 1200
/// columns = 4
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Vertical gap between items, in pixels.
    #[serde(default)]
    pub gap: Option<f64>,

    /// Estimated height of title/author chrome under each item.
    #[serde(default)]
    pub content_chrome_height: Option<f64>,

    /// Container padding on each side, in pixels.
    #[serde(default)]
    pub horizontal_padding: Option<f64>,

    /// Relative dead band for re-measured items (0.05 = 5%).
    #[serde(default)]
    pub dead_band: Option<f64>,

    /// Items requested per page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Quiet window before a resize is applied, in milliseconds.
    #[serde(default)]
    pub resize_debounce_ms: Option<u64>,

    /// Custom breakpoint table, replaces the default one entirely.
    #[serde(default)]
    pub breakpoints: Option<Vec<Breakpoint>>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Layout engine geometry.
    pub layout: LayoutConfig,
    /// Pagination and resize tunables.
    pub feed: FeedSettings,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            feed: FeedSettings::default(),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/waterfall/waterfall.log` on Unix-like systems,
/// or the platform equivalent. Falls back to the current directory when no
/// state directory can be determined.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("waterfall").join("waterfall.log")
    } else {
        PathBuf::from("waterfall.log")
    }
}

/// Resolve default config file path.
///
/// Returns `~/.config/waterfall/config.toml` on Unix, appropriate path on
/// other platforms. Returns `None` if no config directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("waterfall").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `WATERFALL_CONFIG` environment variable
/// 3. Default path `~/.config/waterfall/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("WATERFALL_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for out-of-range values: negative
/// gaps or dead band, zero page size, or an invalid breakpoint table.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let breakpoints = match config.breakpoints {
        Some(rows) => Breakpoints::new(rows).map_err(|e| ConfigError::InvalidValue {
            field: "breakpoints",
            reason: e.to_string(),
        })?,
        None => defaults.layout.breakpoints,
    };

    let layout = LayoutConfig {
        breakpoints,
        height: HeightParams {
            gap: non_negative("gap", config.gap, defaults.layout.height.gap)?,
            content_chrome_height: non_negative(
                "content_chrome_height",
                config.content_chrome_height,
                defaults.layout.height.content_chrome_height,
            )?,
        },
        horizontal_padding: non_negative(
            "horizontal_padding",
            config.horizontal_padding,
            defaults.layout.horizontal_padding,
        )?,
        dead_band: non_negative("dead_band", config.dead_band, defaults.layout.dead_band)?,
    };

    let page_size = match config.page_size {
        Some(0) => {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                reason: "must be at least 1".to_string(),
            })
        }
        Some(n) => n,
        None => defaults.feed.page_size,
    };

    let feed = FeedSettings {
        page_size,
        resize_debounce: config
            .resize_debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.feed.resize_debounce),
    };

    Ok(ResolvedConfig {
        layout,
        feed,
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `WATERFALL_GAP`: Override item gap
/// - `WATERFALL_PAGE_SIZE`: Override page size
///
/// Unparseable or out-of-range values are logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var("WATERFALL_GAP") {
        match raw.parse::<f64>() {
            Ok(gap) if gap.is_finite() && gap >= 0.0 => config.layout.height.gap = gap,
            _ => warn!(value = %raw, "Ignoring invalid WATERFALL_GAP"),
        }
    }

    if let Ok(raw) = std::env::var("WATERFALL_PAGE_SIZE") {
        match raw.parse::<usize>() {
            Ok(size) if size > 0 => config.feed.page_size = size,
            _ => warn!(value = %raw, "Ignoring invalid WATERFALL_PAGE_SIZE"),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only flags the user actually passed are applied.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    gap_override: Option<f64>,
    page_size_override: Option<usize>,
) -> ResolvedConfig {
    if let Some(gap) = gap_override {
        config.layout.height.gap = gap.max(0.0);
    }

    if let Some(page_size) = page_size_override {
        config.feed.page_size = page_size.max(1);
    }

    config
}

fn non_negative(field: &'static str, value: Option<f64>, default: f64) -> Result<f64, ConfigError> {
    match value {
        None => Ok(default),
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Some(v) => Err(ConfigError::InvalidValue {
            field,
            reason: format!("expected a non-negative number, got {v}"),
        }),
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
