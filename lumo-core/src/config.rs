//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/lumo/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/lumo/` (~/.config/lumo/)
//! - State/Logs: `$XDG_STATE_HOME/lumo/` (~/.local/state/lumo/)

use crate::analytics::RestPreferences;
use crate::error::{Error, Result};
use crate::types::TimeRange;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name of the rolling log inside [`Config::state_dir`].
pub const LOG_FILE_NAME: &str = "lumo.log";

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Rest reminder thresholds
    #[serde(default)]
    pub rest: RestPreferences,

    /// Analytics configuration
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analytics configuration
#[derive(Debug, Deserialize)]
pub struct AnalyticsConfig {
    /// Time range used for cost and efficiency figures when none is requested
    #[serde(default = "default_range")]
    pub default_range: TimeRange,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_range: default_range(),
        }
    }
}

fn default_range() -> TimeRange {
    TimeRange::Week
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Rest preferences to use for computations.
    ///
    /// Zero thresholds fall back to the defaults rather than failing the
    /// whole report.
    pub fn rest_preferences(&self) -> RestPreferences {
        match self.rest.validate() {
            Ok(()) => self.rest,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring invalid rest preferences");
                RestPreferences::default()
            }
        }
    }

    /// Persist updated rest preferences into the config file at `path`.
    ///
    /// Other sections of an existing file are preserved.
    pub fn save_rest_preferences(path: &Path, prefs: &RestPreferences) -> Result<()> {
        prefs.validate()?;

        let mut table = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            content
                .parse::<toml::Table>()
                .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?
        } else {
            toml::Table::new()
        };

        let rest = toml::Value::try_from(prefs)
            .map_err(|e| Error::Config(format!("failed to encode rest preferences: {}", e)))?;
        table.insert("rest".to_string(), rest);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, table.to_string())?;

        tracing::debug!(
            path = %path.display(),
            heads_up_minutes = prefs.heads_up_minutes,
            break_minutes = prefs.break_minutes,
            "Saved rest preferences"
        );
        Ok(())
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/lumo/config.toml` (~/.config/lumo/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("lumo").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/lumo/` (~/.local/state/lumo/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("lumo")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/lumo/lumo.log` (~/.local/state/lumo/lumo.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join(LOG_FILE_NAME)
    }
}
