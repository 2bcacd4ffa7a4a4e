//! # App Configuration
//!
//! Display and service settings for the terminal front end.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line flags (highest priority, applied in lib.rs)           │
//! │     --json                                                             │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TIPSPLIT_CURRENCY_SYMBOL=€                                         │
//! │     TIPSPLIT_OUTPUT=json                                               │
//! │     TIPSPLIT_CHANNEL_CAPACITY=128                                      │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, or the platform config dir:                       │
//! │     ~/.config/tipsplit/tipsplit.toml (Linux)                           │
//! │     ~/Library/Application Support/com.tipsplit.tipsplit/... (macOS)    │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [display]
//! currency_symbol = "$"
//! output = "text"   # text | json
//!
//! [service]
//! channel_capacity = 64
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use tipsplit_service::ServiceConfig;

use crate::error::{AppError, AppResult};

/// Longest accepted currency symbol, in characters.
const MAX_SYMBOL_CHARS: usize = 4;

/// Largest accepted command channel depth.
const MAX_CHANNEL_CAPACITY: usize = 65_536;

// =============================================================================
// Output Format
// =============================================================================

/// How each result is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One human-readable line, rounded to cents.
    #[default]
    Text,
    /// One JSON object per line, exact values.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(AppError::InvalidConfig(format!(
                "Unknown output format: '{}'. Valid options: text, json",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// `[display]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Symbol printed before amounts in text output.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Result output format.
    #[serde(default)]
    pub output: OutputFormat,
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
            output: OutputFormat::default(),
        }
    }
}

/// `[service]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Depth of the calculation service's command channel.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_channel_capacity() -> usize {
    tipsplit_service::service::DEFAULT_CHANNEL_CAPACITY
}

impl Default for ServiceSettings {
    fn default() -> Self {
        ServiceSettings {
            channel_capacity: default_channel_capacity(),
        }
    }
}

// =============================================================================
// App Configuration
// =============================================================================

/// Complete app configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub service: ServiceSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file: `config_path` if given (must exist), otherwise the
    ///    platform default (optional)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) if !path.exists() => return Err(AppError::ConfigNotFound(path)),
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        let symbol_chars = self.display.currency_symbol.chars().count();
        if symbol_chars > MAX_SYMBOL_CHARS {
            return Err(AppError::InvalidConfig(format!(
                "currency_symbol must be at most {} characters, got {}",
                MAX_SYMBOL_CHARS, symbol_chars
            )));
        }

        if self.service.channel_capacity == 0 || self.service.channel_capacity > MAX_CHANNEL_CAPACITY
        {
            return Err(AppError::InvalidConfig(format!(
                "channel_capacity must be between 1 and {}",
                MAX_CHANNEL_CAPACITY
            )));
        }

        Ok(())
    }

    /// Applies `TIPSPLIT_*` overrides read through `lookup`.
    ///
    /// Unparsable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(symbol) = lookup("TIPSPLIT_CURRENCY_SYMBOL") {
            debug!(symbol = %symbol, "Overriding currency symbol from environment");
            self.display.currency_symbol = symbol;
        }

        if let Some(output) = lookup("TIPSPLIT_OUTPUT") {
            match output.parse() {
                Ok(format) => self.display.output = format,
                Err(e) => warn!(error = %e, "Ignoring TIPSPLIT_OUTPUT"),
            }
        }

        if let Some(capacity) = lookup("TIPSPLIT_CHANNEL_CAPACITY") {
            match capacity.parse::<usize>() {
                Ok(c) => self.service.channel_capacity = c,
                Err(_) => warn!(value = %capacity, "Ignoring TIPSPLIT_CHANNEL_CAPACITY"),
            }
        }
    }

    /// Returns the settings for the calculation service.
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            channel_capacity: self.service.channel_capacity,
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tipsplit", "tipsplit")
            .map(|dirs| dirs.config_dir().join("tipsplit.toml"))
    }
}
