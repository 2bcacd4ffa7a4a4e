//! # App Error Type
//!
//! Everything that can stop the terminal front end.
//!
//! ```text
//! config file ──► Io / ConfigParse / InvalidConfig / ConfigNotFound ──┐
//! service     ──► Service(ServiceError) / Task ───────────────────────┼──► exit 1
//! stdin line  ──► UnknownCommand (printed, loop continues) ───────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;
use tipsplit_service::ServiceError;

/// Result type alias for app operations.
pub type AppResult<T> = Result<T, AppError>;

/// Terminal front-end errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading or writing a file or the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`crate::config::AppConfig`].
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A config file named on the command line does not exist.
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Config values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A result could not be encoded as JSON.
    #[error("Failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),

    /// The calculation service failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The printer or service task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// A stdin line is not a known command.
    #[error("Unknown command: '{0}' (type 'help')")]
    UnknownCommand(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AppError::UnknownCommand("tipp 10".into());
        assert_eq!(err.to_string(), "Unknown command: 'tipp 10' (type 'help')");

        let err = AppError::ConfigNotFound(PathBuf::from("/nope/tipsplit.toml"));
        assert_eq!(err.to_string(), "Config file not found: /nope/tipsplit.toml");
    }

    #[test]
    fn test_service_error_is_transparent() {
        let err: AppError = ServiceError::ChannelClosed("command channel".into()).into();
        assert_eq!(
            err.to_string(),
            "Calculation service channel closed: command channel"
        );
    }
}
