//! # Service Error Types

use thiserror::Error;

/// Result type alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors a [`crate::ServiceHandle`] can report.
///
/// The engine itself cannot fail; the only failure is talking to a service
/// task that has already stopped.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service task is gone (shut down, or every handle dropped).
    #[error("Calculation service channel closed: {0}")]
    ChannelClosed(String),

    /// The service configuration is unusable.
    #[error("Invalid service configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ServiceError::ChannelClosed("command channel".into());
        assert_eq!(
            err.to_string(),
            "Calculation service channel closed: command channel"
        );
    }
}
