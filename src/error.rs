//! Error types and handling for the itinerary planner

use thiserror::Error;

/// Main error type for the planner
#[derive(Error, Debug)]
pub enum PlannerError {
    /// A lookup completed but returned no matches
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// An outbound call could not complete or returned a non-success status
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// A response was missing expected fields or could not be decoded
    #[error("Unexpected response shape: {message}")]
    Shape { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl PlannerError {
    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new transport error
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a new response-shape error
    pub fn shape<S: Into<String>>(message: S) -> Self {
        Self::Shape {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Whether a provider absorbs this error by switching to synthesized data
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PlannerError::NotFound { .. } | PlannerError::Transport { .. } | PlannerError::Shape { .. }
        )
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PlannerError::NotFound { .. } => {
                "No results found for this destination. Please check the spelling.".to_string()
            }
            PlannerError::Transport { .. } => {
                "Unable to connect to external services. Please check your internet connection."
                    .to_string()
            }
            PlannerError::Shape { .. } => {
                "An external service returned data in an unexpected format.".to_string()
            }
            PlannerError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            PlannerError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            PlannerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            PlannerError::General { message } => message.clone(),
        }
    }
}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PlannerError::shape(err.to_string())
        } else {
            PlannerError::transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let not_found = PlannerError::not_found("Jaipur");
        assert!(matches!(not_found, PlannerError::NotFound { .. }));

        let transport = PlannerError::transport("connection refused");
        assert!(matches!(transport, PlannerError::Transport { .. }));

        let shape = PlannerError::shape("missing `current`");
        assert!(matches!(shape, PlannerError::Shape { .. }));

        let validation = PlannerError::validation("days must be positive");
        assert!(matches!(validation, PlannerError::Validation { .. }));
    }

    #[test]
    fn test_provider_errors_are_recoverable() {
        assert!(PlannerError::not_found("x").is_recoverable());
        assert!(PlannerError::transport("x").is_recoverable());
        assert!(PlannerError::shape("x").is_recoverable());
        assert!(!PlannerError::config("x").is_recoverable());
        assert!(!PlannerError::validation("x").is_recoverable());
    }

    #[test]
    fn test_user_messages() {
        let transport = PlannerError::transport("test");
        assert!(transport.user_message().contains("Unable to connect"));

        let validation = PlannerError::validation("destination is required");
        assert!(validation.user_message().contains("destination is required"));

        let general = PlannerError::general("something odd");
        assert_eq!(general.user_message(), "something odd");
    }

    #[test]
    fn test_display_includes_message() {
        let err = PlannerError::not_found("Location not found: Atlantis, India");
        assert_eq!(
            err.to_string(),
            "Not found: Location not found: Atlantis, India"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PlannerError = io_err.into();
        assert!(matches!(err, PlannerError::Io { .. }));
    }
}
