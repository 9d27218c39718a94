//! Error types for the adapter
//!
//! Inbound message handling never fails: malformed or unknown messages are
//! dropped. These errors only surface from configuration loading, logging
//! setup and the host transport.

use thiserror::Error;

/// Result type alias for adapter operations
pub type AdapterResult<T> = std::result::Result<T, AdapterError>;

/// Errors that can occur around the adapter
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Message could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Host transport failed to deliver a message
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// I/O errors (config files, JSON line streams)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AdapterError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            AdapterError::Configuration { message } => format!("Configuration problem: {}", message),
            AdapterError::Serialization(e) => format!("Malformed message: {}", e),
            AdapterError::Transport { message } => format!("Host frame unreachable: {}", message),
            AdapterError::Io(e) => format!("File operation failed: {}", e),
        }
    }
}

impl From<toml::de::Error> for AdapterError {
    fn from(err: toml::de::Error) -> Self {
        AdapterError::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_for_configuration() {
        let err = AdapterError::config("missing calendar url");
        assert_eq!(err.user_message(), "Configuration problem: missing calendar url");
        assert_eq!(err.to_string(), "Configuration error: missing calendar url");
    }

    #[test]
    fn test_toml_error_becomes_configuration() {
        let parse: Result<toml::Value, _> = toml::from_str("target_origin = ");
        let err: AdapterError = parse.unwrap_err().into();
        assert!(matches!(err, AdapterError::Configuration { .. }));
    }
}
