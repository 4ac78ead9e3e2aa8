//! Error types for Newsforge.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Newsforge workspace.
///
/// Variants stay serializable so that they can cross process or UI boundaries
/// unchanged.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum NewsforgeError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend HTTP call failed or returned a non-success status
    #[error("HTTP error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Http {
        status: Option<u16>,
        message: String,
    },

    /// Caller supplied input that cannot be processed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The local editing engine could not apply an instruction
    #[error("Editing error: {0}")]
    Editing(String),

    /// Template rendering error
    #[error("Template error: {0}")]
    Template(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl NewsforgeError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Http error
    pub fn http(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates an Editing error
    pub fn editing(message: impl Into<String>) -> Self {
        Self::Editing(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is an HTTP error
    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    /// Check if this error came from the local editing engine
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for NewsforgeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for NewsforgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for NewsforgeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for NewsforgeError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<minijinja::Error> for NewsforgeError {
    fn from(err: minijinja::Error) -> Self {
        Self::Template(err.to_string())
    }
}

/// A type alias for `Result<T, NewsforgeError>`.
pub type Result<T> = std::result::Result<T, NewsforgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display_includes_status() {
        let err = NewsforgeError::http(Some(502), "bad gateway");
        assert_eq!(err.to_string(), "HTTP error (502): bad gateway");

        let err = NewsforgeError::http(None, "connection refused");
        assert_eq!(err.to_string(), "HTTP error: connection refused");
        assert!(err.is_http());
    }

    #[test]
    fn test_json_error_converts_to_serialization() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: NewsforgeError = parse_err.into();
        assert!(err.is_serialization());
    }
}
