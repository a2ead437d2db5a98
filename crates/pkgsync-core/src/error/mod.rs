//! Error types and result aliases for pkgsync operations.
//!
//! Only fatal conditions are errors. Skip-scope failures (a rejected page,
//! a missing version list, a rejected upsert) are reported as outcomes by the
//! components that encounter them and never surface here.

use thiserror::Error;

/// Unified error type for all pkgsync operations
#[derive(Error, Debug)]
pub enum SyncError {
    // Config errors
    #[error("Failed to parse config file {path}: {message}")]
    ConfigParse { path: String, message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // Catalog errors
    #[error("Authentication with the catalog failed: {message}")]
    Authentication { message: String },

    // Transport errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Malformed response from {endpoint}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for pkgsync operations
pub type SyncResult<T> = Result<T, SyncError>;

impl SyncError {
    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create a decode error for a response body that did not match the expected shape
    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create a validation error for a configuration field
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            SyncError::ConfigValidation { .. } => {
                Some("Set the missing value in the environment or in the --config file")
            }
            SyncError::Authentication { .. } => {
                Some("Check PORT_CLIENT_ID and PORT_CLIENT_SECRET")
            }
            SyncError::Network { .. } => Some("Check your internet connection and try again"),
            SyncError::Decode { .. } => {
                Some("The upstream API returned an unexpected payload; rerun with --verbose")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_helper() {
        let err = SyncError::invalid("page_size", "must be between 1 and 100");
        assert_eq!(
            err.to_string(),
            "Configuration field 'page_size' is invalid: must be between 1 and 100"
        );
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_decode_keeps_source() {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        let err = SyncError::decode("/orgs/acme/packages", source);
        assert_eq!(err.to_string(), "Malformed response from /orgs/acme/packages");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_has_no_suggestion() {
        let err = SyncError::io(
            "read failed".to_string(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.suggestion(), None);
    }
}
