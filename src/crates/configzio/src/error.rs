//! Error types for the Configzio client.

use thiserror::Error;

/// Result type for Configzio operations.
pub type Result<T> = std::result::Result<T, ConfigzioError>;

/// Errors that can occur when talking to Configzio.
#[derive(Debug, Error)]
pub enum ConfigzioError {
    /// Client was constructed with invalid arguments.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Server answered with a status code above 299.
    #[error("Configzio returned HTTP code: {status}")]
    RemoteError {
        /// Raw HTTP status code.
        status: u16,
    },

    /// Response body could not be decoded as JSON.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Request never produced a response (DNS, TLS, connection, timeout).
    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),
}

impl ConfigzioError {
    /// HTTP status carried by a remote error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ConfigzioError::RemoteError { status } => Some(*status),
            _ => None,
        }
    }

    /// Check if the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if this error is due to authentication.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Check if the request failed before a response arrived.
    pub fn is_transport(&self) -> bool {
        matches!(self, ConfigzioError::TransportError(_))
    }
}

impl From<serde_json::Error> for ConfigzioError {
    fn from(err: serde_json::Error) -> Self {
        ConfigzioError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_message_contains_status() {
        let err = ConfigzioError::RemoteError { status: 503 };
        assert_eq!(err.to_string(), "Configzio returned HTTP code: 503");
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn test_error_classification() {
        assert!(ConfigzioError::RemoteError { status: 404 }.is_not_found());
        assert!(ConfigzioError::RemoteError { status: 401 }.is_auth_error());
        assert!(ConfigzioError::RemoteError { status: 403 }.is_auth_error());
        assert!(!ConfigzioError::RemoteError { status: 500 }.is_auth_error());

        let config = ConfigzioError::ConfigError("bad".to_string());
        assert_eq!(config.status(), None);
        assert!(!config.is_transport());
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: ConfigzioError = err.into();
        assert!(matches!(err, ConfigzioError::ParseError(_)));
    }
}
