//! Error types and handlers for registry operations

pub mod handlers;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// DNS, TCP, TLS or timeout failure before a response was received
    #[error("Transport error: {0}")]
    Transport(String),
    /// Response body did not have the expected JSON shape
    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { endpoint: String, message: String },
    /// Registry answered with a status the operation does not accept
    #[error("{operation} failed (status {status})")]
    OperationFailed { operation: String, status: u16 },
    /// Invalid configuration or user input
    #[error("Validation error: {0}")]
    Validation(String),
    /// Console IO errors
    #[error("IO error: {0}")]
    Io(String),
}

impl RegistryError {
    pub fn malformed(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::MalformedResponse {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Whether the registry could not be reached at all
    pub fn is_transport(&self) -> bool {
        matches!(self, RegistryError::Transport(_))
    }
}

impl From<std::io::Error> for RegistryError {
    fn from(err: std::io::Error) -> Self {
        RegistryError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        handlers::NetworkErrorHandler::handle_network_error(&err, "request")
    }
}

impl From<url::ParseError> for RegistryError {
    fn from(err: url::ParseError) -> Self {
        RegistryError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_failed_display_carries_status() {
        let err = RegistryError::OperationFailed {
            operation: "Delete manifest".to_string(),
            status: 405,
        };
        assert_eq!(err.to_string(), "Delete manifest failed (status 405)");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_malformed_display() {
        let err = RegistryError::malformed("_catalog", "missing key `repositories`");
        assert_eq!(
            err.to_string(),
            "Malformed response from _catalog: missing key `repositories`"
        );
    }
}
