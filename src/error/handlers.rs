//! Standardized error categorization for transport and validation failures

use crate::error::{RegistryError, Result};

/// Network error categorization and handling
pub struct NetworkErrorHandler;

impl NetworkErrorHandler {
    /// Categorize and format network errors with helpful context
    pub fn handle_network_error(error: &reqwest::Error, context: &str) -> RegistryError {
        if error.is_timeout() {
            RegistryError::Transport(format!("{} timed out: {}", context, error))
        } else if error.is_connect() {
            RegistryError::Transport(format!("Connection error during {}: {}", context, error))
        } else if error.to_string().contains("dns") {
            RegistryError::Transport(format!("DNS resolution error for {}: {}", context, error))
        } else if error.to_string().contains("certificate") {
            RegistryError::Transport(format!(
                "TLS certificate error during {}: {}",
                context, error
            ))
        } else if error.is_decode() || error.is_body() {
            RegistryError::Transport(format!("Failed to read {} response: {}", context, error))
        } else {
            RegistryError::Transport(format!("{} network error: {}", context, error))
        }
    }
}

/// Validation error utilities
pub struct ValidationErrorHandler;

impl ValidationErrorHandler {
    /// Server must be a bare `host[:port]`, no path or credentials
    pub fn validate_server(server: &str) -> Result<()> {
        if server.is_empty() {
            return Err(RegistryError::Validation(
                "Registry server cannot be empty".to_string(),
            ));
        }

        if server.contains('/') || server.contains('@') || server.contains(char::is_whitespace) {
            return Err(RegistryError::Validation(format!(
                "Registry server must be host[:port], got: {}",
                server
            )));
        }

        Ok(())
    }

    /// Standard numeric range validation
    pub fn validate_timeout(timeout: u64) -> Result<()> {
        if timeout == 0 {
            return Err(RegistryError::Validation(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        if timeout > 3600 {
            return Err(RegistryError::Validation(
                "Timeout cannot exceed 1 hour (3600 seconds)".to_string(),
            ));
        }

        Ok(())
    }

    pub fn validate_image_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(RegistryError::Validation(
                "Image name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_server() {
        assert!(ValidationErrorHandler::validate_server("localhost:5000").is_ok());
        assert!(ValidationErrorHandler::validate_server("registry.internal").is_ok());
        assert!(ValidationErrorHandler::validate_server("").is_err());
        assert!(ValidationErrorHandler::validate_server("host:5000/v2").is_err());
        assert!(ValidationErrorHandler::validate_server("user@host").is_err());
    }

    #[test]
    fn test_validate_timeout_bounds() {
        assert!(ValidationErrorHandler::validate_timeout(0).is_err());
        assert!(ValidationErrorHandler::validate_timeout(10).is_ok());
        assert!(ValidationErrorHandler::validate_timeout(3601).is_err());
    }
}
