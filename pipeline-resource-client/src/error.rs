//! Error types for the CI server client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the CI server
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connection, TLS, timeout)
    #[error("request to CI server failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("CI server returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The server answered successfully but the body was unusable
    #[error("unexpected response from CI server: {0}")]
    InvalidResponse(String),

    /// The addressed pipeline does not exist
    #[error("{0}")]
    NotFound(String),

    /// The configured target URL cannot address the API
    #[error("invalid target: {0}")]
    InvalidTarget(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// True for [`ClientError::NotFound`] and any 404 response
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Api { status: 404, .. })
    }

    /// True for 4xx responses
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if (400..500).contains(status))
    }

    /// True for 5xx responses
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(ClientError::NotFound("Pipeline not found: main/p".into()).is_not_found());
        assert!(ClientError::api_error(404, "gone").is_not_found());
        assert!(!ClientError::api_error(500, "boom").is_not_found());
    }

    #[test]
    fn test_status_classes() {
        assert!(ClientError::api_error(403, "forbidden").is_client_error());
        assert!(!ClientError::api_error(403, "forbidden").is_server_error());
        assert!(ClientError::api_error(502, "bad gateway").is_server_error());
    }

    #[test]
    fn test_api_error_message() {
        assert_eq!(
            ClientError::api_error(500, "boom").to_string(),
            "CI server returned 500: boom"
        );
    }
}
