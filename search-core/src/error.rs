//! Error types for the search client.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown when a query is blank after trimming.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query";

/// Message shown for any failure that carries no service detail.
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search. Please try again.";

/// Errors that can occur while talking to the ranking service.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local validation error, never sent over the network
    #[error("Validation error: {0}")]
    Validation(String),

    /// Connection, timeout or other transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx response from the service
    #[error("Service error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Service { status: u16, detail: Option<String> },

    /// Response body did not match the expected schema
    #[error("Decode error: {0}")]
    Decode(String),

    /// Local I/O error (reading an upload from disk)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Text to show the user when this error ends a query.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(message) => message.clone(),
            Error::Service {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => SEARCH_FAILED_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(err.to_string())
        } else {
            Error::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_detail_is_shown_verbatim() {
        let err = Error::Service {
            status: 404,
            detail: Some("index not found".to_string()),
        };
        assert_eq!(err.user_message(), "index not found");
    }

    #[test]
    fn test_fallback_message_without_detail() {
        let err = Error::Service {
            status: 500,
            detail: None,
        };
        assert_eq!(err.user_message(), SEARCH_FAILED_MESSAGE);
        assert_eq!(
            Error::Transport("connection refused".to_string()).user_message(),
            SEARCH_FAILED_MESSAGE
        );
        assert_eq!(
            Error::Decode("missing field `results`".to_string()).user_message(),
            SEARCH_FAILED_MESSAGE
        );
    }

    #[test]
    fn test_validation_message() {
        let err = Error::Validation(EMPTY_QUERY_MESSAGE.to_string());
        assert_eq!(err.user_message(), EMPTY_QUERY_MESSAGE);
    }
}
