//! Errors returned by the inventory client.

use thiserror::Error;

use stockroom_core::api::FilterError;

/// Errors that can occur when talking to the inventory backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Resource or endpoint not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse a response body or encode a request.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Failed to read a local file (product image).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to build a request URL.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Report filter is not usable.
    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterError),
}

impl ClientError {
    /// The message to show a user, without the error-kind prefix for
    /// backend-reported failures.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } | Self::NotFound(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_strips_prefix() {
        let err = ClientError::Api {
            status: 400,
            message: "Not enough stock available.".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 400 - Not enough stock available.");
        assert_eq!(err.user_message(), "Not enough stock available.");
    }

    #[test]
    fn test_parse_keeps_prefix() {
        let err = ClientError::Parse("bad json".to_string());
        assert_eq!(err.user_message(), "Parse error: bad json");
    }
}
