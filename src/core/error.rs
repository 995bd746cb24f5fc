// SPDX-License-Identifier: MIT

//! Typed error handling for flowdeck
//!
//! Every fallible operation in the crate returns [`FlowError`]. The reducer and the
//! store never produce one; failures originate at the codec, the remote service or
//! the filesystem and are converted to user-visible messages by the sync layer.

use thiserror::Error;

/// Top-level error type for flowdeck
#[derive(Debug, Error)]
pub enum FlowError {
    /// Text could not be decoded into a workflow document
    #[error("Format error: {0}")]
    Format(String),

    /// An operation addressed a flow id that is not in the collection
    #[error("Flow '{id}' not found")]
    NotFound { id: String },

    /// The persistence service failed to list or save
    #[error("Remote error: {message}")]
    Remote { message: String },

    /// Configuration errors (missing env vars, invalid URLs)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML serialization errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl FlowError {
    /// Create a format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a remote service error
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<url::ParseError> for FlowError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("invalid url: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FlowError::not_found("abc").to_string(),
            "Flow 'abc' not found"
        );
        assert_eq!(
            FlowError::remote("timeout").to_string(),
            "Remote error: timeout"
        );
        assert_eq!(FlowError::format("bad").to_string(), "Format error: bad");
    }

    #[test]
    fn test_url_parse_error_becomes_config() {
        let err: FlowError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, FlowError::Config(_)));
    }
}
