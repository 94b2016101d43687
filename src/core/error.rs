//! Error types for the bridge

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A caller-supplied marshaler rejected its value
    #[error("Marshaling failed for '{key}': {message}")]
    Marshal { key: String, message: String },

    /// An encoded tree could not be rendered as text
    #[error("Encode failed for '{key}': {source}")]
    EncodeFailed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Rendered text was not valid UTF-8
    #[error("Invalid UTF-8 in encoded text: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a marshaling error for the given field key
    pub fn marshal(key: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::Marshal {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an encode failure for the given field key
    pub fn encode_failed(key: impl Into<String>, source: serde_json::Error) -> Self {
        LoggerError::EncodeFailed {
            key: key.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::marshal("user", "missing id");
        assert!(matches!(err, LoggerError::Marshal { .. }));

        let err = LoggerError::config("BridgeConfig", "empty root realm");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::marshal("user", "missing id");
        assert_eq!(err.to_string(), "Marshaling failed for 'user': missing id");

        let err = LoggerError::config("BridgeConfig", "empty root realm");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for BridgeConfig: empty root realm"
        );
    }

    #[test]
    fn test_encode_failed_keeps_source() {
        use std::error::Error;

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = LoggerError::encode_failed("payload", source);

        assert!(err.to_string().starts_with("Encode failed for 'payload'"));
        assert!(err.source().is_some());
    }
}
