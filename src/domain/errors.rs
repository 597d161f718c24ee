//! Domain error types
//!
//! This module defines the error hierarchy for Kura. Adapter errors don't
//! expose third-party HTTP or storage types; they are converted to strings at
//! the boundary.

use thiserror::Error;

/// Main Kura error type
///
/// This is the primary error type used throughout the application.
/// It wraps the adapter-specific error types and the local sink failures.
#[derive(Debug, Error)]
pub enum KuraError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// AnkiConnect-related errors
    #[error("AnkiConnect error: {0}")]
    AnkiConnect(#[from] AnkiConnectError),

    /// Vocabulary service errors
    #[error("Vocabulary service error: {0}")]
    Vocab(#[from] VocabError),

    /// CSV or SQLite sink errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl KuraError {
    /// Whether the error came from reaching a remote service rather than from
    /// the service itself or from local storage.
    pub fn is_connection(&self) -> bool {
        matches!(
            self,
            KuraError::AnkiConnect(
                AnkiConnectError::ConnectionFailed(_) | AnkiConnectError::Timeout(_)
            ) | KuraError::Vocab(VocabError::ConnectionFailed(_) | VocabError::Timeout(_))
        )
    }
}

/// AnkiConnect-specific errors
#[derive(Debug, Error)]
pub enum AnkiConnectError {
    /// Failed to reach the AnkiConnect endpoint
    #[error("Failed to connect to AnkiConnect: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Non-success HTTP status
    #[error("HTTP error: {status} - {message}")]
    HttpStatus { status: u16, message: String },

    /// The add-on answered with a populated `error` field
    #[error("Action '{action}' failed: {message}")]
    ActionFailed { action: String, message: String },

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Vocabulary service errors
#[derive(Debug, Error)]
pub enum VocabError {
    /// Failed to reach the vocabulary service
    #[error("Failed to connect to vocabulary service: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Non-success HTTP status
    #[error("HTTP error: {status} - {message}")]
    HttpStatus { status: u16, message: String },

    /// Response body is not valid JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON is valid but neither a word list nor an object holding one
    #[error("Unexpected payload shape for level {level}: {detail}")]
    UnexpectedShape { level: String, detail: String },
}

impl From<std::io::Error> for KuraError {
    fn from(err: std::io::Error) -> Self {
        KuraError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for KuraError {
    fn from(err: serde_json::Error) -> Self {
        KuraError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for KuraError {
    fn from(err: toml::de::Error) -> Self {
        KuraError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<rusqlite::Error> for KuraError {
    fn from(err: rusqlite::Error) -> Self {
        KuraError::Storage(format!("SQLite: {err}"))
    }
}

impl From<csv::Error> for KuraError {
    fn from(err: csv::Error) -> Self {
        KuraError::Storage(format!("CSV: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kura_error_display() {
        let err = KuraError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_anki_error_conversion() {
        let anki_err = AnkiConnectError::ActionFailed {
            action: "cardsInfo".to_string(),
            message: "unsupported action".to_string(),
        };
        let err: KuraError = anki_err.into();
        assert!(matches!(err, KuraError::AnkiConnect(_)));
        assert!(err.to_string().contains("cardsInfo"));
    }

    #[test]
    fn test_vocab_error_conversion() {
        let vocab_err = VocabError::UnexpectedShape {
            level: "N3".to_string(),
            detail: "number".to_string(),
        };
        let err: KuraError = vocab_err.into();
        assert!(matches!(err, KuraError::Vocab(_)));
        assert!(err.to_string().contains("N3"));
    }

    #[test]
    fn test_is_connection() {
        let err: KuraError = AnkiConnectError::ConnectionFailed("refused".to_string()).into();
        assert!(err.is_connection());

        let err: KuraError = VocabError::Timeout("30s".to_string()).into();
        assert!(err.is_connection());

        let err = KuraError::Storage("disk full".to_string());
        assert!(!err.is_connection());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: KuraError = io_err.into();
        assert!(matches!(err, KuraError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: KuraError = json_err.into();
        assert!(matches!(err, KuraError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: KuraError = toml_err.into();
        assert!(matches!(err, KuraError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_sqlite_error_conversion() {
        let err: KuraError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, KuraError::Storage(_)));
    }
}
