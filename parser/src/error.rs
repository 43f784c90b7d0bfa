//! Error types for configuration loading and reply decoding.
//!
//! Parsing reply text never fails; these errors only cover the I/O and
//! serialization around it.

use thiserror::Error;

/// Errors that can occur outside the pure parsing path.
#[derive(Debug, Error)]
pub enum FinderError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Configuration value out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// JSON document is neither an assistant message nor a conversation.
    #[error("unrecognized reply document: {0}")]
    UnrecognizedDocument(String),
}

/// Convenience alias for results with [`FinderError`].
pub type Result<T> = std::result::Result<T, FinderError>;
