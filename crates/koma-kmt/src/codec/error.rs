//! Entry codec error types

use crate::path::PathError;
use thiserror::Error;

/// Errors raised while encoding an entry list
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Path is not a canonical absolute path
    #[error("invalid entry path: {0}")]
    InvalidPath(#[from] PathError),

    /// Two entries share a path
    #[error("duplicate entry path: {0}")]
    DuplicatePath(String),

    /// JSON serialization failed
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while decoding a payload back into entries
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Payload is not valid standard base64
    #[error("malformed base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decoded bytes are not UTF-8
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Text does not match the entry schema
    #[error("entry schema mismatch: {0}")]
    Schema(#[from] serde_json::Error),

    /// Entry path is not canonical
    #[error("invalid path in entry: {0}")]
    InvalidPath(#[from] PathError),

    /// Directory entry carrying `content` or `size`
    #[error("directory entry {path} has file fields")]
    UnexpectedContent {
        /// Entry path
        path: String,
    },

    /// File entry without `content`
    #[error("file entry {path} has no content")]
    MissingContent {
        /// Entry path
        path: String,
    },

    /// File entry without `size`
    #[error("file entry {path} has no size")]
    MissingSize {
        /// Entry path
        path: String,
    },

    /// Declared size differs from the content length
    #[error("file entry {path} declares size {declared} but content length is {actual}")]
    SizeMismatch {
        /// Entry path
        path: String,
        /// `size` field value
        declared: u64,
        /// Length of `content`
        actual: u64,
    },
}

/// Result type for encoding operations
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Result type for decoding operations
pub type DecodeResult<T> = Result<T, DecodeError>;
