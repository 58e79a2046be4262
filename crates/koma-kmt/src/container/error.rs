//! Error types for building, parsing and restoring `.kmt` containers

use crate::codec::{DecodeError, EncodeError};
use crate::entry::EntryKind;
use crate::vfs::VfsError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when building, parsing or restoring a container
#[derive(Error, Debug)]
pub enum KmtError {
    /// Entry list could not be encoded
    #[error("Encoding failed: {0}")]
    Encode(#[from] EncodeError),

    /// Payload could not be decoded into entries
    #[error("Decoding failed: {0}")]
    Decode(#[from] DecodeError),

    /// `format` field missing or not `"kmt"`
    #[error("Unsupported format: expected \"kmt\", got {0:?}")]
    UnsupportedFormat(String),

    /// `version` field missing, malformed or of an unsupported major
    #[error("Unsupported version: {0:?}")]
    UnsupportedVersion(String),

    /// Compression mode this build cannot handle
    #[error("Unsupported compression: {0:?}")]
    UnsupportedCompression(String),

    /// Checksum algorithm this build cannot verify
    #[error("Unsupported checksum algorithm: {0:?}")]
    UnsupportedChecksum(String),

    /// Payload is corrupt
    #[error("Integrity check failed: {0}")]
    Integrity(#[from] IntegrityError),

    /// Entries cannot be replayed as a tree
    #[error("Path conflict: {0}")]
    PathConflict(#[from] PathConflict),

    /// Header stats disagree with the decoded payload
    #[error("Stats mismatch for {field}: header says {declared}, payload has {actual}")]
    StatsMismatch {
        /// Stats field name
        field: &'static str,
        /// Value in the header
        declared: u64,
        /// Value computed from the payload
        actual: u64,
    },

    /// Document is not valid JSON or lacks required fields
    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// Target filesystem rejected a write
    #[error("VFS error: {0}")]
    Vfs(#[from] VfsError),

    /// Target filesystem rejected a write after earlier entries were written
    #[error("Restore stopped after {applied} entries: {source}")]
    PartialRestore {
        /// Entries already written to the target, in canonical order
        applied: usize,
        /// Error from the failing write
        #[source]
        source: VfsError,
    },

    /// Reading or writing a container file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Payload corruption detected during restore
#[derive(Error, Debug)]
pub enum IntegrityError {
    /// Digest of the decoded payload differs from the header
    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Digest recorded in the header
        expected: String,
        /// Digest of the payload
        actual: String,
    },

    /// `data` is not valid base64
    #[error("data is not valid base64: {0}")]
    MalformedData(#[source] base64::DecodeError),
}

/// Reasons a snapshot cannot be replayed as a tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathConflict {
    /// The same path is claimed as a directory and as a file
    #[error("{path} is both a {existing} and a {incoming}")]
    KindMismatch {
        /// Contested path
        path: String,
        /// Kind already present
        existing: EntryKind,
        /// Kind of the entry being replayed
        incoming: EntryKind,
    },

    /// A file path appears more than once
    #[error("file {path} appears more than once")]
    DuplicateFile {
        /// Contested path
        path: String,
    },

    /// An entry's parent directory is not part of the snapshot
    #[error("parent {parent} of {path} is missing")]
    MissingParent {
        /// Entry path
        path: String,
        /// Missing parent path
        parent: String,
    },
}

impl PathConflict {
    /// The path the conflict is about
    pub fn path(&self) -> &str {
        match self {
            Self::KindMismatch { path, .. }
            | Self::DuplicateFile { path }
            | Self::MissingParent { path, .. } => path,
        }
    }
}

/// Type alias for container operation results
pub type KmtResult<T> = std::result::Result<T, KmtError>;
