//! Payload checksum
//!
//! The header records a lowercase hex SHA-256 digest of the uncompressed
//! canonical JSON bytes. Documents may omit `algorithm`; it then defaults to
//! SHA-256.

use super::error::IntegrityError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Digest algorithm named in the `checksum.algorithm` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumAlgorithm {
    /// SHA-256, hex encoded
    #[default]
    Sha256,
}

impl ChecksumAlgorithm {
    /// Name used in documents
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }

    /// Look up an algorithm by its document name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sha256" => Some(Self::Sha256),
            _ => None,
        }
    }

    /// Hex digest of `bytes`
    pub fn digest(self, bytes: &[u8]) -> String {
        match self {
            Self::Sha256 => hex::encode(Sha256::digest(bytes)),
        }
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `checksum` object of a container header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksum {
    /// Hex digest of the uncompressed canonical JSON bytes
    pub uncompressed: String,
    /// Digest algorithm
    #[serde(default)]
    pub algorithm: ChecksumAlgorithm,
}

impl Checksum {
    /// Compute the checksum of uncompressed payload bytes
    pub fn compute(algorithm: ChecksumAlgorithm, bytes: &[u8]) -> Self {
        Self {
            uncompressed: algorithm.digest(bytes),
            algorithm,
        }
    }

    /// Check `bytes` against the recorded digest
    ///
    /// Hex case is ignored.
    pub fn verify(&self, bytes: &[u8]) -> Result<(), IntegrityError> {
        let actual = self.algorithm.digest(bytes);
        if actual.eq_ignore_ascii_case(&self.uncompressed) {
            Ok(())
        } else {
            Err(IntegrityError::ChecksumMismatch {
                expected: self.uncompressed.clone(),
                actual,
            })
        }
    }
}
