//! Compression modes for the container payload
//!
//! Only `"none"` is implemented. Other mode names survive parsing and
//! serialization unchanged so that a document written by a newer tool can
//! still be inspected; building or restoring with them fails.

use super::error::{KmtError, KmtResult};
use std::borrow::Cow;
use std::fmt;

/// Value of the `compression` header field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CompressionMode {
    /// Payload is the canonical JSON text itself
    #[default]
    None,
    /// Any other mode, kept verbatim
    Other(String),
}

impl CompressionMode {
    /// Name used in documents
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Other(name) => name,
        }
    }

    /// Whether this build can compress and decompress with this mode
    pub const fn is_supported(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Fail with [`KmtError::UnsupportedCompression`] unless supported
    pub fn ensure_supported(&self) -> KmtResult<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(KmtError::UnsupportedCompression(self.as_str().to_string()))
        }
    }

    /// Compress canonical text bytes for storage
    pub fn compress<'a>(&self, bytes: &'a [u8]) -> KmtResult<Cow<'a, [u8]>> {
        self.ensure_supported()?;
        Ok(Cow::Borrowed(bytes))
    }

    /// Recover canonical text bytes from stored bytes
    pub fn decompress(&self, bytes: Vec<u8>) -> KmtResult<Vec<u8>> {
        self.ensure_supported()?;
        Ok(bytes)
    }
}

impl From<String> for CompressionMode {
    fn from(value: String) -> Self {
        if value == "none" {
            Self::None
        } else {
            Self::Other(value)
        }
    }
}

impl From<&str> for CompressionMode {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<CompressionMode> for String {
    fn from(value: CompressionMode) -> Self {
        match value {
            CompressionMode::None => "none".to_string(),
            CompressionMode::Other(name) => name,
        }
    }
}

impl serde::Serialize for CompressionMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for CompressionMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

impl fmt::Display for CompressionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
