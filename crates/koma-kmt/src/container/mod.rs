//! `.kmt` container documents
//!
//! A container is a JSON document wrapping an encoded entry list:
//!
//! ```json
//! {
//!   "format": "kmt",
//!   "version": "1.0",
//!   "created": "2024-01-01T00:00:00.000Z",
//!   "label": "basic-vfs",
//!   "compression": "none",
//!   "checksum": { "uncompressed": "<sha256 hex>", "algorithm": "sha256" },
//!   "stats": { "files": 0, "directories": 2, "size": 222 },
//!   "data": "<base64>"
//! }
//! ```
//!
//! `checksum` and `stats` describe the canonical JSON text before
//! compression. Parsing only validates the header; `data` stays an opaque
//! string until [`KmtContainer::restore`] decodes and verifies it.
//!
//! # Example
//!
//! ```rust
//! use koma_kmt::container::{KmtBuilder, KmtContainer, RestoreOptions};
//! use koma_kmt::vfs::Vfs;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let container = KmtBuilder::new("notes")
//!     .directory("/home")
//!     .file("/home/todo.txt", "buy milk")
//!     .build()?;
//!
//! let document = container.to_json_pretty()?;
//! let parsed = KmtContainer::parse(document.as_bytes())?;
//! let vfs = parsed.restore(&RestoreOptions::default())?;
//! assert_eq!(vfs.read_file("/home/todo.txt")?, "buy milk");
//! # Ok(())
//! # }
//! ```

mod builder;
mod checksum;
mod compression;
mod error;
mod restore;
mod version;

pub use builder::KmtBuilder;
pub use checksum::{Checksum, ChecksumAlgorithm};
pub use compression::CompressionMode;
pub use error::{IntegrityError, KmtError, KmtResult, PathConflict};
pub use restore::{AncestorPolicy, RestoreOptions, RestoreReport, StatsPolicy};
pub use version::{FormatVersion, MalformedVersion};

use crate::codec::{self, EncodeError, EncodedEntries, ascii};
use crate::entry::{Timestamp, VfsEntry};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Value of the `format` field
pub const FORMAT_ID: &str = "kmt";

/// Conventional file extension, without the dot
pub const FILE_EXTENSION: &str = "kmt";

/// The `stats` object of a container header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    /// Number of file entries
    pub files: u64,
    /// Number of directory entries
    pub directories: u64,
    /// Byte length of the canonical JSON text
    pub size: u64,
}

impl Stats {
    /// Stats of an encoded entry list
    pub fn of(encoded: &EncodedEntries) -> Self {
        Self {
            files: encoded.file_count(),
            directories: encoded.directory_count(),
            size: encoded.text_bytes().len() as u64,
        }
    }

    /// Stats of decoded entries and the text they came from
    pub fn of_entries(entries: &[VfsEntry], text_len: usize) -> Self {
        let directories = entries.iter().filter(|e| e.is_directory()).count() as u64;
        Self {
            files: entries.len() as u64 - directories,
            directories,
            size: text_len as u64,
        }
    }
}

/// A `.kmt` backup container
///
/// Immutable once built or parsed. Restoring never changes it. Deserializing
/// with serde applies the same format and version checks as [`Self::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawContainer")]
pub struct KmtContainer {
    format: String,
    version: FormatVersion,
    created: Timestamp,
    label: String,
    compression: CompressionMode,
    checksum: Checksum,
    stats: Stats,
    data: String,
}

/// Document fields before the header is validated
#[derive(Deserialize)]
struct RawContainer {
    format: String,
    version: FormatVersion,
    created: Timestamp,
    label: String,
    compression: CompressionMode,
    checksum: Checksum,
    stats: Stats,
    data: String,
}

impl TryFrom<RawContainer> for KmtContainer {
    type Error = KmtError;

    fn try_from(raw: RawContainer) -> Result<Self, Self::Error> {
        if raw.format != FORMAT_ID {
            return Err(KmtError::UnsupportedFormat(raw.format));
        }
        if !raw.version.is_supported() {
            return Err(KmtError::UnsupportedVersion(raw.version.to_string()));
        }

        Ok(Self {
            format: raw.format,
            version: raw.version,
            created: raw.created,
            label: raw.label,
            compression: raw.compression,
            checksum: raw.checksum,
            stats: raw.stats,
            data: raw.data,
        })
    }
}

impl KmtContainer {
    /// Build a container stamped with the current time
    pub fn build(
        entries: Vec<VfsEntry>,
        label: impl Into<String>,
        compression: CompressionMode,
    ) -> KmtResult<Self> {
        Self::build_at(entries, label, compression, Timestamp::now())
    }

    /// Build a container with an explicit creation timestamp
    ///
    /// The result depends only on the arguments, so equal inputs give
    /// byte-identical documents.
    pub fn build_at(
        entries: Vec<VfsEntry>,
        label: impl Into<String>,
        compression: CompressionMode,
        created: Timestamp,
    ) -> KmtResult<Self> {
        compression.ensure_supported()?;

        let encoded = codec::encode(entries)?;
        let stats = Stats::of(&encoded);
        let checksum = Checksum::compute(ChecksumAlgorithm::default(), encoded.text_bytes());
        let data = codec::encode_payload(&compression.compress(encoded.text_bytes())?);

        let label = label.into();
        debug!(
            "Built container '{}': {} files, {} directories, {} bytes",
            label, stats.files, stats.directories, stats.size
        );

        Ok(Self {
            format: FORMAT_ID.to_string(),
            version: FormatVersion::CURRENT,
            created,
            label,
            compression,
            checksum,
            stats,
            data,
        })
    }

    /// Parse a serialized document
    ///
    /// `format` and `version` are checked on the raw JSON before any other
    /// field is interpreted, and `data` is not decoded.
    pub fn parse(document: &[u8]) -> KmtResult<Self> {
        let value: Value = serde_json::from_slice(document)?;
        check_header(&value)?;

        let container: Self = serde_json::from_value(value)?;
        debug!(
            "Parsed container '{}' version {} ({} bytes of data)",
            container.label,
            container.version,
            container.data.len()
        );
        Ok(container)
    }

    /// Compact single-line JSON document
    pub fn to_json(&self) -> KmtResult<String> {
        serialized(ascii::to_compact_string(self))
    }

    /// Two-space indented JSON document, as written to `.kmt` files
    pub fn to_json_pretty(&self) -> KmtResult<String> {
        serialized(ascii::to_pretty_string(self))
    }

    /// Header overview that does not touch `data`
    pub fn summary(&self) -> Summary {
        Summary {
            label: self.label.clone(),
            version: self.version,
            created: self.created.clone(),
            compression: self.compression.clone(),
            checksum: self.checksum.clone(),
            stats: self.stats,
            data_length: self.data.len(),
        }
    }

    /// Format identifier (always `"kmt"`)
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Format version
    pub const fn version(&self) -> FormatVersion {
        self.version
    }

    /// Snapshot timestamp
    pub const fn created(&self) -> &Timestamp {
        &self.created
    }

    /// Descriptive label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Payload compression mode
    pub const fn compression(&self) -> &CompressionMode {
        &self.compression
    }

    /// Checksum of the uncompressed payload
    pub const fn checksum(&self) -> &Checksum {
        &self.checksum
    }

    /// Entry counts and payload size
    pub const fn stats(&self) -> Stats {
        self.stats
    }

    /// Base64 payload, undecoded
    pub fn data(&self) -> &str {
        &self.data
    }
}

impl FromStr for KmtContainer {
    type Err = KmtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.as_bytes())
    }
}

fn check_header(value: &Value) -> KmtResult<()> {
    match value.get("format").and_then(Value::as_str) {
        Some(FORMAT_ID) => {}
        _ => return Err(KmtError::UnsupportedFormat(describe(value.get("format")))),
    }

    let version = value
        .get("version")
        .and_then(Value::as_str)
        .and_then(|text| text.parse::<FormatVersion>().ok());
    match version {
        Some(version) if version.is_supported() => {}
        _ => return Err(KmtError::UnsupportedVersion(describe(value.get("version")))),
    }

    if let Some(algorithm) = value.pointer("/checksum/algorithm") {
        let known = algorithm
            .as_str()
            .and_then(ChecksumAlgorithm::from_name)
            .is_some();
        if !known {
            return Err(KmtError::UnsupportedChecksum(describe(Some(algorithm))));
        }
    }

    Ok(())
}

fn serialized(result: serde_json::Result<String>) -> KmtResult<String> {
    result.map_err(|err| KmtError::Encode(EncodeError::Json(err)))
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None => "<missing>".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Header overview of a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Descriptive label
    pub label: String,
    /// Format version
    pub version: FormatVersion,
    /// Snapshot timestamp
    pub created: Timestamp,
    /// Payload compression mode
    pub compression: CompressionMode,
    /// Payload checksum
    pub checksum: Checksum,
    /// Entry counts and payload size
    pub stats: Stats,
    /// Length of the base64 `data` string
    pub data_length: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Label:       {}", self.label)?;
        writeln!(f, "Version:     {}", self.version)?;
        writeln!(f, "Created:     {}", self.created)?;
        writeln!(f, "Compression: {}", self.compression)?;
        writeln!(
            f,
            "Checksum:    {} {}",
            self.checksum.algorithm, self.checksum.uncompressed
        )?;
        writeln!(f, "Directories: {}", self.stats.directories)?;
        writeln!(f, "Files:       {}", self.stats.files)?;
        writeln!(f, "Size:        {} bytes", self.stats.size)?;
        write!(f, "Data:        {} base64 chars", self.data_length)
    }
}
