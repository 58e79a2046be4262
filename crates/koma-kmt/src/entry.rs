//! VFS entry model shared by the codec, container and VFS layers

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of a filesystem node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Directory node
    Directory,
    /// Regular file with text content
    File,
}

impl EntryKind {
    /// Sort rank in the canonical ordering: directories before files
    pub const fn rank(self) -> u8 {
        match self {
            Self::Directory => 0,
            Self::File => 1,
        }
    }

    /// Wire name used in the `type` field
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timestamp parsing errors
#[derive(Debug, Error)]
pub enum TimestampError {
    /// Not an RFC 3339 timestamp
    #[error("malformed timestamp {text:?}: {source}")]
    Malformed {
        /// Offending text
        text: String,
        /// Parser error
        #[source]
        source: chrono::ParseError,
    },

    /// Valid timestamp without the trailing `Z`
    #[error("timestamp is not UTC ('Z' suffix required): {0:?}")]
    NotUtc(String),
}

/// ISO-8601 UTC timestamp with a trailing `Z`
///
/// The original text is kept verbatim so that decoding and re-encoding a
/// snapshot never changes its bytes, whatever fractional precision the
/// writer used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp {
    text: String,
    instant: DateTime<Utc>,
}

impl Timestamp {
    /// Current time with millisecond precision
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Format a point in time with millisecond precision
    pub fn from_datetime(instant: DateTime<Utc>) -> Self {
        let instant = instant.trunc_subsecs(3);
        Self {
            text: instant.to_rfc3339_opts(SecondsFormat::Millis, true),
            instant,
        }
    }

    /// Parse an RFC 3339 UTC timestamp, keeping its text
    pub fn parse(text: &str) -> Result<Self, TimestampError> {
        if !text.ends_with('Z') {
            return Err(TimestampError::NotUtc(text.to_string()));
        }
        let instant = DateTime::parse_from_rfc3339(text)
            .map_err(|source| TimestampError::Malformed {
                text: text.to_string(),
                source,
            })?
            .with_timezone(&Utc);

        Ok(Self {
            text: text.to_string(),
            instant,
        })
    }

    /// Timestamp text as written
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Parsed point in time
    pub const fn instant(&self) -> DateTime<Utc> {
        self.instant
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = TimestampError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timestamp> for String {
    fn from(value: Timestamp) -> Self {
        value.text
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Kind-specific payload of an entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryData {
    /// Directories carry no content
    Directory,
    /// File content, binary data as one code point per byte (U+0000..U+00FF)
    File {
        /// Raw content
        content: String,
    },
}

/// One filesystem node in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VfsEntry {
    /// Absolute path, unique within a snapshot
    pub path: String,
    /// Creation time
    pub created: Timestamp,
    /// Last modification time
    pub modified: Timestamp,
    /// Directory marker or file content
    pub data: EntryData,
}

impl VfsEntry {
    /// Directory entry with both timestamps set to `at`
    pub fn directory(path: impl Into<String>, at: &Timestamp) -> Self {
        Self::directory_with_times(path, at.clone(), at.clone())
    }

    /// Directory entry with explicit timestamps
    pub fn directory_with_times(
        path: impl Into<String>,
        created: Timestamp,
        modified: Timestamp,
    ) -> Self {
        Self {
            path: path.into(),
            created,
            modified,
            data: EntryData::Directory,
        }
    }

    /// File entry with both timestamps set to `at`
    pub fn file(path: impl Into<String>, content: impl Into<String>, at: &Timestamp) -> Self {
        Self::file_with_times(path, content, at.clone(), at.clone())
    }

    /// File entry with explicit timestamps
    pub fn file_with_times(
        path: impl Into<String>,
        content: impl Into<String>,
        created: Timestamp,
        modified: Timestamp,
    ) -> Self {
        Self {
            path: path.into(),
            created,
            modified,
            data: EntryData::File {
                content: content.into(),
            },
        }
    }

    /// Node kind
    pub const fn kind(&self) -> EntryKind {
        match self.data {
            EntryData::Directory => EntryKind::Directory,
            EntryData::File { .. } => EntryKind::File,
        }
    }

    /// Whether this is a directory entry
    pub const fn is_directory(&self) -> bool {
        matches!(self.data, EntryData::Directory)
    }

    /// File content, `None` for directories
    pub fn content(&self) -> Option<&str> {
        match &self.data {
            EntryData::Directory => None,
            EntryData::File { content } => Some(content),
        }
    }

    /// Content length in Unicode scalar values, `None` for directories
    pub fn size(&self) -> Option<u64> {
        self.content().map(content_size)
    }
}

/// Length of file content as recorded in the `size` field
pub fn content_size(content: &str) -> u64 {
    content.chars().count() as u64
}
