//! Builder for `.kmt` containers

use super::compression::CompressionMode;
use super::error::KmtResult;
use super::KmtContainer;
use crate::entry::{EntryData, Timestamp, VfsEntry};

/// An entry whose timestamps may fall back to the builder's
#[derive(Debug, Clone)]
struct PendingEntry {
    path: String,
    data: EntryData,
    created: Option<Timestamp>,
    modified: Option<Timestamp>,
}

/// Builder for creating `.kmt` containers
///
/// Each method consumes the builder and returns a new one, so a builder
/// value is never shared between builds. Entries without explicit
/// timestamps take the builder's timestamp when [`build`](Self::build) runs,
/// regardless of the order `timestamp` and the entry methods were called in.
///
/// # Example
///
/// ```rust
/// use koma_kmt::container::KmtBuilder;
/// use koma_kmt::entry::Timestamp;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let container = KmtBuilder::new("basic-vfs")
///     .timestamp("2024-01-01T00:00:00.000Z".parse::<Timestamp>()?)
///     .directory("/home")
///     .directory("/tmp")
///     .build()?;
///
/// assert_eq!(container.stats().directories, 2);
/// assert_eq!(container.created().as_str(), "2024-01-01T00:00:00.000Z");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct KmtBuilder {
    label: String,
    timestamp: Timestamp,
    compression: CompressionMode,
    entries: Vec<PendingEntry>,
}

impl KmtBuilder {
    /// Create an empty builder stamped with the current time
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            timestamp: Timestamp::now(),
            compression: CompressionMode::None,
            entries: Vec::new(),
        }
    }

    /// Set the container timestamp and the default entry timestamp
    #[must_use]
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set the payload compression mode
    #[must_use]
    pub fn compression(mut self, compression: CompressionMode) -> Self {
        self.compression = compression;
        self
    }

    /// Add a directory
    #[must_use]
    pub fn directory(self, path: impl Into<String>) -> Self {
        self.push(path.into(), EntryData::Directory, None, None)
    }

    /// Add a directory with explicit timestamps
    #[must_use]
    pub fn directory_with_times(
        self,
        path: impl Into<String>,
        created: Timestamp,
        modified: Timestamp,
    ) -> Self {
        self.push(path.into(), EntryData::Directory, Some(created), Some(modified))
    }

    /// Add a file
    #[must_use]
    pub fn file(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        let data = EntryData::File {
            content: content.into(),
        };
        self.push(path.into(), data, None, None)
    }

    /// Add a file with explicit timestamps
    #[must_use]
    pub fn file_with_times(
        self,
        path: impl Into<String>,
        content: impl Into<String>,
        created: Timestamp,
        modified: Timestamp,
    ) -> Self {
        let data = EntryData::File {
            content: content.into(),
        };
        self.push(path.into(), data, Some(created), Some(modified))
    }

    /// Add a fully specified entry
    #[must_use]
    pub fn entry(self, entry: VfsEntry) -> Self {
        self.push(entry.path, entry.data, Some(entry.created), Some(entry.modified))
    }

    /// Add fully specified entries, e.g. a [`MemoryVfs`](crate::vfs::MemoryVfs) snapshot
    #[must_use]
    pub fn entries(self, entries: impl IntoIterator<Item = VfsEntry>) -> Self {
        entries.into_iter().fold(self, Self::entry)
    }

    /// Container label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of entries added so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries were added
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the container
    ///
    /// Fails on invalid or duplicate paths and on unsupported compression.
    pub fn build(&self) -> KmtResult<KmtContainer> {
        let entries = self
            .entries
            .iter()
            .map(|pending| VfsEntry {
                path: pending.path.clone(),
                created: pending
                    .created
                    .clone()
                    .unwrap_or_else(|| self.timestamp.clone()),
                modified: pending
                    .modified
                    .clone()
                    .unwrap_or_else(|| self.timestamp.clone()),
                data: pending.data.clone(),
            })
            .collect();

        KmtContainer::build_at(
            entries,
            self.label.clone(),
            self.compression.clone(),
            self.timestamp.clone(),
        )
    }

    fn push(
        mut self,
        path: String,
        data: EntryData,
        created: Option<Timestamp>,
        modified: Option<Timestamp>,
    ) -> Self {
        self.entries.push(PendingEntry {
            path,
            data,
            created,
            modified,
        });
        self
    }
}
