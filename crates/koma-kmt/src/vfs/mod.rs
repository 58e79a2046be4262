//! Virtual filesystem interface that snapshots are restored into
//!
//! The `.kmt` format only needs a small surface from its consumer: create a
//! directory, create a file with content and timestamps, and look nodes up.
//! [`MemoryVfs`] is the in-memory implementation restores build into.

mod memory;

pub use memory::MemoryVfs;

use crate::entry::{EntryData, EntryKind, Timestamp, VfsEntry};
use crate::path::PathError;
use thiserror::Error;

/// VFS operation errors
#[derive(Debug, Error)]
pub enum VfsError {
    /// Path does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Parent directory does not exist
    #[error("parent directory of {0} does not exist")]
    ParentNotFound(String),

    /// A path component is a file
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// File operation on a directory
    #[error("is a directory: {0}")]
    IsADirectory(String),

    /// Directory requested where a file exists
    #[error("file exists: {0}")]
    AlreadyExists(String),

    /// Path is not canonical
    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathError),
}

/// Result type for VFS operations
pub type VfsResult<T> = Result<T, VfsError>;

/// Metadata about a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Node kind
    pub kind: EntryKind,
    /// Content length for files, 0 for directories
    pub size: u64,
    /// Creation time
    pub created: Timestamp,
    /// Last modification time
    pub modified: Timestamp,
}

impl Metadata {
    /// True for directories
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// True for files
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// A directory entry returned by [`Vfs::list`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Name of the entry (not full path)
    pub name: String,
    /// Node kind
    pub kind: EntryKind,
}

/// Filesystem operations a restore needs
///
/// Paths are absolute and canonical (see [`crate::path`]).
pub trait Vfs {
    /// Create a directory whose parent exists.
    ///
    /// Succeeds without changes when the directory already exists.
    fn create_directory(
        &mut self,
        path: &str,
        created: &Timestamp,
        modified: &Timestamp,
    ) -> VfsResult<()>;

    /// Create or overwrite a file whose parent directory exists.
    fn create_file(
        &mut self,
        path: &str,
        content: &str,
        created: &Timestamp,
        modified: &Timestamp,
    ) -> VfsResult<()>;

    /// Read a file's content.
    fn read_file(&self, path: &str) -> VfsResult<String>;

    /// List a directory's children sorted by name.
    fn list(&self, path: &str) -> VfsResult<Vec<DirEntry>>;

    /// Metadata for a file or directory.
    fn stat(&self, path: &str) -> VfsResult<Metadata>;

    /// Check if a path exists.
    fn exists(&self, path: &str) -> bool {
        self.stat(path).is_ok()
    }

    /// Materialize one snapshot entry.
    fn apply(&mut self, entry: &VfsEntry) -> VfsResult<()> {
        match &entry.data {
            EntryData::Directory => {
                self.create_directory(&entry.path, &entry.created, &entry.modified)
            }
            EntryData::File { content } => {
                self.create_file(&entry.path, content, &entry.created, &entry.modified)
            }
        }
    }
}
