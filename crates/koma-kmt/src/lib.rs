//! Koma Tape (`.kmt`) virtual filesystem backups
//!
#![allow(clippy::cast_possible_truncation)] // Sizes are reported as u64
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::doc_markdown)] // Format names don't need backticks
#![allow(clippy::missing_errors_doc)] // Error enums document themselves
#![allow(clippy::return_self_not_must_use)] // Builder patterns
//! This crate reads and writes `.kmt` containers: JSON documents that hold a
//! canonically ordered, base64 encoded list of VFS entries together with a
//! format version, a SHA-256 checksum and summary stats.
//!
//! # Layers
//!
//! - **Entry model** ([`entry`]): directories and files with timestamps
//! - **Codec** ([`codec`]): entries to canonical JSON text and base64 payloads
//! - **Container** ([`container`]): build, serialize, parse and restore documents
//! - **VFS** ([`vfs`]): the filesystem interface restores write into, plus
//!   an in-memory implementation
//! - **Fixtures** ([`fixtures`]): named reference snapshots and file persistence
//!
//! # Guarantees
//!
//! - **Deterministic**: equal entry sets encode to byte-identical payloads
//! - **Verified**: a restore checks the checksum before decoding entries
//! - **All or nothing**: a failed restore never leaves a partial tree behind
//!
//! # Example
//!
//! ```rust
//! use koma_kmt::{KmtBuilder, KmtContainer, MemoryVfs, RestoreOptions, Vfs};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let document = KmtBuilder::new("home")
//!     .directory("/home")
//!     .file("/home/.profile", "# User profile")
//!     .build()?
//!     .to_json_pretty()?;
//!
//! let mut vfs = MemoryVfs::new();
//! KmtContainer::parse(document.as_bytes())?.restore_into(&mut vfs, &RestoreOptions::default())?;
//! assert_eq!(vfs.read_file("/home/.profile")?, "# User profile");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod codec;
/// Container documents: build, parse, verify and restore
pub mod container;
pub mod entry;
/// Named fixture snapshots and `.kmt` file I/O
pub mod fixtures;
pub mod path;
pub mod vfs;

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
pub(crate) mod test_utils;

pub use container::{
    AncestorPolicy, KmtBuilder, KmtContainer, KmtError, KmtResult, RestoreOptions, RestoreReport,
    StatsPolicy,
};
pub use entry::{EntryKind, Timestamp, VfsEntry};
pub use vfs::{MemoryVfs, Vfs, VfsError};
