//! Entry codec: entry lists to canonical JSON text and base64 payloads
//!
//! Encoding is deterministic. Entries are put in canonical order
//! (directories before files, shallower paths before deeper ones, then by
//! path), serialized as compact ASCII JSON with a fixed key order and finally
//! base64 encoded with the standard alphabet. Encoding the same entries twice
//! yields byte-identical output, and the output matches the koma shell fixture
//! generator byte for byte.
//!
//! # Example
//!
//! ```rust
//! use koma_kmt::codec;
//! use koma_kmt::entry::{Timestamp, VfsEntry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let at: Timestamp = "2024-01-01T00:00:00.000Z".parse()?;
//! let encoded = codec::encode(vec![
//!     VfsEntry::file("/home/notes.txt", "hello", &at),
//!     VfsEntry::directory("/home", &at),
//! ])?;
//!
//! assert_eq!(encoded.entries()[0].path, "/home");
//! let decoded = codec::decode(encoded.payload())?;
//! assert_eq!(decoded, encoded.entries());
//! # Ok(())
//! # }
//! ```

pub mod ascii;
mod error;
mod wire;

pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult};

use crate::entry::VfsEntry;
use crate::path;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::cmp::Ordering;
use std::collections::HashSet;
use wire::{WireEntry, WireEntryRef};

/// Output of [`encode`]: canonical entries, their JSON text and the payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedEntries {
    entries: Vec<VfsEntry>,
    text: String,
    payload: String,
}

impl EncodedEntries {
    /// Entries in canonical order
    pub fn entries(&self) -> &[VfsEntry] {
        &self.entries
    }

    /// Canonical compact JSON text (always ASCII)
    pub fn text(&self) -> &str {
        &self.text
    }

    /// UTF-8 bytes of the canonical text
    pub fn text_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Base64 encoding of the canonical text
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Number of file entries
    pub fn file_count(&self) -> u64 {
        self.entries.iter().filter(|e| !e.is_directory()).count() as u64
    }

    /// Number of directory entries
    pub fn directory_count(&self) -> u64 {
        self.entries.iter().filter(|e| e.is_directory()).count() as u64
    }

    /// Split into entries, text and payload
    pub fn into_parts(self) -> (Vec<VfsEntry>, String, String) {
        (self.entries, self.text, self.payload)
    }
}

/// Compare two entries by (kind rank, path depth, path)
pub fn canonical_cmp(a: &VfsEntry, b: &VfsEntry) -> Ordering {
    a.kind()
        .rank()
        .cmp(&b.kind().rank())
        .then_with(|| path::depth(&a.path).cmp(&path::depth(&b.path)))
        .then_with(|| a.path.cmp(&b.path))
}

/// Sort entries into canonical order in place
pub fn canonical_sort(entries: &mut [VfsEntry]) {
    entries.sort_by(canonical_cmp);
}

/// Check paths for canonical form and uniqueness
pub fn validate_entries(entries: &[VfsEntry]) -> EncodeResult<()> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        path::validate(&entry.path)?;
        if !seen.insert(entry.path.as_str()) {
            return Err(EncodeError::DuplicatePath(entry.path.clone()));
        }
    }
    Ok(())
}

/// Serialize entries, in the order given, as compact ASCII JSON
pub fn to_canonical_text(entries: &[VfsEntry]) -> EncodeResult<String> {
    let wire: Vec<WireEntryRef<'_>> = entries.iter().map(WireEntryRef::from).collect();
    Ok(ascii::to_compact_string(&wire)?)
}

/// Encode entries into canonical text and a base64 payload
pub fn encode(mut entries: Vec<VfsEntry>) -> EncodeResult<EncodedEntries> {
    validate_entries(&entries)?;
    canonical_sort(&mut entries);

    let text = to_canonical_text(&entries)?;
    let payload = encode_payload(text.as_bytes());

    Ok(EncodedEntries {
        entries,
        text,
        payload,
    })
}

/// Base64 encode raw bytes (standard alphabet, padded, no line breaks)
pub fn encode_payload(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Base64 decode a payload into raw bytes
pub fn decode_payload(payload: &str) -> DecodeResult<Vec<u8>> {
    Ok(STANDARD.decode(payload)?)
}

/// Parse canonical text bytes into entries, keeping their order
pub fn decode_text(bytes: &[u8]) -> DecodeResult<Vec<VfsEntry>> {
    let text = std::str::from_utf8(bytes)?;
    let wire: Vec<WireEntry> = serde_json::from_str(text)?;
    wire.into_iter().map(VfsEntry::try_from).collect()
}

/// Decode a base64 payload into entries
pub fn decode(payload: &str) -> DecodeResult<Vec<VfsEntry>> {
    let bytes = decode_payload(payload)?;
    decode_text(&bytes)
}

/// Parent directories that no directory entry provides, sorted and deduplicated
///
/// The root is always present and never reported.
pub fn missing_ancestors(entries: &[VfsEntry]) -> Vec<String> {
    let directories: HashSet<&str> = entries
        .iter()
        .filter(|e| e.is_directory())
        .map(|e| e.path.as_str())
        .collect();

    let mut missing: Vec<String> = entries
        .iter()
        .filter_map(|e| path::parent(&e.path))
        .filter(|parent| !path::is_root(parent) && !directories.contains(parent))
        .map(str::to_string)
        .collect();
    missing.sort();
    missing.dedup();
    missing
}
