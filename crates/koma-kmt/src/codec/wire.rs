//! Serialized form of a single entry
//!
//! Field order here is the canonical key order of the payload:
//! `path, type, [size], created, modified, [content]`.

use super::error::DecodeError;
use crate::entry::{EntryData, EntryKind, Timestamp, VfsEntry, content_size};
use crate::path;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct WireEntryRef<'a> {
    path: &'a str,
    #[serde(rename = "type")]
    kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    created: &'a str,
    modified: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
}

impl<'a> From<&'a VfsEntry> for WireEntryRef<'a> {
    fn from(entry: &'a VfsEntry) -> Self {
        Self {
            path: &entry.path,
            kind: entry.kind(),
            size: entry.size(),
            created: entry.created.as_str(),
            modified: entry.modified.as_str(),
            content: entry.content(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct WireEntry {
    path: String,
    #[serde(rename = "type")]
    kind: EntryKind,
    size: Option<u64>,
    created: Timestamp,
    modified: Timestamp,
    content: Option<String>,
}

impl TryFrom<WireEntry> for VfsEntry {
    type Error = DecodeError;

    fn try_from(wire: WireEntry) -> Result<Self, Self::Error> {
        path::validate(&wire.path)?;

        let data = match wire.kind {
            EntryKind::Directory => {
                if wire.content.is_some() || wire.size.is_some() {
                    return Err(DecodeError::UnexpectedContent { path: wire.path });
                }
                EntryData::Directory
            }
            EntryKind::File => {
                let Some(content) = wire.content else {
                    return Err(DecodeError::MissingContent { path: wire.path });
                };
                let Some(declared) = wire.size else {
                    return Err(DecodeError::MissingSize { path: wire.path });
                };
                let actual = content_size(&content);
                if declared != actual {
                    return Err(DecodeError::SizeMismatch {
                        path: wire.path,
                        declared,
                        actual,
                    });
                }
                EntryData::File { content }
            }
        };

        Ok(Self {
            path: wire.path,
            created: wire.created,
            modified: wire.modified,
            data,
        })
    }
}
