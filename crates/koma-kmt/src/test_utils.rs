//! Shared helpers for unit tests

use crate::entry::{Timestamp, VfsEntry};

/// Timestamp used by every reference fixture
pub fn fixed_timestamp() -> Timestamp {
    Timestamp::parse("2024-01-01T00:00:00.000Z").expect("valid timestamp")
}

/// The `ls` scenario tree, deliberately out of canonical order
pub fn ls_scenario() -> Vec<VfsEntry> {
    let at = fixed_timestamp();
    vec![
        VfsEntry::file("/home/dir1/file3.txt", "content 3", &at),
        VfsEntry::file("/home/file1.txt", "content 1", &at),
        VfsEntry::directory("/home/dir1", &at),
        VfsEntry::directory("/home", &at),
    ]
}

/// Rewrite one top-level field of a serialized container
pub fn with_field(document: &str, field: &str, value: serde_json::Value) -> String {
    let mut json: serde_json::Value = serde_json::from_str(document).expect("valid json");
    json[field] = value;
    serde_json::to_string(&json).expect("serialize")
}
