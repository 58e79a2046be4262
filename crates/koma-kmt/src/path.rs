//! Absolute VFS path helpers
//!
//! Paths in a snapshot are plain strings: absolute, `/`-separated, with no
//! trailing slash except for the root itself. No normalization is applied;
//! a path that is not already in canonical form is rejected.

use thiserror::Error;

/// The root directory path
pub const ROOT: &str = "/";

/// Reasons a path is not a canonical absolute VFS path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Empty string
    #[error("path is empty")]
    Empty,

    /// Does not start with `/`
    #[error("path is not absolute: {0:?}")]
    NotAbsolute(String),

    /// Ends with `/` and is not the root
    #[error("path has a trailing slash: {0:?}")]
    TrailingSlash(String),

    /// Contains `//`
    #[error("path has an empty segment: {0:?}")]
    EmptySegment(String),

    /// Contains a `.` or `..` segment
    #[error("path has a relative segment: {0:?}")]
    RelativeSegment(String),
}

/// Check that `path` is a canonical absolute path.
pub fn validate(path: &str) -> Result<(), PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    if !path.starts_with('/') {
        return Err(PathError::NotAbsolute(path.to_string()));
    }
    if path == ROOT {
        return Ok(());
    }
    if path.ends_with('/') {
        return Err(PathError::TrailingSlash(path.to_string()));
    }

    for segment in path[1..].split('/') {
        match segment {
            "" => return Err(PathError::EmptySegment(path.to_string())),
            "." | ".." => return Err(PathError::RelativeSegment(path.to_string())),
            _ => {}
        }
    }

    Ok(())
}

/// Whether `path` is the root directory
pub fn is_root(path: &str) -> bool {
    path == ROOT
}

/// Nesting depth used by the canonical ordering: the number of `/` characters.
pub fn depth(path: &str) -> usize {
    path.bytes().filter(|&b| b == b'/').count()
}

/// Parent directory of a canonical path. `None` for the root.
pub fn parent(path: &str) -> Option<&str> {
    if is_root(path) {
        return None;
    }
    match path.rfind('/') {
        Some(0) => Some(ROOT),
        Some(idx) => Some(&path[..idx]),
        None => None,
    }
}

/// Final segment of a canonical path. Empty for the root.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

/// All proper ancestors of `path`, nearest first, excluding the root.
pub fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(parent(path), |p| parent(*p)).filter(|p| !is_root(p))
}
