//! In-memory filesystem implementation.
//!
//! Restores build into a fresh `MemoryVfs`; the root directory always exists.

use super::{DirEntry, Metadata, Vfs, VfsError, VfsResult};
use crate::codec;
use crate::entry::{EntryData, EntryKind, Timestamp, VfsEntry};
use crate::path::{self, ROOT};
use std::collections::BTreeMap;

/// In-memory filesystem keyed by absolute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryVfs {
    nodes: BTreeMap<String, VfsEntry>,
}

impl Default for MemoryVfs {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryVfs {
    /// Create a filesystem holding only the root, stamped with the current time.
    pub fn new() -> Self {
        Self::with_root_timestamp(Timestamp::now())
    }

    /// Create a filesystem holding only the root with the given timestamp.
    pub fn with_root_timestamp(at: Timestamp) -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(ROOT.to_string(), VfsEntry::directory(ROOT, &at));
        Self { nodes }
    }

    /// Number of nodes, root excluded.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    /// True when only the root exists.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Node at `path`, root included.
    pub fn get(&self, path: &str) -> Option<&VfsEntry> {
        self.nodes.get(path)
    }

    /// All paths in lexical order, root included.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    /// Entries for every node except the root, in canonical order.
    ///
    /// Feeding the result to a container build backs up this tree.
    pub fn snapshot(&self) -> Vec<VfsEntry> {
        let mut entries: Vec<VfsEntry> = self
            .nodes
            .iter()
            .filter(|(p, _)| !path::is_root(p))
            .map(|(_, entry)| entry.clone())
            .collect();
        codec::canonical_sort(&mut entries);
        entries
    }

    /// Swap in another tree wholesale.
    pub fn replace_with(&mut self, other: Self) {
        *self = other;
    }

    fn check_parent(&self, path: &str) -> VfsResult<()> {
        let Some(parent) = path::parent(path) else {
            return Ok(());
        };
        match self.nodes.get(parent) {
            Some(node) if node.is_directory() => Ok(()),
            Some(_) => Err(VfsError::NotADirectory(parent.to_string())),
            None => Err(VfsError::ParentNotFound(path.to_string())),
        }
    }
}

impl Vfs for MemoryVfs {
    fn create_directory(
        &mut self,
        path: &str,
        created: &Timestamp,
        modified: &Timestamp,
    ) -> VfsResult<()> {
        path::validate(path)?;

        if let Some(existing) = self.nodes.get(path) {
            return match existing.kind() {
                EntryKind::Directory => Ok(()),
                EntryKind::File => Err(VfsError::AlreadyExists(path.to_string())),
            };
        }
        self.check_parent(path)?;

        self.nodes.insert(
            path.to_string(),
            VfsEntry::directory_with_times(path, created.clone(), modified.clone()),
        );
        Ok(())
    }

    fn create_file(
        &mut self,
        path: &str,
        content: &str,
        created: &Timestamp,
        modified: &Timestamp,
    ) -> VfsResult<()> {
        path::validate(path)?;

        if self.nodes.get(path).is_some_and(VfsEntry::is_directory) {
            return Err(VfsError::IsADirectory(path.to_string()));
        }
        self.check_parent(path)?;

        self.nodes.insert(
            path.to_string(),
            VfsEntry::file_with_times(path, content, created.clone(), modified.clone()),
        );
        Ok(())
    }

    fn read_file(&self, path: &str) -> VfsResult<String> {
        match self.nodes.get(path).map(|node| &node.data) {
            Some(EntryData::File { content }) => Ok(content.clone()),
            Some(EntryData::Directory) => Err(VfsError::IsADirectory(path.to_string())),
            None => Err(VfsError::NotFound(path.to_string())),
        }
    }

    fn list(&self, path: &str) -> VfsResult<Vec<DirEntry>> {
        match self.nodes.get(path) {
            Some(node) if node.is_directory() => {}
            Some(_) => return Err(VfsError::NotADirectory(path.to_string())),
            None => return Err(VfsError::NotFound(path.to_string())),
        }

        let mut result: Vec<DirEntry> = self
            .nodes
            .iter()
            .filter(|(child, _)| path::parent(child) == Some(path))
            .map(|(child, node)| DirEntry {
                name: path::file_name(child).to_string(),
                kind: node.kind(),
            })
            .collect();

        // Sort for consistent ordering
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    fn stat(&self, path: &str) -> VfsResult<Metadata> {
        let node = self
            .nodes
            .get(path)
            .ok_or_else(|| VfsError::NotFound(path.to_string()))?;

        Ok(Metadata {
            kind: node.kind(),
            size: node.size().unwrap_or(0),
            created: node.created.clone(),
            modified: node.modified.clone(),
        })
    }
}
