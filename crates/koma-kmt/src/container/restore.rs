//! Restoring a container into a VFS
//!
//! The pipeline is: decompress, base64 decode, verify the checksum, decode
//! the entry list, cross-check the header stats, then replay the entries in
//! canonical order into a staging [`MemoryVfs`]. Nothing reaches a caller's
//! filesystem until the staging tree has been built without error.

use super::error::{IntegrityError, KmtError, KmtResult, PathConflict};
use super::{KmtContainer, Stats};
use crate::codec::{self, DecodeError};
use crate::entry::{EntryKind, VfsEntry};
use crate::path;
use crate::vfs::{MemoryVfs, Vfs};
use tracing::{debug, warn};

/// What to do when header stats disagree with the payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatsPolicy {
    /// Fail with [`KmtError::StatsMismatch`]
    #[default]
    Strict,
    /// Log a warning and continue
    Warn,
}

/// What to do when an entry's parent directory is not in the snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AncestorPolicy {
    /// Fail with [`PathConflict::MissingParent`]
    #[default]
    Strict,
    /// Create the missing directories, stamped with the container's timestamp
    AutoCreate,
}

/// Restore configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreOptions {
    /// Stats mismatch handling
    pub stats: StatsPolicy,
    /// Missing parent handling
    pub ancestors: AncestorPolicy,
}

impl RestoreOptions {
    /// Strict stats and strict ancestors
    pub const fn new() -> Self {
        Self {
            stats: StatsPolicy::Strict,
            ancestors: AncestorPolicy::Strict,
        }
    }

    /// Warn on stats mismatches and create missing parents
    pub const fn lenient() -> Self {
        Self {
            stats: StatsPolicy::Warn,
            ancestors: AncestorPolicy::AutoCreate,
        }
    }

    /// Set the stats policy
    #[must_use]
    pub const fn with_stats_policy(mut self, stats: StatsPolicy) -> Self {
        self.stats = stats;
        self
    }

    /// Set the ancestor policy
    #[must_use]
    pub const fn with_ancestor_policy(mut self, ancestors: AncestorPolicy) -> Self {
        self.ancestors = ancestors;
        self
    }
}

/// Outcome of a successful restore
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Directories materialized, auto-created parents included
    pub directories: u64,
    /// Files materialized
    pub files: u64,
    /// Parent directories created under [`AncestorPolicy::AutoCreate`], shallowest first
    pub created_parents: Vec<String>,
    /// Stats fields that disagreed under [`StatsPolicy::Warn`]
    pub stats_mismatches: usize,
}

impl KmtContainer {
    /// Restore into a fresh in-memory filesystem
    pub fn restore(&self, options: &RestoreOptions) -> KmtResult<MemoryVfs> {
        self.stage(options).map(|(vfs, _)| vfs)
    }

    /// Run the full restore pipeline and discard the tree
    pub fn verify(&self, options: &RestoreOptions) -> KmtResult<RestoreReport> {
        self.stage(options).map(|(_, report)| report)
    }

    /// Restore into an existing filesystem
    ///
    /// Directories already present are kept and files are overwritten. A
    /// path that exists in `target` with the other kind fails with
    /// [`PathConflict::KindMismatch`] before anything is written. Decode,
    /// verify and conflict errors leave `target` unchanged. If `target`
    /// rejects a write after earlier writes succeeded, the error is
    /// [`KmtError::PartialRestore`] with the number of entries applied; the
    /// applied entries stay in `target`.
    pub fn restore_into<V>(&self, target: &mut V, options: &RestoreOptions) -> KmtResult<RestoreReport>
    where
        V: Vfs + ?Sized,
    {
        let (staged, report) = self.stage(options)?;
        let entries = staged.snapshot();

        for entry in &entries {
            if let Ok(existing) = target.stat(&entry.path)
                && existing.kind != entry.kind()
            {
                return Err(PathConflict::KindMismatch {
                    path: entry.path.clone(),
                    existing: existing.kind,
                    incoming: entry.kind(),
                }
                .into());
            }
        }

        for (applied, entry) in entries.iter().enumerate() {
            if let Err(source) = target.apply(entry) {
                if applied == 0 {
                    return Err(source.into());
                }
                warn!(
                    "Restore of '{}' stopped at {} after {} entries",
                    self.label, entry.path, applied
                );
                return Err(KmtError::PartialRestore { applied, source });
            }
        }

        debug!(
            "Restored '{}' into target: {} directories, {} files",
            self.label, report.directories, report.files
        );
        Ok(report)
    }

    /// Decode and verify the payload without replaying it
    ///
    /// Entries are returned in payload order.
    pub fn decode_entries(&self, options: &RestoreOptions) -> KmtResult<Vec<VfsEntry>> {
        self.decode_verified(options.stats).map(|(entries, _)| entries)
    }

    fn decode_verified(&self, policy: StatsPolicy) -> KmtResult<(Vec<VfsEntry>, usize)> {
        self.compression.ensure_supported()?;

        let stored = codec::decode_payload(&self.data).map_err(|err| match err {
            DecodeError::Base64(source) => KmtError::from(IntegrityError::MalformedData(source)),
            other => KmtError::from(other),
        })?;
        let text = self.compression.decompress(stored)?;
        self.checksum.verify(&text)?;

        let entries = codec::decode_text(&text)?;
        let mismatches = self.check_stats(&Stats::of_entries(&entries, text.len()), policy)?;

        debug!(
            "Decoded {} entries from '{}' ({} bytes)",
            entries.len(),
            self.label,
            text.len()
        );
        Ok((entries, mismatches))
    }

    fn check_stats(&self, actual: &Stats, policy: StatsPolicy) -> KmtResult<usize> {
        let fields = [
            ("files", self.stats.files, actual.files),
            ("directories", self.stats.directories, actual.directories),
            ("size", self.stats.size, actual.size),
        ];

        let mut mismatches = 0;
        for (field, declared, actual) in fields {
            if declared == actual {
                continue;
            }
            match policy {
                StatsPolicy::Strict => {
                    return Err(KmtError::StatsMismatch {
                        field,
                        declared,
                        actual,
                    });
                }
                StatsPolicy::Warn => {
                    warn!(
                        "Stats mismatch in '{}' for {}: header says {}, payload has {}",
                        self.label, field, declared, actual
                    );
                    mismatches += 1;
                }
            }
        }
        Ok(mismatches)
    }

    fn stage(&self, options: &RestoreOptions) -> KmtResult<(MemoryVfs, RestoreReport)> {
        let (mut entries, stats_mismatches) = self.decode_verified(options.stats)?;
        codec::canonical_sort(&mut entries);

        let mut vfs = MemoryVfs::with_root_timestamp(self.created.clone());
        let mut report = RestoreReport {
            stats_mismatches,
            ..RestoreReport::default()
        };

        for entry in &entries {
            self.ensure_parent(&mut vfs, entry, options.ancestors, &mut report)?;

            if let Some(existing) = vfs.get(&entry.path) {
                match (existing.kind(), entry.kind()) {
                    // Repeated directories merge
                    (EntryKind::Directory, EntryKind::Directory) => continue,
                    (EntryKind::File, EntryKind::File) => {
                        return Err(PathConflict::DuplicateFile {
                            path: entry.path.clone(),
                        }
                        .into());
                    }
                    (existing, incoming) => {
                        return Err(PathConflict::KindMismatch {
                            path: entry.path.clone(),
                            existing,
                            incoming,
                        }
                        .into());
                    }
                }
            }

            vfs.apply(entry)?;
            match entry.kind() {
                EntryKind::Directory => report.directories += 1,
                EntryKind::File => report.files += 1,
            }
        }

        debug!(
            "Staged '{}': {} directories, {} files",
            self.label, report.directories, report.files
        );
        Ok((vfs, report))
    }

    fn ensure_parent(
        &self,
        vfs: &mut MemoryVfs,
        entry: &VfsEntry,
        policy: AncestorPolicy,
        report: &mut RestoreReport,
    ) -> KmtResult<()> {
        let Some(parent) = path::parent(&entry.path) else {
            return Ok(());
        };

        match vfs.get(parent).map(VfsEntry::kind) {
            Some(EntryKind::Directory) => return Ok(()),
            Some(EntryKind::File) => {
                return Err(PathConflict::KindMismatch {
                    path: parent.to_string(),
                    existing: EntryKind::File,
                    incoming: EntryKind::Directory,
                }
                .into());
            }
            None if policy == AncestorPolicy::Strict => {
                return Err(PathConflict::MissingParent {
                    path: entry.path.clone(),
                    parent: parent.to_string(),
                }
                .into());
            }
            None => {}
        }

        let mut missing = Vec::new();
        for ancestor in path::ancestors(&entry.path) {
            match vfs.get(ancestor).map(VfsEntry::kind) {
                None => missing.push(ancestor.to_string()),
                Some(EntryKind::Directory) => break,
                Some(EntryKind::File) => {
                    return Err(PathConflict::KindMismatch {
                        path: ancestor.to_string(),
                        existing: EntryKind::File,
                        incoming: EntryKind::Directory,
                    }
                    .into());
                }
            }
        }

        for dir in missing.into_iter().rev() {
            warn!("Creating missing parent {} for {}", dir, entry.path);
            vfs.create_directory(&dir, &self.created, &self.created)?;
            report.directories += 1;
            report.created_parents.push(dir);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::container::CompressionMode;
    use crate::test_utils::{fixed_timestamp, ls_scenario, with_field};
    use crate::vfs::VfsError;
    use serde_json::json;

    fn build(entries: Vec<VfsEntry>) -> KmtContainer {
        KmtContainer::build_at(entries, "test", CompressionMode::None, fixed_timestamp())
            .expect("build")
    }

    /// Container whose payload is `text` verbatim, with a matching checksum
    /// and the given stats
    fn from_raw_text(text: &str, stats: serde_json::Value) -> KmtContainer {
        let document = build(Vec::new()).to_json().unwrap();
        let document = with_field(&document, "data", json!(codec::encode_payload(text.as_bytes())));
        let document = with_field(
            &document,
            "checksum",
            json!({"uncompressed": crate::container::ChecksumAlgorithm::Sha256.digest(text.as_bytes())}),
        );
        let document = with_field(&document, "stats", stats);
        KmtContainer::parse(document.as_bytes()).expect("parse")
    }

    fn entry_json(path: &str, kind: &str, content: Option<&str>) -> String {
        let ts = r#""created":"2024-01-01T00:00:00.000Z","modified":"2024-01-01T00:00:00.000Z""#;
        match content {
            Some(content) => format!(
                r#"{{"path":"{path}","type":"{kind}","size":{},{ts},"content":"{content}"}}"#,
                content.chars().count()
            ),
            None => format!(r#"{{"path":"{path}","type":"{kind}",{ts}}}"#),
        }
    }

    fn raw_container(entries: &[String]) -> KmtContainer {
        let text = format!("[{}]", entries.join(","));
        let files = entries.iter().filter(|e| e.contains(r#""type":"file""#)).count();
        let stats = json!({
            "files": files,
            "directories": entries.len() - files,
            "size": text.len(),
        });
        from_raw_text(&text, stats)
    }

    #[test]
    fn test_restore_ls_scenario() {
        let vfs = build(ls_scenario()).restore(&RestoreOptions::default()).unwrap();

        assert_eq!(vfs.len(), 4);
        assert_eq!(vfs.read_file("/home/file1.txt").unwrap(), "content 1");
        assert_eq!(vfs.read_file("/home/dir1/file3.txt").unwrap(), "content 3");
        let names: Vec<_> = vfs.list("/home").unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["dir1", "file1.txt"]);
        assert_eq!(vfs.snapshot(), build(ls_scenario()).decode_entries(&RestoreOptions::new()).unwrap());
    }

    #[test]
    fn test_restore_empty_snapshot_is_root_only() {
        let vfs = build(Vec::new()).restore(&RestoreOptions::default()).unwrap();
        assert!(vfs.is_empty());
        assert!(vfs.stat("/").unwrap().is_dir());
    }

    #[test]
    fn test_restore_preserves_timestamps() {
        let created = crate::entry::Timestamp::parse("2023-05-01T12:00:00.5Z").unwrap();
        let modified = crate::entry::Timestamp::parse("2023-06-01T08:30:00.123456Z").unwrap();
        let vfs = build(vec![
            VfsEntry::directory("/docs", &fixed_timestamp()),
            VfsEntry::file_with_times("/docs/a.md", "# A", created.clone(), modified.clone()),
        ])
        .restore(&RestoreOptions::default())
        .unwrap();

        let meta = vfs.stat("/docs/a.md").unwrap();
        assert_eq!(meta.created, created);
        assert_eq!(meta.modified.as_str(), "2023-06-01T08:30:00.123456Z");
    }

    #[test]
    fn test_restore_does_not_change_container() {
        let container = build(ls_scenario());
        let before = container.clone();
        let _ = container.restore(&RestoreOptions::default()).unwrap();
        assert_eq!(container, before);
    }

    #[test]
    fn test_restore_unknown_compression() {
        let document = with_field(&build(ls_scenario()).to_json().unwrap(), "compression", json!("lz4"));
        let container = KmtContainer::parse(document.as_bytes()).unwrap();
        assert!(matches!(
            container.restore(&RestoreOptions::default()),
            Err(KmtError::UnsupportedCompression(m)) if m == "lz4"
        ));
    }

    #[test]
    fn test_checksum_mismatch() {
        let document = build(ls_scenario()).to_json().unwrap();
        let document = with_field(
            &document,
            "checksum",
            json!({"uncompressed": "fixture-checksum"}),
        );
        let container = KmtContainer::parse(document.as_bytes()).unwrap();
        assert!(matches!(
            container.restore(&RestoreOptions::default()),
            Err(KmtError::Integrity(IntegrityError::ChecksumMismatch { ref expected, .. }))
                if expected == "fixture-checksum"
        ));
    }

    #[test]
    fn test_malformed_base64_is_integrity_error() {
        let document = with_field(&build(ls_scenario()).to_json().unwrap(), "data", json!("W10"));
        let container = KmtContainer::parse(document.as_bytes()).unwrap();
        assert!(matches!(
            container.restore(&RestoreOptions::default()),
            Err(KmtError::Integrity(IntegrityError::MalformedData(_)))
        ));
    }

    #[test]
    fn test_every_single_byte_flip_is_detected() {
        let container = build(ls_scenario());
        let document = container.to_json().unwrap();
        let data = container.data().as_bytes().to_vec();

        for idx in 0..data.len() {
            let mut tampered = data.clone();
            // Stay inside ASCII so the document remains valid JSON
            tampered[idx] = if tampered[idx] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(tampered).unwrap();
            let tampered = KmtContainer::parse(with_field(&document, "data", json!(tampered)).as_bytes())
                .unwrap();

            let result = tampered.restore(&RestoreOptions::default());
            assert!(
                matches!(result, Err(KmtError::Integrity(_))),
                "flip at {idx} gave {result:?}"
            );
        }
    }

    #[test]
    fn test_stats_mismatch_policies() {
        let document = build(ls_scenario()).to_json().unwrap();
        let document = with_field(
            &document,
            "stats",
            json!({"files": 3, "directories": 2, "size": 1}),
        );
        let container = KmtContainer::parse(document.as_bytes()).unwrap();

        assert!(matches!(
            container.restore(&RestoreOptions::default()),
            Err(KmtError::StatsMismatch {
                field: "files",
                declared: 3,
                actual: 2
            })
        ));

        let options = RestoreOptions::new().with_stats_policy(StatsPolicy::Warn);
        let report = container.verify(&options).unwrap();
        assert_eq!(report.stats_mismatches, 2);
        assert_eq!(report.files, 2);
    }

    #[test]
    fn test_missing_parent_policies() {
        let container = raw_container(&[
            entry_json("/var/log/app.log", "file", Some("started")),
            entry_json("/top.txt", "file", Some("top")),
        ]);

        let err = container.restore(&RestoreOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            KmtError::PathConflict(PathConflict::MissingParent { ref parent, .. }) if parent == "/var/log"
        ));

        let options = RestoreOptions::new().with_ancestor_policy(AncestorPolicy::AutoCreate);
        let report = container.verify(&options).unwrap();
        assert_eq!(report.created_parents, vec!["/var", "/var/log"]);
        assert_eq!(report.directories, 2);
        assert_eq!(report.files, 2);

        let vfs = container.restore(&options).unwrap();
        assert_eq!(vfs.read_file("/var/log/app.log").unwrap(), "started");
        assert_eq!(vfs.stat("/var").unwrap().created, fixed_timestamp());
    }

    #[test]
    fn test_duplicate_directories_merge() {
        let container = raw_container(&[
            entry_json("/home", "directory", None),
            entry_json("/home", "directory", None),
            entry_json("/home/a", "file", Some("a")),
        ]);
        let vfs = container.restore(&RestoreOptions::default()).unwrap();
        assert_eq!(vfs.len(), 2);
    }

    #[test]
    fn test_duplicate_files_conflict() {
        let container = raw_container(&[
            entry_json("/a", "file", Some("one")),
            entry_json("/a", "file", Some("two")),
        ]);
        assert!(matches!(
            container.restore(&RestoreOptions::default()),
            Err(KmtError::PathConflict(PathConflict::DuplicateFile { ref path })) if path == "/a"
        ));
    }

    #[test]
    fn test_kind_conflicts() {
        let container = raw_container(&[
            entry_json("/a", "file", Some("one")),
            entry_json("/a", "directory", None),
        ]);
        assert!(matches!(
            container.restore(&RestoreOptions::default()),
            Err(KmtError::PathConflict(PathConflict::KindMismatch {
                existing: EntryKind::Directory,
                incoming: EntryKind::File,
                ..
            }))
        ));

        let container = raw_container(&[
            entry_json("/a", "file", Some("one")),
            entry_json("/a/b", "file", Some("two")),
        ]);
        for options in [RestoreOptions::new(), RestoreOptions::lenient()] {
            let err = container.restore(&options).unwrap_err();
            assert!(
                matches!(err, KmtError::PathConflict(ref c) if c.path() == "/a"),
                "{err}"
            );
        }

        let container = raw_container(&[entry_json("/", "file", Some("x"))]);
        assert!(matches!(
            container.restore(&RestoreOptions::default()),
            Err(KmtError::PathConflict(PathConflict::KindMismatch { .. }))
        ));
    }

    #[test]
    fn test_decode_errors_surface() {
        let container = from_raw_text(r#"[{"path":"/a"}]"#, json!({"files": 0, "directories": 0, "size": 0}));
        assert!(matches!(
            container.restore(&RestoreOptions::default()),
            Err(KmtError::Decode(DecodeError::Schema(_)))
        ));
    }

    #[test]
    fn test_restore_into_merges() {
        let at = fixed_timestamp();
        let mut target = MemoryVfs::with_root_timestamp(at.clone());
        target.create_directory("/home", &at, &at).unwrap();
        target.create_file("/home/file1.txt", "old", &at, &at).unwrap();
        target.create_file("/keep.txt", "kept", &at, &at).unwrap();

        let report = build(ls_scenario())
            .restore_into(&mut target, &RestoreOptions::default())
            .unwrap();

        assert_eq!(report.files, 2);
        assert_eq!(target.read_file("/home/file1.txt").unwrap(), "content 1");
        assert_eq!(target.read_file("/keep.txt").unwrap(), "kept");
        assert!(target.stat("/home/dir1").unwrap().is_dir());
    }

    #[test]
    fn test_restore_into_conflict_leaves_target_untouched() {
        let at = fixed_timestamp();
        let mut target = MemoryVfs::with_root_timestamp(at.clone());
        target.create_directory("/home", &at, &at).unwrap();
        target.create_file("/home/dir1", "i am a file", &at, &at).unwrap();
        let before = target.clone();

        let err = build(ls_scenario())
            .restore_into(&mut target, &RestoreOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            KmtError::PathConflict(PathConflict::KindMismatch { ref path, .. }) if path == "/home/dir1"
        ));
        assert_eq!(target, before);
    }

    #[test]
    fn test_restore_into_corrupt_container_leaves_target_untouched() {
        let mut target = MemoryVfs::with_root_timestamp(fixed_timestamp());
        let document = with_field(&build(ls_scenario()).to_json().unwrap(), "data", json!("W10="));
        let container = KmtContainer::parse(document.as_bytes()).unwrap();

        assert!(container.restore_into(&mut target, &RestoreOptions::default()).is_err());
        assert!(target.is_empty());
    }

    #[test]
    fn test_restore_into_reports_vfs_errors() {
        struct ReadOnly(MemoryVfs);

        impl Vfs for ReadOnly {
            fn create_directory(
                &mut self,
                path: &str,
                _: &crate::entry::Timestamp,
                _: &crate::entry::Timestamp,
            ) -> crate::vfs::VfsResult<()> {
                Err(VfsError::NotFound(path.to_string()))
            }
            fn create_file(
                &mut self,
                path: &str,
                _: &str,
                _: &crate::entry::Timestamp,
                _: &crate::entry::Timestamp,
            ) -> crate::vfs::VfsResult<()> {
                Err(VfsError::NotFound(path.to_string()))
            }
            fn read_file(&self, path: &str) -> crate::vfs::VfsResult<String> {
                self.0.read_file(path)
            }
            fn list(&self, path: &str) -> crate::vfs::VfsResult<Vec<crate::vfs::DirEntry>> {
                self.0.list(path)
            }
            fn stat(&self, path: &str) -> crate::vfs::VfsResult<crate::vfs::Metadata> {
                self.0.stat(path)
            }
        }

        let mut target = ReadOnly(MemoryVfs::new());
        assert!(matches!(
            build(ls_scenario()).restore_into(&mut target, &RestoreOptions::default()),
            Err(KmtError::Vfs(VfsError::NotFound(_)))
        ));
    }

    #[test]
    fn test_restore_into_reports_partial_writes() {
        /// Accepts a fixed number of writes, then rejects every one after
        struct Budgeted {
            inner: MemoryVfs,
            writes_left: usize,
        }

        impl Budgeted {
            fn spend(&mut self, path: &str) -> crate::vfs::VfsResult<()> {
                if self.writes_left == 0 {
                    return Err(VfsError::NotFound(path.to_string()));
                }
                self.writes_left -= 1;
                Ok(())
            }
        }

        impl Vfs for Budgeted {
            fn create_directory(
                &mut self,
                path: &str,
                created: &crate::entry::Timestamp,
                modified: &crate::entry::Timestamp,
            ) -> crate::vfs::VfsResult<()> {
                self.spend(path)?;
                self.inner.create_directory(path, created, modified)
            }
            fn create_file(
                &mut self,
                path: &str,
                content: &str,
                created: &crate::entry::Timestamp,
                modified: &crate::entry::Timestamp,
            ) -> crate::vfs::VfsResult<()> {
                self.spend(path)?;
                self.inner.create_file(path, content, created, modified)
            }
            fn read_file(&self, path: &str) -> crate::vfs::VfsResult<String> {
                self.inner.read_file(path)
            }
            fn list(&self, path: &str) -> crate::vfs::VfsResult<Vec<crate::vfs::DirEntry>> {
                self.inner.list(path)
            }
            fn stat(&self, path: &str) -> crate::vfs::VfsResult<crate::vfs::Metadata> {
                self.inner.stat(path)
            }
        }

        let mut target = Budgeted {
            inner: MemoryVfs::new(),
            writes_left: 2,
        };
        let err = build(ls_scenario())
            .restore_into(&mut target, &RestoreOptions::default())
            .unwrap_err();

        match err {
            KmtError::PartialRestore { applied, source } => {
                assert_eq!(applied, 2);
                assert!(matches!(source, VfsError::NotFound(p) if p == "/home/file1.txt"));
            }
            other => panic!("expected a partial restore, got {other:?}"),
        }
        let paths: Vec<_> = target.inner.paths().collect();
        assert_eq!(paths, vec!["/", "/home", "/home/dir1"]);
    }

    #[test]
    fn test_options_builders() {
        assert_eq!(RestoreOptions::default(), RestoreOptions::new());
        let options = RestoreOptions::new()
            .with_stats_policy(StatsPolicy::Warn)
            .with_ancestor_policy(AncestorPolicy::AutoCreate);
        assert_eq!(options, RestoreOptions::lenient());
    }
}
