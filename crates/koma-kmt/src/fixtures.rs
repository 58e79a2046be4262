//! Named snapshot fixtures and `.kmt` file persistence
//!
//! The catalog holds the reference trees used by shell and VFS tests. Each
//! fixture is a function that fills a [`KmtBuilder`], so callers choose the
//! timestamp; with `2024-01-01T00:00:00.000Z` the canonical text of every
//! fixture matches the koma shell fixture generator byte for byte. Only the
//! `checksum` object differs: that generator writes a placeholder
//! there, which a restore rejects as an integrity failure.

use crate::container::{
    FILE_EXTENSION, KmtBuilder, KmtContainer, KmtError, KmtResult, RestoreOptions, RestoreReport,
    Stats,
};
use crate::entry::Timestamp;
use crate::vfs::Vfs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A named fixture in the catalog
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    name: &'static str,
    populate: fn(KmtBuilder) -> KmtBuilder,
}

impl Fixture {
    /// Fixture name, also used as the container label
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// File name the fixture is written under
    pub fn file_name(&self) -> String {
        format!("{}.{FILE_EXTENSION}", self.name)
    }

    /// Builder holding the fixture's entries, stamped with the current time
    pub fn builder(&self) -> KmtBuilder {
        (self.populate)(KmtBuilder::new(self.name))
    }

    /// Build the fixture container at a fixed timestamp
    pub fn build_at(&self, timestamp: Timestamp) -> KmtResult<KmtContainer> {
        self.builder().timestamp(timestamp).build()
    }
}

const CATALOG: [Fixture; 8] = [
    Fixture {
        name: "empty-vfs",
        populate: empty_vfs,
    },
    Fixture {
        name: "minimal-vfs",
        populate: minimal_vfs,
    },
    Fixture {
        name: "basic-vfs",
        populate: basic_vfs,
    },
    Fixture {
        name: "ls-test",
        populate: ls_test,
    },
    Fixture {
        name: "pipes-test",
        populate: pipes_test,
    },
    Fixture {
        name: "file-reading-test",
        populate: file_reading_test,
    },
    Fixture {
        name: "vfs-ops-test",
        populate: vfs_ops_test,
    },
    Fixture {
        name: "complex-vfs",
        populate: complex_vfs,
    },
];

/// All fixtures in generation order
pub fn catalog() -> &'static [Fixture] {
    &CATALOG
}

/// Look a fixture up by name
pub fn find(name: &str) -> Option<Fixture> {
    CATALOG.iter().find(|f| f.name == name).copied()
}

fn empty_vfs(builder: KmtBuilder) -> KmtBuilder {
    builder
}

fn minimal_vfs(builder: KmtBuilder) -> KmtBuilder {
    builder.directory("/home")
}

fn basic_vfs(builder: KmtBuilder) -> KmtBuilder {
    builder.directory("/home").directory("/tmp")
}

fn ls_test(builder: KmtBuilder) -> KmtBuilder {
    builder
        .directory("/home")
        .directory("/home/dir1")
        .file("/home/file1.txt", "content 1")
        .file("/home/file2.txt", "content 2")
        .file("/home/dir1/file3.txt", "content 3")
        .file("/home/.hidden", "hidden content")
}

fn pipes_test(builder: KmtBuilder) -> KmtBuilder {
    builder
        .directory("/home")
        .file("/home/test.txt", "apple\nbanana\ncherry\napricot\nblueberry")
        .file("/home/numbers.txt", "1\n2\n3\n4\n5")
        .file(
            "/home/mixed.txt",
            "hello world\ntest line\nhello again\nanother test",
        )
        .file(
            "/home/data.csv",
            "name,age,city\nalice,30,NYC\nbob,25,LA\ncarol,35,NYC",
        )
        .file("/home/empty.txt", "")
}

fn file_reading_test(builder: KmtBuilder) -> KmtBuilder {
    let long = (1..=100)
        .map(|i| format!("Line {i}"))
        .collect::<Vec<_>>()
        .join("\n");

    builder
        .directory("/home")
        .file("/home/simple.txt", "Hello, World!")
        .file("/home/multiline.txt", "line 1\nline 2\nline 3\nline 4\nline 5")
        .file("/home/long.txt", long)
        .file("/home/empty.txt", "")
}

fn vfs_ops_test(builder: KmtBuilder) -> KmtBuilder {
    builder
        .directory("/home")
        .directory("/tmp")
        .directory("/home/testdir")
        .file("/home/test.txt", "test content")
        .file("/home/file1.txt", "content 1")
        .file("/home/file2.txt", "content 2")
}

fn complex_vfs(builder: KmtBuilder) -> KmtBuilder {
    builder
        // Standard directories
        .directory("/home")
        .directory("/tmp")
        .directory("/usr")
        .directory("/usr/bin")
        .directory("/usr/local")
        .directory("/var")
        .directory("/var/log")
        // Home directory
        .directory("/home/user")
        .directory("/home/user/projects")
        .directory("/home/user/documents")
        .file(
            "/home/user/readme.txt",
            "Welcome to Koma!\n\nThis is a test environment.",
        )
        .file("/home/user/.bashrc", r#"export PS1="\u@\h:\w\$ ""#)
        .file("/home/user/.profile", "# User profile")
        // Projects
        .file("/home/user/projects/app.js", r#"console.log("Hello");"#)
        .file(
            "/home/user/projects/package.json",
            r#"{"name":"app","version":"1.0.0"}"#,
        )
        .file("/home/user/projects/README.md", "# My Project\n\nA test project.")
        // Documents
        .file(
            "/home/user/documents/notes.txt",
            "Meeting notes\n- Topic 1\n- Topic 2",
        )
        .file(
            "/home/user/documents/todo.txt",
            "[] Task 1\n[] Task 2\n[x] Task 3",
        )
        // Logs
        .file(
            "/var/log/system.log",
            "INFO: System started\nWARN: Low memory\nERROR: Connection failed",
        )
        .file(
            "/var/log/app.log",
            "2024-01-01 10:00:00 - Application started",
        )
        // Binary-like content, one code point per byte
        .file("/tmp/binary.dat", "\u{0}\u{1}\u{2}\u{ff}\u{fe}")
        // Special names
        .file("/tmp/file with spaces.txt", "content with spaces")
        .file("/tmp/file-with-dashes.txt", "content with dashes")
        .file("/tmp/.hidden-file", "hidden content")
}

/// A fixture written by [`write_catalog`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFixture {
    /// Fixture name
    pub name: &'static str,
    /// Output file
    pub path: PathBuf,
    /// Header stats of the written container
    pub stats: Stats,
}

/// Write every catalog fixture as `<name>.kmt` into `dir`
///
/// `dir` is created if needed. Without a timestamp each fixture is stamped
/// with the current time.
pub fn write_catalog(dir: &Path, timestamp: Option<&Timestamp>) -> KmtResult<Vec<WrittenFixture>> {
    fs::create_dir_all(dir).map_err(|source| KmtError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(CATALOG.len());
    for fixture in catalog() {
        let builder = fixture.builder();
        let builder = match timestamp {
            Some(timestamp) => builder.timestamp(timestamp.clone()),
            None => builder,
        };
        let container = builder.build()?;

        let path = dir.join(fixture.file_name());
        save_container(&container, &path)?;

        let stats = container.stats();
        info!(
            "Generated {}: {} directories, {} files, {} bytes",
            path.display(),
            stats.directories,
            stats.files,
            stats.size
        );
        written.push(WrittenFixture {
            name: fixture.name,
            path,
            stats,
        });
    }
    Ok(written)
}

/// Write a container as a pretty-printed document
pub fn save_container(container: &KmtContainer, path: &Path) -> KmtResult<()> {
    let document = container.to_json_pretty()?;
    fs::write(path, document).map_err(|source| KmtError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Saved container '{}' to {}", container.label(), path.display());
    Ok(())
}

/// Read and parse a container document
pub fn load_container(path: &Path) -> KmtResult<KmtContainer> {
    let document = fs::read(path).map_err(|source| KmtError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    KmtContainer::parse(&document)
}

/// Load a fixture file and restore it into `vfs`
///
/// Container errors propagate unchanged. `vfs` is only modified on success,
/// or when it fails partway through, which is reported as
/// [`KmtError::PartialRestore`].
pub fn restore_from_fixture<V>(
    vfs: &mut V,
    path: &Path,
    options: &RestoreOptions,
) -> KmtResult<RestoreReport>
where
    V: Vfs + ?Sized,
{
    let container = load_container(path)?;
    let report = container.restore_into(vfs, options)?;
    debug!(
        "Restored fixture {}: {} directories, {} files",
        path.display(),
        report.directories,
        report.files
    );
    Ok(report)
}
