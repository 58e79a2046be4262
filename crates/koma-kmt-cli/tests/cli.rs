#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use koma_kmt::fixtures::save_container;
use koma_kmt::{KmtBuilder, Timestamp};
use koma_kmt_cli::output::OutputStyle;
use koma_kmt_cli::{
    Commands, GenerateArgs, InspectArgs, LsArgs, OutputFormat, RestoreFlags, VerifyArgs, commands,
};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn generate(dir: &Path) -> String {
    let command = Commands::Generate(GenerateArgs {
        out_dir: dir.to_path_buf(),
        timestamp: Some(Timestamp::parse("2024-01-01T00:00:00.000Z").unwrap()),
    });
    commands::run(&command, OutputFormat::Text, &OutputStyle::plain()).unwrap()
}

fn fixture(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.kmt"))
}

fn verify_args(file: PathBuf) -> VerifyArgs {
    VerifyArgs {
        file,
        restore: RestoreFlags::default(),
    }
}

#[test]
fn test_generate_writes_catalog() {
    let dir = TempDir::new().unwrap();
    let text = generate(dir.path());

    assert!(text.contains("complex-vfs"));
    assert!(text.contains("Generated 8 fixtures"));
    assert!(fixture(dir.path(), "ls-test").exists());
}

#[test]
fn test_generate_json_rows() {
    let dir = TempDir::new().unwrap();
    let command = Commands::Generate(GenerateArgs {
        out_dir: dir.path().to_path_buf(),
        timestamp: Some(Timestamp::parse("2024-01-01T00:00:00.000Z").unwrap()),
    });
    let json = commands::run(&command, OutputFormat::Json, &OutputStyle::plain()).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&json).unwrap();

    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 8);
    let basic = rows.iter().find(|row| row["name"] == "basic-vfs").unwrap();
    assert_eq!(basic["directories"], 2);
    assert_eq!(basic["files"], 0);
    assert_eq!(basic["size"], 222);
}

#[test]
fn test_inspect_reports_header() {
    let dir = TempDir::new().unwrap();
    generate(dir.path());

    let command = Commands::Inspect(InspectArgs {
        file: fixture(dir.path(), "ls-test"),
    });
    let text = commands::run(&command, OutputFormat::Text, &OutputStyle::plain()).unwrap();

    assert!(text.contains("Version: 1.0"));
    assert!(text.contains("Created: 2024-01-01T00:00:00.000Z"));
    assert!(text.contains("Compression: none"));
    assert!(text.contains(
        "Checksum: sha256 05933d302f6d4ef348be8f883530fe23c72b84835241c41c71b4544e8565e1cd"
    ));
    assert!(text.contains("Files: 4"));
    assert!(text.contains("Payload bytes: 825"));
}

#[test]
fn test_inspect_json_summary() {
    let dir = TempDir::new().unwrap();
    generate(dir.path());

    let command = Commands::Inspect(InspectArgs {
        file: fixture(dir.path(), "empty-vfs"),
    });
    let json = commands::run(&command, OutputFormat::JsonPretty, &OutputStyle::plain()).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(summary["version"], "1.0");
    assert_eq!(summary["stats"]["size"], 2);
    assert_eq!(summary["data_length"], 4);
}

#[test]
fn test_verify_generated_fixtures() {
    let dir = TempDir::new().unwrap();
    generate(dir.path());

    for name in ["empty-vfs", "pipes-test", "complex-vfs"] {
        let command = Commands::Verify(verify_args(fixture(dir.path(), name)));
        let text = commands::run(&command, OutputFormat::Text, &OutputStyle::plain()).unwrap();
        assert!(text.starts_with("OK "), "{name}: {text}");
    }
}

#[test]
fn test_verify_rejects_tampered_checksum() {
    let dir = TempDir::new().unwrap();
    generate(dir.path());

    let path = fixture(dir.path(), "basic-vfs");
    let document = std::fs::read_to_string(&path).unwrap();
    let tampered = document.replace(
        "dc7b0e9bba6103b9cac02a04a05560057c2b3bdd563bc93c4a433b738d530ddc",
        "0000000000000000000000000000000000000000000000000000000000000000",
    );
    assert_ne!(document, tampered);
    std::fs::write(&path, tampered).unwrap();

    let command = Commands::Verify(verify_args(path));
    let err = commands::run(&command, OutputFormat::Text, &OutputStyle::plain()).unwrap_err();
    assert!(format!("{err:#}").contains("failed verification"));
}

#[test]
fn test_verify_lenient_stats_warns() {
    let dir = TempDir::new().unwrap();
    generate(dir.path());

    let path = fixture(dir.path(), "basic-vfs");
    let document = std::fs::read_to_string(&path).unwrap();
    let tampered = document.replace("\"directories\": 2", "\"directories\": 7");
    assert_ne!(document, tampered);
    std::fs::write(&path, tampered).unwrap();

    let strict = Commands::Verify(verify_args(path.clone()));
    assert!(commands::run(&strict, OutputFormat::Text, &OutputStyle::plain()).is_err());

    let lenient = Commands::Verify(VerifyArgs {
        file: path,
        restore: RestoreFlags {
            lenient_stats: true,
            auto_create_parents: false,
        },
    });
    let json = commands::run(&lenient, OutputFormat::Json, &OutputStyle::plain()).unwrap();
    let report: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(report["stats_mismatches"], 1);
    assert_eq!(report["directories"], 2);
}

#[test]
fn test_verify_missing_file() {
    let dir = TempDir::new().unwrap();
    let command = Commands::Verify(verify_args(dir.path().join("absent.kmt")));
    let err = commands::run(&command, OutputFormat::Text, &OutputStyle::plain()).unwrap_err();
    assert!(format!("{err:#}").contains("failed to load"));
}

#[test]
fn test_ls_tree() {
    let dir = TempDir::new().unwrap();
    generate(dir.path());

    let command = Commands::Ls(LsArgs {
        file: fixture(dir.path(), "ls-test"),
        path: "/".to_string(),
        restore: RestoreFlags::default(),
    });
    let text = commands::run(&command, OutputFormat::Text, &OutputStyle::plain()).unwrap();

    assert!(text.starts_with("/\n"));
    assert!(text.contains("home/"));
    assert!(text.contains("file1.txt ("));
}

#[test]
fn test_ls_unknown_path() {
    let dir = TempDir::new().unwrap();
    generate(dir.path());

    let command = Commands::Ls(LsArgs {
        file: fixture(dir.path(), "basic-vfs"),
        path: "/missing".to_string(),
        restore: RestoreFlags::default(),
    });
    assert!(commands::run(&command, OutputFormat::Text, &OutputStyle::plain()).is_err());
}

#[test]
fn test_ls_auto_creates_missing_parents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orphan.kmt");
    let container = KmtBuilder::new("orphan")
        .timestamp(Timestamp::parse("2024-01-01T00:00:00.000Z").unwrap())
        .file("/srv/www/index.html", "<h1>hi</h1>")
        .build()
        .unwrap();
    save_container(&container, &path).unwrap();

    let strict = Commands::Ls(LsArgs {
        file: path.clone(),
        path: "/".to_string(),
        restore: RestoreFlags::default(),
    });
    assert!(commands::run(&strict, OutputFormat::Text, &OutputStyle::plain()).is_err());

    let lenient = Commands::Ls(LsArgs {
        file: path,
        path: "/".to_string(),
        restore: RestoreFlags {
            lenient_stats: false,
            auto_create_parents: true,
        },
    });
    let text = commands::run(&lenient, OutputFormat::Text, &OutputStyle::plain()).unwrap();
    assert_eq!(text, "/\n`-- srv/\n    `-- www/\n        `-- index.html (11)");
}

#[test]
fn test_restore_flags_select_policies() {
    use koma_kmt::{AncestorPolicy, RestoreOptions, StatsPolicy};

    assert_eq!(RestoreFlags::default().options(), RestoreOptions::default());
    let options = RestoreFlags {
        lenient_stats: true,
        auto_create_parents: true,
    }
    .options();
    assert_eq!(options.stats, StatsPolicy::Warn);
    assert_eq!(options.ancestors, AncestorPolicy::AutoCreate);
}
