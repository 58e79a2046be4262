//! Command-line front end for Koma Tape (`.kmt`) backups
//!
//! The `kmt` binary is a thin wrapper: argument types live here so the
//! command handlers can be exercised without spawning a process.

pub mod commands;
pub mod output;

use clap::{Args, Subcommand, ValueEnum};
use koma_kmt::{AncestorPolicy, RestoreOptions, StatsPolicy, Timestamp};
use serde::Serialize;
use std::path::PathBuf;

/// Output format for command results
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,
    /// JSON output
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

impl OutputFormat {
    /// Serialize `value` for the JSON formats
    pub fn to_json<T: Serialize>(self, value: &T) -> serde_json::Result<String> {
        if self == Self::JsonPretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }
}

/// `kmt` subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write the fixture catalog as .kmt files
    Generate(GenerateArgs),

    /// Show a container's header without decoding its data
    Inspect(InspectArgs),

    /// Decode, verify and replay a container
    Verify(VerifyArgs),

    /// Restore a container and print its directory tree
    Ls(LsArgs),
}

/// Arguments for `kmt generate`
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Directory to write fixtures into
    #[arg(short = 'd', long, env = "KMT_FIXTURES_DIR", default_value = "./fixtures")]
    pub out_dir: PathBuf,

    /// Timestamp for every fixture (RFC 3339, UTC), defaults to now
    #[arg(short, long, env = "KMT_TIMESTAMP")]
    pub timestamp: Option<Timestamp>,
}

/// Arguments for `kmt inspect`
#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Container file
    pub file: PathBuf,
}

/// Restore policy flags shared by `verify` and `ls`
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct RestoreFlags {
    /// Warn instead of failing when header stats disagree with the payload
    #[arg(long)]
    pub lenient_stats: bool,

    /// Create parent directories missing from the snapshot
    #[arg(long)]
    pub auto_create_parents: bool,
}

impl RestoreFlags {
    /// Restore options selected by the flags
    pub fn options(self) -> RestoreOptions {
        let mut options = RestoreOptions::new();
        if self.lenient_stats {
            options = options.with_stats_policy(StatsPolicy::Warn);
        }
        if self.auto_create_parents {
            options = options.with_ancestor_policy(AncestorPolicy::AutoCreate);
        }
        options
    }
}

/// Arguments for `kmt verify`
#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    /// Container file
    pub file: PathBuf,

    #[command(flatten)]
    pub restore: RestoreFlags,
}

/// Arguments for `kmt ls`
#[derive(Args, Debug, Clone)]
pub struct LsArgs {
    /// Container file
    pub file: PathBuf,

    /// Directory or file to show
    #[arg(default_value = "/")]
    pub path: String,

    #[command(flatten)]
    pub restore: RestoreFlags,
}
