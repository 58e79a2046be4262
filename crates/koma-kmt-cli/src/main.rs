use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use koma_kmt_cli::output::OutputStyle;
use koma_kmt_cli::{Commands, OutputFormat, commands};

#[derive(Parser)]
#[command(
    name = "kmt",
    about = "Generate, inspect and verify Koma Tape (.kmt) VFS backups",
    version,
    author
)]
struct Cli {
    /// Set the logging level
    #[arg(
        short,
        long,
        value_enum,
        env = "KMT_LOG_LEVEL",
        global = true,
        default_value = "info"
    )]
    log_level: LogLevel,

    /// Output format
    #[arg(short = 'o', long, value_enum, global = true, default_value = "text")]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG directives override the level flag
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(Level::from(cli.log_level)).into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let style = if cli.no_color {
        OutputStyle::new().no_color()
    } else {
        OutputStyle::new()
    };

    let output = commands::run(&cli.command, cli.format, &style)?;
    println!("{output}");
    Ok(())
}
