use crate::output::{OutputStyle, Tone, paint};
use crate::{OutputFormat, VerifyArgs};
use anyhow::Context;
use koma_kmt::fixtures::load_container;
use serde::Serialize;

#[derive(Serialize)]
struct Verified<'a> {
    file: String,
    label: &'a str,
    directories: u64,
    files: u64,
    created_parents: &'a [String],
    stats_mismatches: usize,
}

/// Run the full restore pipeline against a container file
pub fn handle(args: &VerifyArgs, format: OutputFormat, style: &OutputStyle) -> anyhow::Result<String> {
    let container = load_container(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let report = container
        .verify(&args.restore.options())
        .with_context(|| format!("{} failed verification", args.file.display()))?;

    if format != OutputFormat::Text {
        let verified = Verified {
            file: args.file.display().to_string(),
            label: container.label(),
            directories: report.directories,
            files: report.files,
            created_parents: &report.created_parents,
            stats_mismatches: report.stats_mismatches,
        };
        return Ok(format.to_json(&verified)?);
    }

    let mut lines = vec![paint(
        &format!(
            "OK {} ({}): {} directories, {} files",
            args.file.display(),
            container.label(),
            report.directories,
            report.files
        ),
        Tone::Ok,
        style,
    )];
    for parent in &report.created_parents {
        lines.push(paint(&format!("created missing parent {parent}"), Tone::Warn, style));
    }
    if report.stats_mismatches > 0 {
        lines.push(paint(
            &format!("{} stats fields disagree with the payload", report.stats_mismatches),
            Tone::Warn,
            style,
        ));
    }
    Ok(lines.join("\n"))
}
