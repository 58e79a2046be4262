use crate::output::{OutputStyle, Tone, field_line, paint};
use crate::{InspectArgs, OutputFormat};
use anyhow::Context;
use koma_kmt::fixtures::load_container;

/// Print a container header; `data` is never decoded
pub fn handle(args: &InspectArgs, format: OutputFormat, style: &OutputStyle) -> anyhow::Result<String> {
    let container = load_container(&args.file)
        .with_context(|| format!("failed to load {}", args.file.display()))?;
    let summary = container.summary();

    if format != OutputFormat::Text {
        return Ok(format.to_json(&summary)?);
    }

    let checksum = format!(
        "{} {}",
        summary.checksum.algorithm,
        paint(&summary.checksum.uncompressed, Tone::Digest, style)
    );
    let lines = [
        field_line("File", &args.file.display().to_string(), style),
        field_line("Label", &summary.label, style),
        field_line("Version", &summary.version.to_string(), style),
        field_line("Created", summary.created.as_str(), style),
        field_line("Compression", summary.compression.as_str(), style),
        field_line("Checksum", &checksum, style),
        field_line("Directories", &summary.stats.directories.to_string(), style),
        field_line("Files", &summary.stats.files.to_string(), style),
        field_line("Payload bytes", &summary.stats.size.to_string(), style),
        field_line("Data length", &summary.data_length.to_string(), style),
    ];
    Ok(lines.join("\n"))
}
