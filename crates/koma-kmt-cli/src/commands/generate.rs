use crate::output::{OutputStyle, Tone, create_table, header_cell, numeric_cell, paint};
use crate::{GenerateArgs, OutputFormat};
use anyhow::Context;
use comfy_table::Cell;
use koma_kmt::fixtures::{self, WrittenFixture};
use serde::Serialize;

#[derive(Serialize)]
struct GeneratedFixture<'a> {
    name: &'a str,
    path: String,
    directories: u64,
    files: u64,
    size: u64,
}

impl<'a> From<&'a WrittenFixture> for GeneratedFixture<'a> {
    fn from(written: &'a WrittenFixture) -> Self {
        Self {
            name: written.name,
            path: written.path.display().to_string(),
            directories: written.stats.directories,
            files: written.stats.files,
            size: written.stats.size,
        }
    }
}

/// Write the fixture catalog
pub fn handle(
    args: &GenerateArgs,
    format: OutputFormat,
    style: &OutputStyle,
) -> anyhow::Result<String> {
    let written = fixtures::write_catalog(&args.out_dir, args.timestamp.as_ref())
        .with_context(|| format!("failed to write fixtures to {}", args.out_dir.display()))?;

    if format != OutputFormat::Text {
        let rows: Vec<GeneratedFixture<'_>> = written.iter().map(GeneratedFixture::from).collect();
        return Ok(format.to_json(&rows)?);
    }

    let mut table = create_table(style);
    table.set_header(vec![
        header_cell("Fixture", style),
        header_cell("Directories", style),
        header_cell("Files", style),
        header_cell("Bytes", style),
        header_cell("Path", style),
    ]);
    for fixture in &written {
        table.add_row(vec![
            Cell::new(fixture.name),
            numeric_cell(fixture.stats.directories),
            numeric_cell(fixture.stats.files),
            numeric_cell(fixture.stats.size),
            Cell::new(fixture.path.display()),
        ]);
    }

    let done = paint(
        &format!(
            "Generated {} fixtures in {}",
            written.len(),
            args.out_dir.display()
        ),
        Tone::Ok,
        style,
    );
    Ok(format!("{table}\n{done}"))
}
