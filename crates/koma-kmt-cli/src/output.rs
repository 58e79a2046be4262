//! Terminal rendering for `kmt` output

use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, presets};
use owo_colors::OwoColorize;

/// Color and glyph settings for text output
#[derive(Debug, Clone, Copy)]
pub struct OutputStyle {
    /// Emit ANSI colors
    pub use_color: bool,
    /// Use box-drawing characters for tables and trees
    pub use_unicode: bool,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            // https://no-color.org
            use_color: std::env::var_os("NO_COLOR").is_none(),
            use_unicode: true,
        }
    }
}

impl OutputStyle {
    /// Style from the environment
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Colorless ASCII output, stable across terminals
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            use_color: false,
            use_unicode: false,
        }
    }

    /// Same style without colors
    #[must_use]
    pub const fn no_color(self) -> Self {
        Self {
            use_color: false,
            ..self
        }
    }
}

/// How a piece of text should stand out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Successful verification or generation
    Ok,
    /// Non-fatal findings such as lenient stats or created parents
    Warn,
    /// Header field names
    Label,
    /// Directory names in trees
    Directory,
    /// Checksums
    Digest,
}

/// Apply a tone to `text` when colors are enabled
pub fn paint(text: &str, tone: Tone, style: &OutputStyle) -> String {
    if !style.use_color {
        return text.to_string();
    }
    match tone {
        Tone::Ok => text.green().to_string(),
        Tone::Warn => text.yellow().to_string(),
        Tone::Label => text.cyan().to_string(),
        Tone::Directory => text.bold().bright_blue().to_string(),
        Tone::Digest => text.dimmed().to_string(),
    }
}

/// `label: value` line for header listings
pub fn field_line(label: &str, value: &str, style: &OutputStyle) -> String {
    format!("{}: {value}", paint(label, Tone::Label, style))
}

/// Table with borders matching the style
pub fn create_table(style: &OutputStyle) -> Table {
    let mut table = Table::new();
    if style.use_unicode {
        table
            .load_preset(presets::UTF8_FULL)
            .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(presets::ASCII_FULL);
    }
    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table
}

/// Bold column header, cyan when colors are enabled
pub fn header_cell(text: &str, style: &OutputStyle) -> Cell {
    let cell = Cell::new(text).add_attribute(Attribute::Bold);
    if style.use_color { cell.fg(Color::Cyan) } else { cell }
}

/// Right-aligned count or byte size
pub fn numeric_cell(value: u64) -> Cell {
    Cell::new(value).set_alignment(CellAlignment::Right)
}

/// Tree branch glyphs: (branch, last branch, continuation, blank)
pub const fn tree_glyphs(style: &OutputStyle) -> (&'static str, &'static str, &'static str, &'static str) {
    if style.use_unicode {
        ("├── ", "└── ", "│   ", "    ")
    } else {
        ("|-- ", "`-- ", "|   ", "    ")
    }
}
