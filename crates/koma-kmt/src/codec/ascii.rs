//! ASCII-only JSON output
//!
//! Every character outside printable ASCII is written as a lowercase
//! `\uXXXX` escape (surrogate pairs above the BMP), DEL included. Control
//! characters keep serde_json's own escapes, which already use the short
//! forms and lowercase hex. The result matches `json.dumps` with its default
//! `ensure_ascii`, so documents written by either tool are byte-identical.

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter, Serializer};
use std::io::{self, Write};

/// Formatter wrapper that escapes non-ASCII string content
#[derive(Debug, Clone)]
pub struct AsciiEscaped<F> {
    inner: F,
}

impl<F> AsciiEscaped<F> {
    /// Wrap a formatter
    pub const fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F: Formatter> Formatter for AsciiEscaped<F> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;
        for (idx, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\x7f' {
                continue;
            }
            if start < idx {
                writer.write_all(&fragment.as_bytes()[start..idx])?;
            }
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = idx + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        self.inner.end_object_value(writer)
    }
}

/// Serialize `value` as compact ASCII JSON with no whitespace
pub fn to_compact_string<T>(value: &T) -> serde_json::Result<String>
where
    T: ?Sized + Serialize,
{
    write_with(value, AsciiEscaped::new(CompactFormatter))
}

/// Serialize `value` as ASCII JSON indented by two spaces
pub fn to_pretty_string<T>(value: &T) -> serde_json::Result<String>
where
    T: ?Sized + Serialize,
{
    write_with(value, AsciiEscaped::new(PrettyFormatter::with_indent(b"  ")))
}

fn write_with<T, F>(value: &T, formatter: F) -> serde_json::Result<String>
where
    T: ?Sized + Serialize,
    F: Formatter,
{
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer)
        .map_err(|e| serde_json::Error::io(io::Error::new(io::ErrorKind::InvalidData, e)))
}
