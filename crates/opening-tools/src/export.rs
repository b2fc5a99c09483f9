//! Writers for the tab-separated tables and the final JSON document.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::ToolError;

/// Write `key<TAB>value` rows.
pub fn write_table<W, K, V, I>(writer: W, rows: I) -> Result<usize, ToolError>
where
    W: Write,
    K: Display,
    V: Display,
    I: IntoIterator<Item = (K, V)>,
{
    let mut out = BufWriter::new(writer);
    let mut n = 0;
    for (key, value) in rows {
        writeln!(out, "{key}\t{value}")?;
        n += 1;
    }
    out.flush()?;
    Ok(n)
}

/// Serialize `value` as JSON indented with four spaces.
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<(), ToolError> {
    let mut out = BufWriter::new(writer);
    let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    out.flush()?;
    Ok(())
}

pub fn write_json_file<P: AsRef<Path>, T: Serialize + ?Sized>(
    path: P,
    value: &T,
) -> Result<(), ToolError> {
    write_json(File::create(path)?, value)
}
