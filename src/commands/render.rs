//! Output rendering: column-aligned tables and indented JSON.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};
use tabled::builder::Builder;
use tabled::settings::{Padding, Style};

/// Spaces between table columns.
const COLUMN_PADDING: usize = 3;

const JSON_INDENT: &[u8] = b"    ";

/// Renders `rows` as a table with a header line.
///
/// Borderless, with [`COLUMN_PADDING`] spaces after every column and no
/// trailing whitespace. Cells are looked up by column name in each row
/// object; missing keys and `null` render as empty cells.
#[must_use]
pub fn table<'a>(columns: &[&str], rows: impl IntoIterator<Item = &'a Value>) -> String {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().copied());
    for row in rows {
        builder.push_record(columns.iter().map(|c| cell(row.get(*c))));
    }

    let mut table = builder.build();
    table
        .with(Style::empty())
        .with(Padding::new(0, COLUMN_PADDING, 0, 0));

    let mut out = String::new();
    for line in table.to_string().lines() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Pretty-prints a JSON value with four-space indentation and a trailing newline.
#[must_use]
pub fn pretty_json<T: Serialize + ?Sized>(value: &T) -> String {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    match value.serialize(&mut serializer) {
        Ok(()) => {
            let mut text = String::from_utf8_lossy(&buf).into_owned();
            text.push('\n');
            text
        }
        // Only non-string map keys fail, and decoded JSON has none.
        Err(_) => serde_json::to_string(value).unwrap_or_default() + "\n",
    }
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
