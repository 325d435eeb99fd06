//! Output formatting: JSON, YAML, table.
//!
//! API responses are untyped JSON, so the table renderer derives its columns
//! from the keys of the rows it is given. Listings are tabulated by their
//! `results` array; any other object becomes a two-column field/value table.

use std::io::{self, Write};

use serde_json::{Map, Value};
use tabled::{builder::Builder, settings::Style};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Render dispatcher ────────────────────────────────────────────────

/// Render a response in the chosen format.
pub fn render(format: OutputFormat, value: &Value) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::JsonCompact => serde_json::to_string(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
        OutputFormat::Table => render_table(value),
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", output.trim_end());
}

// ── Table rendering ──────────────────────────────────────────────────

fn render_table(value: &Value) -> String {
    match value {
        Value::Object(map) => match map.get("results") {
            Some(Value::Array(rows)) => rows_table(rows),
            _ => fields_table(map),
        },
        Value::Array(rows) => rows_table(rows),
        scalar => cell(scalar),
    }
}

/// One row per element; columns are the union of object keys in first-seen order.
fn rows_table(rows: &[Value]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        if let Value::Object(map) = row {
            for key in map.keys() {
                if !columns.contains(&key.as_str()) {
                    columns.push(key.as_str());
                }
            }
        }
    }

    let mut builder = Builder::default();
    if columns.is_empty() {
        builder.push_record(["value"]);
        for row in rows {
            builder.push_record([cell(row)]);
        }
    } else {
        builder.push_record(columns.iter().copied());
        for row in rows {
            builder.push_record(
                columns
                    .iter()
                    .map(|col| row.get(*col).map(cell).unwrap_or_default()),
            );
        }
    }
    builder.build().with(Style::rounded()).to_string()
}

fn fields_table(map: &Map<String, Value>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["field", "value"]);
    for (key, value) in map {
        builder.push_record([key.clone(), cell(value)]);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Strings unquoted, null blank, nested values as compact JSON.
fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
