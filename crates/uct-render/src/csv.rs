//! CSV output, one file per use case
//!
//! Layout mirrors the text report: actor header, main rows, two blank
//! records, then per branch table its label, the actor header again, its
//! rows and two blank records.
//!
//! Dialect: comma separated, `\r\n` terminated, fields quoted only when
//! they contain a comma, a quote or a line break. A record made of a single
//! empty field is written as `""` so it stays distinguishable from a blank
//! record.

use crate::error::{RenderError, RenderResult};
use std::path::Path;
use uct_model::Tables;

const DELIMITER: char = ',';
const QUOTE: char = '"';
const TERMINATOR: &str = "\r\n";

/// Render the CSV document for one use case
#[must_use]
pub fn render_csv(tables: &Tables, actors: &[String]) -> String {
    let mut out = String::new();

    record(&mut out, actors);
    for row in &tables.main {
        record(&mut out, row);
    }
    blank(&mut out, 2);

    for table in &tables.special {
        record(&mut out, &[table.label()]);
        record(&mut out, actors);
        for row in &table.rows {
            record(&mut out, row);
        }
        blank(&mut out, 2);
    }

    out
}

/// Write the CSV document for one use case to `path`, replacing any previous file
///
/// # Errors
/// `RenderError::Io` if the file cannot be written
pub fn write_csv(path: impl AsRef<Path>, tables: &Tables, actors: &[String]) -> RenderResult<()> {
    let path = path.as_ref();
    std::fs::write(path, render_csv(tables, actors)).map_err(|e| RenderError::io_error(path, e))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

fn record<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    if let [only] = fields {
        if only.as_ref().is_empty() {
            out.push(QUOTE);
            out.push(QUOTE);
            out.push_str(TERMINATOR);
            return;
        }
    }

    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        push_field(out, field.as_ref());
    }
    out.push_str(TERMINATOR);
}

fn blank(out: &mut String, count: usize) {
    for _ in 0..count {
        out.push_str(TERMINATOR);
    }
}

fn push_field(out: &mut String, field: &str) {
    let needs_quotes = field
        .chars()
        .any(|c| c == DELIMITER || c == QUOTE || c == '\r' || c == '\n');

    if !needs_quotes {
        out.push_str(field);
        return;
    }

    out.push(QUOTE);
    for c in field.chars() {
        if c == QUOTE {
            out.push(QUOTE);
        }
        out.push(c);
    }
    out.push(QUOTE);
}
