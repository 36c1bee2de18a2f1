//! Plain-text report
//!
//! Each use case becomes one block: the title, the main table, every branch
//! table under its label, and a closing rule of `=` characters. Blocks are
//! appended to a shared writer so one report covers a whole batch.
//!
//! Tables are drawn as outlined grids:
//!
//! ```text
//! ┌─────────────────┬───────────────────┐
//! │ Buyer           │ Seller            │
//! ├─────────────────┼───────────────────┤
//! │ 1. Places order │                   │
//! │                 │ 2. Confirms order │
//! └─────────────────┴───────────────────┘
//! ```

use crate::error::RenderResult;
use std::fmt::{self, Write as _};
use std::io::Write;
use uct_model::{Row, Tables};

/// Width of the rule closing every block
pub const SEPARATOR_WIDTH: usize = 78;

/// Extra width every column reserves beyond its header
const MIN_PADDING: usize = 2;

/// Outlined grid with a header row
#[derive(Debug, Clone, Copy)]
pub struct Grid<'a> {
    headers: &'a [String],
    rows: &'a [Row],
}

impl<'a> Grid<'a> {
    /// Create grid over `rows` with `headers` as the first line
    #[inline]
    #[must_use]
    pub fn new(headers: &'a [String], rows: &'a [Row]) -> Self {
        Self { headers, rows }
    }

    /// Inner width of every column, padding excluded
    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(column, header)| {
                let widest_cell = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(column))
                    .map(|cell| text_width(cell.trim()))
                    .max()
                    .unwrap_or(0);
                (text_width(header) + MIN_PADDING).max(widest_cell)
            })
            .collect()
    }
}

impl fmt::Display for Grid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.headers.is_empty() {
            return Ok(());
        }

        let widths = self.widths();
        rule(f, &widths, ['┌', '┬', '┐'])?;
        f.write_char('\n')?;
        cells(f, &widths, self.headers)?;
        f.write_char('\n')?;
        rule(f, &widths, ['├', '┼', '┤'])?;
        f.write_char('\n')?;
        for row in self.rows {
            cells(f, &widths, row)?;
            f.write_char('\n')?;
        }
        rule(f, &widths, ['└', '┴', '┘'])
    }
}

/// Horizontal rule: left corner, column joints, right corner
fn rule(
    f: &mut fmt::Formatter<'_>,
    widths: &[usize],
    [left, joint, right]: [char; 3],
) -> fmt::Result {
    f.write_char(left)?;
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            f.write_char(joint)?;
        }
        for _ in 0..width + 2 {
            f.write_char('─')?;
        }
    }
    f.write_char(right)
}

/// One logical row; cells holding newlines make it several lines tall
///
/// Surrounding whitespace of a cell is dropped, the header is kept as is.
fn cells(f: &mut fmt::Formatter<'_>, widths: &[usize], row: &[String]) -> fmt::Result {
    let split: Vec<Vec<&str>> = widths
        .iter()
        .enumerate()
        .map(|(column, _)| {
            row.get(column)
                .map_or_else(|| vec![""], |cell| cell.trim().split('\n').collect())
        })
        .collect();
    let height = split.iter().map(Vec::len).max().unwrap_or(1);

    for line in 0..height {
        if line > 0 {
            f.write_char('\n')?;
        }
        f.write_char('│')?;
        for (lines, &width) in split.iter().zip(widths) {
            let text = lines.get(line).copied().unwrap_or("");
            write!(f, " {text:<width$} │")?;
        }
    }
    Ok(())
}

/// Display width of the widest line of `text`
fn text_width(text: &str) -> usize {
    text.split('\n')
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
}

/// Render the report block for one use case
#[must_use]
pub fn render_report(title: &str, tables: &Tables, actors: &[String]) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = write!(out, "{title}\n\n{}", Grid::new(actors, &tables.main));
    for table in &tables.special {
        let _ = write!(out, "\n\n{}\n{}", table.label(), Grid::new(actors, &table.rows));
    }
    let _ = write!(out, "\n\n\n{}\n\n\n", "=".repeat(SEPARATOR_WIDTH));

    out
}

/// Append the report block for one use case to `writer`
///
/// The block is rendered completely before anything is written.
///
/// # Errors
/// `RenderError::Write` if the writer fails
pub fn write_report<W: Write>(
    writer: &mut W,
    title: &str,
    tables: &Tables,
    actors: &[String],
) -> RenderResult<()> {
    let block = render_report(title, tables, actors);
    writer.write_all(block.as_bytes())?;
    tracing::debug!("Appended {} bytes of report for '{}'", block.len(), title);
    Ok(())
}
