//! LaTeX table injection
//!
//! Tables are written as `longtable` environments into an existing
//! document, right after the first line matching the use case's anchor
//! pattern. The generated lines sit inside a [`MarkedBlock`] whose
//! sentinels are derived from the anchor, so re-running replaces the
//! previous output rather than stacking copies.

use crate::error::{RenderError, RenderResult};
use crate::splice::MarkedBlock;
use regex::Regex;
use std::io::Write;
use std::path::Path;
use uct_model::{Row, Tables};

/// Share of `\textwidth` split across the actor columns
const TABLE_WIDTH: f64 = 0.9;

/// Result of splicing tables into a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceOutcome {
    /// Tables were written; `replaced` is set when an earlier block was removed
    Spliced {
        /// Whether a previous block was found and removed
        replaced: bool,
    },
    /// No line matches the anchor; the document was left untouched
    AnchorNotFound,
}

/// Tag identifying a use case's block: characters 1 to 4 of the marker
///
/// Shorter markers give shorter (possibly empty) tags.
#[must_use]
pub fn sentinel_tag(marker: &str) -> String {
    marker.chars().skip(1).take(4).collect()
}

/// Sentinel pair for the block belonging to `marker`
#[must_use]
pub fn sentinels(marker: &str) -> MarkedBlock {
    let tag = sentinel_tag(marker);
    MarkedBlock::new(format!("% START {tag} TABLES"), format!("% END {tag} TABLES"))
}

/// Escape LaTeX special characters in cell text
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str(r"\newline "),
            _ => out.push(c),
        }
    }
    out
}

/// Lines of one `longtable`, optionally headed by a caption cell spanning all columns
fn table_lines(actors: &[String], caption: Option<&str>, rows: &[Row]) -> Vec<String> {
    let columns = actors.len().max(1);
    #[allow(clippy::cast_precision_loss)]
    let width = TABLE_WIDTH / columns as f64;
    let spec = format!("|p{{{width:.2}\\textwidth}}").repeat(columns);

    let mut lines = vec![format!("\\begin{{longtable}}{{{spec}|}}"), r"\hline".to_string()];
    if let Some(caption) = caption {
        lines.push(format!(
            "\\multicolumn{{{columns}}}{{|l|}}{{\\textbf{{{}}}}} \\\\",
            escape(caption)
        ));
        lines.push(r"\hline".to_string());
    }

    let header: Vec<String> = actors
        .iter()
        .map(|a| format!("\\textbf{{{}}}", escape(a)))
        .collect();
    lines.push(format!("{} \\\\", header.join(" & ")));
    lines.push(r"\hline".to_string());
    lines.push(r"\endhead".to_string());

    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| escape(cell)).collect();
        lines.push(format!("{} \\\\", cells.join(" & ")));
        lines.push(r"\hline".to_string());
    }

    lines.push(r"\end{longtable}".to_string());
    lines
}

/// Body of the generated block: the main table, then every branch table
#[must_use]
pub fn render_tables(tables: &Tables, actors: &[String]) -> Vec<String> {
    let mut body = table_lines(actors, None, &tables.main);
    for table in &tables.special {
        body.push(String::new());
        body.extend(table_lines(actors, Some(table.label().as_str()), &table.rows));
    }
    body
}

/// Splice `body` into `lines` after the first line matching `anchor`
///
/// An existing block with the same sentinels is removed first. When the
/// anchor does not match, `lines` is left unchanged.
pub fn splice_lines(
    lines: &mut Vec<String>,
    anchor: &Regex,
    block: &MarkedBlock,
    body: Vec<String>,
) -> SpliceOutcome {
    let mut patched = lines.clone();
    let replaced = block.excise(&mut patched);

    let Some(index) = patched.iter().position(|line| anchor.is_match(line)) else {
        return SpliceOutcome::AnchorNotFound;
    };

    block.insert_after(&mut patched, index, body);
    *lines = patched;
    SpliceOutcome::Spliced { replaced }
}

/// Inject the tables into the document at `path`, after the line matching `marker`
///
/// The document is only rewritten when the anchor is found, and the
/// rewrite goes through a temporary file in the same directory.
///
/// # Errors
/// - `RenderError::InvalidMarker` if `marker` is not a valid pattern
/// - `RenderError::Io` if the document cannot be read or the copy written
/// - `RenderError::Persist` if the copy cannot replace the document
pub fn splice_into_document(
    path: impl AsRef<Path>,
    marker: &str,
    tables: &Tables,
    actors: &[String],
) -> RenderResult<SpliceOutcome> {
    let path = path.as_ref();
    let anchor = Regex::new(marker).map_err(|source| RenderError::InvalidMarker {
        marker: marker.to_string(),
        source,
    })?;

    let content = std::fs::read_to_string(path).map_err(|e| RenderError::io_error(path, e))?;
    let mut lines: Vec<String> = content.lines().map(String::from).collect();

    let block = sentinels(marker);
    tracing::debug!("Splicing block '{}' into {}", block.start(), path.display());

    let outcome = splice_lines(&mut lines, &anchor, &block, render_tables(tables, actors));
    if outcome == SpliceOutcome::AnchorNotFound {
        tracing::warn!(
            "No line of {} matches '{}', LaTeX tables skipped",
            path.display(),
            marker
        );
        return Ok(outcome);
    }

    let mut patched = lines.join("\n");
    if content.ends_with('\n') {
        patched.push('\n');
    }
    replace_file(path, &patched)?;

    tracing::info!("Updated {}", path.display());
    Ok(outcome)
}

/// Replace `path` with `content` via a sibling temporary file
fn replace_file(path: &Path, content: &str) -> RenderResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| RenderError::io_error(dir, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| RenderError::io_error(file.path(), e))?;
    file.persist(path).map_err(|e| RenderError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uct_model::{BranchKind, SpecialTable};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn tag_uses_characters_one_to_four() {
        assert_eq!(sentinel_tag("UC01 Checkout"), "C01 ");
        assert_eq!(sentinel_tag("section{UC02}"), "ecti");
    }

    #[test]
    fn tag_of_short_markers() {
        assert_eq!(sentinel_tag("UC012"), "C012");
        assert_eq!(sentinel_tag("UC1"), "C1");
        assert_eq!(sentinel_tag("U"), "");
        assert_eq!(sentinel_tag(""), "");
    }

    #[test]
    fn tag_counts_characters_not_bytes() {
        assert_eq!(sentinel_tag("ÜÇ0ß9x"), "Ç0ß9");
    }

    #[test]
    fn sentinel_lines() {
        let block = sentinels("UC1");
        assert_eq!(block.start(), "% START C1 TABLES");
        assert_eq!(block.end(), "% END C1 TABLES");
    }

    #[test]
    fn escape_special_characters() {
        assert_eq!(escape("50% of $x_1 & {y}"), r"50\% of \$x\_1 \& \{y\}");
        assert_eq!(
            escape(r"a\b~c^d#"),
            r"a\textbackslash{}b\textasciitilde{}c\textasciicircum{}d\#"
        );
        assert_eq!(escape("one\ntwo"), r"one\newline two");
    }

    #[test]
    fn main_table_lines() {
        let actors = strings(&["Buyer", "Seller"]);
        let tables = Tables {
            main: vec![strings(&["1. Places order", ""])],
            special: Vec::new(),
        };

        assert_eq!(
            render_tables(&tables, &actors),
            strings(&[
                r"\begin{longtable}{|p{0.45\textwidth}|p{0.45\textwidth}|}",
                r"\hline",
                r"\textbf{Buyer} & \textbf{Seller} \\",
                r"\hline",
                r"\endhead",
                r"1. Places order &  \\",
                r"\hline",
                r"\end{longtable}",
            ])
        );
    }

    #[test]
    fn special_table_has_merged_caption() {
        let actors = strings(&["A", "B", "C"]);
        let tables = Tables {
            main: Vec::new(),
            special: vec![SpecialTable {
                kind: BranchKind::Exception,
                index: 2,
                description: "Card_declined".to_string(),
                rows: vec![strings(&["Go To: 4", "", ""])],
            }],
        };

        let body = render_tables(&tables, &actors);
        assert_eq!(body[6], "");
        assert_eq!(
            body[7],
            r"\begin{longtable}{|p{0.30\textwidth}|p{0.30\textwidth}|p{0.30\textwidth}|}"
        );
        assert_eq!(body[9], r"\multicolumn{3}{|l|}{\textbf{Exceptions 2: Card\_declined}} \\");
        assert_eq!(body[14], r"Go To: 4 &  &  \\");
    }

    #[test]
    fn splice_inserts_after_anchor() {
        let mut lines = strings(&["intro", "\\section{UC01}", "text"]);
        let anchor = Regex::new("UC01").unwrap();
        let block = sentinels("UC01");

        let outcome = splice_lines(&mut lines, &anchor, &block, strings(&["TABLE"]));

        assert_eq!(outcome, SpliceOutcome::Spliced { replaced: false });
        assert_eq!(
            lines,
            strings(&[
                "intro",
                "\\section{UC01}",
                "% START C01 TABLES",
                "TABLE",
                "% END C01 TABLES",
                "text",
            ])
        );
    }

    #[test]
    fn splice_replaces_previous_block() {
        let mut lines = strings(&["\\section{UC01}", "text"]);
        let anchor = Regex::new("UC01").unwrap();
        let block = sentinels("UC01");

        splice_lines(&mut lines, &anchor, &block, strings(&["OLD"]));
        let outcome = splice_lines(&mut lines, &anchor, &block, strings(&["NEW"]));

        assert_eq!(outcome, SpliceOutcome::Spliced { replaced: true });
        assert_eq!(
            lines,
            strings(&[
                "\\section{UC01}",
                "% START C01 TABLES",
                "NEW",
                "% END C01 TABLES",
                "text",
            ])
        );
    }

    #[test]
    fn splice_without_anchor_leaves_lines() {
        let original = strings(&["a", "% START C01 TABLES", "OLD", "% END C01 TABLES"]);
        let mut lines = original.clone();
        let anchor = Regex::new("UC01").unwrap();

        let outcome = splice_lines(&mut lines, &anchor, &sentinels("UC01"), strings(&["NEW"]));

        assert_eq!(outcome, SpliceOutcome::AnchorNotFound);
        assert_eq!(lines, original);
    }
}
