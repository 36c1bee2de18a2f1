//! Batch processing of a directory of use cases
//!
//! Every input goes through load → flatten → render, one file at a time.
//! Failure handling follows the blast radius of the error:
//! - a malformed document (or an unusable output) aborts the whole batch
//! - an unknown actor aborts only that use case, nothing is written for it
//! - a LaTeX anchor that matches no line only skips that use case's LaTeX output

use crate::config::Config;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use uct_model::{load_with, DocumentParser, LoadError, Tables, UseCase, YamlParser};
use uct_render::{splice_into_document, write_csv, write_report, RenderError, SpliceOutcome};

/// Errors that abort a batch
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// The input directory cannot be listed
    #[error("cannot list {path}: {source}")]
    ListInputs {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text report cannot be created or flushed
    #[error("cannot write report {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A use-case document is malformed
    #[error(transparent)]
    Load(#[from] LoadError),

    /// An output could not be written
    #[error("use case '{use_case}': {source}")]
    Render {
        use_case: String,
        #[source]
        source: RenderError,
    },
}

/// A use case that was skipped because it could not be flattened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedUseCase {
    /// Use-case name
    pub name: String,
    /// Why it failed
    pub reason: String,
}

/// What a batch run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Use cases rendered successfully
    pub processed: Vec<String>,
    /// Use cases aborted by a lookup failure
    pub failed: Vec<FailedUseCase>,
    /// Use cases whose tables were injected into the LaTeX document
    pub latex_spliced: usize,
    /// Use cases whose LaTeX output was skipped
    pub latex_skipped: usize,
}

impl BatchSummary {
    /// Whether every use case was rendered
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Input files in `dir` accepted by `parser`, sorted by path
///
/// # Errors
/// `BatchError::ListInputs` if the directory cannot be read
pub fn discover_inputs<P: DocumentParser>(
    dir: &Path,
    parser: &P,
) -> Result<Vec<PathBuf>, BatchError> {
    let list_error = |source| BatchError::ListInputs {
        path: dir.to_path_buf(),
        source,
    };

    let mut inputs = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(list_error)? {
        let path = entry.map_err(list_error)?.path();
        if path.is_file() && parser.can_parse(&path) {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Run the batch described by `config`
///
/// The text report is created (truncated) once and receives one block per
/// successfully flattened use case.
///
/// # Errors
/// See [`BatchError`]; per use case lookup failures are reported in the
/// summary instead.
pub fn run_batch(config: &Config) -> Result<BatchSummary, BatchError> {
    let parser = YamlParser::new();
    let inputs = discover_inputs(&config.data_dir, &parser)?;
    tracing::info!(
        "Found {} use case(s) in {}",
        inputs.len(),
        config.data_dir.display()
    );

    let report_path = config.report_path();
    let file = File::create(&report_path).map_err(|source| BatchError::Report {
        path: report_path.clone(),
        source,
    })?;
    let mut report = BufWriter::new(file);
    let mut summary = BatchSummary::default();

    for path in &inputs {
        let use_case = load_with(&parser, path)?;
        tracing::info!("Processing use case '{}'", use_case.name);

        let tables = match use_case.flatten() {
            Ok(tables) => tables,
            Err(e) => {
                tracing::error!("Skipping use case '{}': {}", use_case.name, e);
                summary.failed.push(FailedUseCase {
                    name: use_case.name.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let render_error = |source| BatchError::Render {
            use_case: use_case.name.clone(),
            source,
        };

        write_report(&mut report, &use_case.name, &tables, &use_case.actors).map_err(render_error)?;

        if config.csv {
            write_csv(config.csv_path(&use_case.name), &tables, &use_case.actors)
                .map_err(render_error)?;
        }

        if let Some(document) = &config.latex_document {
            match splice_latex(document, &use_case, &tables).map_err(render_error)? {
                Some(SpliceOutcome::Spliced { .. }) => summary.latex_spliced += 1,
                Some(SpliceOutcome::AnchorNotFound) | None => summary.latex_skipped += 1,
            }
        }

        summary.processed.push(use_case.name.clone());
    }

    report.flush().map_err(|source| BatchError::Report {
        path: report_path.clone(),
        source,
    })?;
    tracing::info!("Wrote {}", report_path.display());

    Ok(summary)
}

/// Inject LaTeX tables when the use case carries an anchor pattern
fn splice_latex(
    document: &Path,
    use_case: &UseCase,
    tables: &Tables,
) -> Result<Option<SpliceOutcome>, RenderError> {
    let Some(marker) = use_case.anchor.as_deref() else {
        tracing::warn!(
            "Use case '{}' has no Regex anchor, LaTeX tables skipped",
            use_case.name
        );
        return Ok(None);
    };

    splice_into_document(document, marker, tables, &use_case.actors).map(Some)
}
