//! Error types for the renderers

use std::path::PathBuf;

/// Errors while writing rendered tables
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// IO error on a named file
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error on an already open stream
    #[error("write error: {0}")]
    Write(#[from] std::io::Error),

    /// The anchor pattern is not a valid regular expression
    #[error("invalid anchor pattern '{marker}': {source}")]
    InvalidMarker {
        marker: String,
        #[source]
        source: regex::Error,
    },

    /// The patched document could not replace the original
    #[error("failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for render operations
pub type RenderResult<T> = Result<T, RenderError>;
