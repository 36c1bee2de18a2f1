//! Error types for the scenario model
//!
//! Two failure classes with different blast radius:
//! - [`LoadError`]: the input document is malformed (aborts a batch)
//! - [`FlattenError`]: a well-formed document references something that
//!   does not exist (aborts only that use case)

use std::path::PathBuf;

/// Errors while reading and structurally validating a use-case document
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML
    #[error("syntax error in use case '{use_case}': {message}")]
    Syntax { use_case: String, message: String },

    /// The document contains no data
    #[error("use case '{use_case}' is empty")]
    Empty { use_case: String },

    /// A required key is absent
    #[error("use case '{use_case}' is missing required key '{key}'")]
    MissingKey { use_case: String, key: String },

    /// A value has the wrong structure
    #[error("use case '{use_case}': {location} {expected}")]
    InvalidShape {
        use_case: String,
        location: String,
        expected: String,
    },

    /// A step mapping does not hold exactly one entry
    #[error("use case '{use_case}': {location} must hold exactly one entry, found {entries}")]
    AmbiguousStep {
        use_case: String,
        location: String,
        entries: usize,
    },
}

impl LoadError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create missing key error
    pub fn missing_key(use_case: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingKey {
            use_case: use_case.into(),
            key: key.into(),
        }
    }

    /// Create shape error at `location`
    pub fn invalid_shape(
        use_case: impl Into<String>,
        location: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidShape {
            use_case: use_case.into(),
            location: location.into(),
            expected: expected.into(),
        }
    }
}

/// Errors while flattening a loaded scenario into tables
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlattenError {
    /// An action names an actor that is not declared in `Actors`
    #[error("unknown actor '{actor}' in {context}")]
    UnknownActor { actor: String, context: String },

    /// Branches need at least one column for their `Go To` row
    #[error("scenario declares branches but no actors")]
    NoActors,
}

impl FlattenError {
    /// Create unknown actor error
    pub fn unknown_actor(actor: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownActor {
            actor: actor.into(),
            context: context.into(),
        }
    }
}
