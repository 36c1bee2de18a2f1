//! Batch configuration
//!
//! Configuration is file driven. Lookup order:
//! 1. an explicit path (must exist)
//! 2. [`DEFAULT_CONFIG_FILE`] in the working directory, if present
//! 3. built-in defaults
//!
//! ```toml
//! data_dir = "data"
//! text_report = "tables.txt"
//! csv = true
//! latex_document = "report/main.tex"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "usecase-tables.toml";

/// Errors while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("io error reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Batch settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the use-case documents; outputs are written here too
    pub data_dir: PathBuf,
    /// File name of the consolidated text report inside `data_dir`
    pub text_report: String,
    /// Write one CSV file per use case
    pub csv: bool,
    /// LaTeX document to inject tables into
    pub latex_document: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            text_report: "tables.txt".to_string(),
            csv: true,
            latex_document: None,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text; `origin` names the source in errors
    ///
    /// # Errors
    /// `ConfigError::Parse` on invalid TOML or unknown keys
    pub fn from_toml_str(content: &str, origin: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.into(),
            source,
        })
    }

    /// Load configuration from `path`
    ///
    /// # Errors
    /// - `ConfigError::Read` if the file cannot be read
    /// - `ConfigError::Parse` if it is not valid
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Resolve configuration: `explicit` file, else the default file, else defaults
    ///
    /// # Errors
    /// See [`Config::from_file`].
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let default = Path::new(DEFAULT_CONFIG_FILE);
        if default.is_file() {
            tracing::debug!("Using configuration from {}", default.display());
            return Self::from_file(default);
        }

        Ok(Self::default())
    }

    /// Path of the consolidated text report
    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.data_dir.join(&self.text_report)
    }

    /// Path of the CSV file for the use case `name`
    #[must_use]
    pub fn csv_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{name}.csv"))
    }
}
