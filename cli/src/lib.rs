//! usecase-tables batch runner
//!
//! Ties the model and the renderers together: reads configuration, walks
//! the input directory and fans every use case out to the text report, its
//! CSV file and the LaTeX document.

#![warn(missing_docs)]

pub mod batch;
pub mod config;
pub mod logging;

pub use batch::{discover_inputs, run_batch, BatchError, BatchSummary, FailedUseCase};
pub use config::{Config, ConfigError, DEFAULT_CONFIG_FILE};
