//! Renderers for flattened use-case tables
//!
//! Egress side of the table generator. Every renderer consumes the same
//! [`uct_model::Tables`] and the actor list used as the header row.
//!
//! - [`text`]: outlined grids appended to a shared report
//! - [`csv`]: one comma-separated file per use case
//! - [`latex`]: `longtable` blocks injected into an existing document
//! - [`splice`]: sentinel-delimited block replacement used by [`latex`]

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod csv;
pub mod error;
pub mod latex;
pub mod splice;
pub mod text;

// Re-exports for convenience
pub use csv::{render_csv, write_csv};
pub use error::{RenderError, RenderResult};
pub use latex::{sentinel_tag, sentinels, splice_into_document, SpliceOutcome};
pub use splice::MarkedBlock;
pub use text::{render_report, write_report, Grid, SEPARATOR_WIDTH};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
