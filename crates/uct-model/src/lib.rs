//! Use-case scenario model
//!
//! Ingress side of the table generator: loads use-case documents and
//! flattens their scenarios into rows.
//!
//! # Architecture
//!
//! ```text
//! YAML file → YamlParser → UseCase { actors, steps } → flatten → Tables { main, special }
//! ```
//!
//! # Example
//!
//! ```rust
//! use uct_model::{DocumentParser, YamlParser};
//!
//! let yaml = "
//! Actors: [Buyer, Seller]
//! Scenario:
//!   - Buyer: Places order
//!   - Seller: Confirms order
//! ";
//! let use_case = YamlParser.parse("UC01", yaml).unwrap();
//!
//! let tables = use_case.flatten().unwrap();
//! assert_eq!(tables.main[1][1], "2. Confirms order");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod flatten;
pub mod loader;
pub mod scenario;

// Re-exports for convenience
pub use error::{FlattenError, LoadError};
pub use flatten::{flatten, Row, SpecialTable, Tables};
pub use loader::{load_use_case, load_with, DocumentParser, YamlParser};
pub use scenario::{use_case_name, Action, Branch, BranchKind, Step, UseCase};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
