//! Logging setup for the binary

use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str =
    "warn,usecase_tables=info,uct_cli=info,uct_model=info,uct_render=info";

/// Initialize logging to stderr
///
/// Use the `RUST_LOG` environment variable to override [`DEFAULT_FILTER`].
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
