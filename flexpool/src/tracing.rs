//! Logging setup shared by the binaries.

use tracing_subscriber::{EnvFilter, fmt};

/// Logging macros used throughout the crate.
pub mod prelude {
    pub use ::tracing::{debug, warn};
}

/// Filter applied when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber.
///
/// Output goes to stderr so that reports printed on stdout stay clean.
/// Calling this more than once is harmless; later calls are ignored.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
