//! Logging setup and prelude.
//!
//! Re-exports the tracing macros used across the crate and owns the
//! subscriber initialization, so `main` has a single call site.

pub use tracing::{debug, error, info, warn};

/// Initialize the tracing subscriber with environment filter support.
///
/// Logs at INFO and above by default; `RUST_LOG` overrides the level:
///
/// ```bash
/// RUST_LOG=debug hsync push
/// RUST_LOG=hsync::transfer=trace hsync pull
/// ```
pub fn init_tracing() {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.with_writer(std::io::stderr)
		.init();
}
