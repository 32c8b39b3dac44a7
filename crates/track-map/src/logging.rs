//! Logging setup for the command line tool
//!
//! Log lines go to stderr so that `--print-url` output on stdout stays machine readable.
//! `RUST_LOG` overrides the default filter.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Filter used when `RUST_LOG` is not set
pub fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "debug,hyper_util=info,reqwest::connect=info"
    } else {
        "warn,track_map=info,track_map_lib=info"
    }
}

/// Install the global subscriber
pub fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter()));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);

    // A subscriber may already be installed when embedded; keep it
    if tracing_subscriber::registry().with(fmt_layer).try_init().is_err() {
        tracing::debug!("Global subscriber already set");
    }

    tracing::debug!(
        "{} {} logging initialized",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
}
