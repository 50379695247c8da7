//! sapphillon library - expose modules for testing
//!
//! The binary wires these modules to the command line; integration tests
//! drive the binary itself.

pub mod commands;
pub mod common;
pub mod emitter;
pub mod errors;

pub use common::GlobalOpts;
pub use sapphillon_logger as logger;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the `tracing` subscriber used by the library crates
///
/// `RUST_LOG` wins; otherwise the filter follows the logger verbosity.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logger::verbosity_to_filter()));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init();
    if installed.is_err() {
        logger::debug("Tracing subscriber already installed");
    }
}
