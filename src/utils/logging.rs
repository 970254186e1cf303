// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

/// Sets up the logging framework using tracing_subscriber.
/// `RUST_LOG` wins when set; otherwise INFO, or DEBUG for this crate when
/// `verbose` is on. Logs go to stderr so stdout carries only the JSON record.
pub fn setup_logging(verbose: bool) {
    let default_directive = if verbose { "info,pdfinfo_extractor=debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();

    tracing::debug!("Logging setup complete.");
}
