//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses the CLI
//! - initializes logging
//! - runs the conversion pipeline
//! - prints the run summary

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `chartpart` binary.
pub fn run() -> Result<(), AppError> {
    // Must precede clap so `env = ...` arguments can see `.env` values.
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();

    init_tracing();

    let config = cli.into_config();
    let run = pipeline::run_conversion(&config)?;

    println!("{}", crate::report::format_run_summary(&run));
    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
fn init_tracing() {
    // Leaves an already-installed subscriber in place.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init();
}
