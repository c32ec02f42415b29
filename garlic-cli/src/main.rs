//! Entry point for the `garlic` binary.

use clap::Parser;
use garlic_cli::{run, Cli};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr; stdout carries the data stream.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "garlic failed");
        std::process::exit(1);
    }
}
