//! CLI entry point for child face prediction

use clap::Parser;
use kinmorph::io::cli::{Cli, RunProcessor};
use tracing_subscriber::EnvFilter;

fn main() -> kinmorph::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    RunProcessor::new(cli).process().map(|_| ())
}
