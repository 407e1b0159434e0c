//! authorscan - AI-authorship estimation CLI
//!
//! Scores code snippets and GitHub repositories for how much of their code
//! reads as AI-generated.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use authorscan::cli;

fn main() -> Result<()> {
    // Parse CLI args first so --log-level can seed the filter
    let cli = cli::Cli::parse();

    // Initialize logging; RUST_LOG wins over --log-level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
