//! grepgh - search GitHub code through the grep.app API
//!
//! grepgh provides:
//! - Paged queries with regex/whole-word/case and repo/path/language filters
//! - HTML snippet parsing into highlighted, line-numbered matches
//! - Colorized terminal output or a single JSON document

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod backends;
mod cli;
mod core;
mod flows;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose);
    cli::run(cli)
}
