//! `notehub-cli`: operator tool for a NoteHub deployment.
//!
//! Runs schema migrations, manages accounts, prints folder trees and
//! verifies or repairs folder note caches. Diagnostics go to stderr so
//! `--format json` output can be piped.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_env("NOTEHUB_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = Cli::parse().execute().await {
        output::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}
