//! eid - CLI for UK election identifiers.
//!
//! Thin front-end over the `election-id` library: builds identifiers from
//! segments, validates candidate identifiers and prints the grammar table.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

use commands::Cli;

fn init_tracing(config: &config::Config) {
    // Prefer RUST_LOG, fall back to EID_LOG_LEVEL / --log-level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    let registry = tracing_subscriber::registry().with(filter);

    if config.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match config::Config::from_env() {
        Ok(config) => cli.resolve_config(config),
        Err(e) => {
            error::print_error(&e);
            std::process::exit(2);
        }
    };
    init_tracing(&config);

    if let Err(e) = cli.run(&config) {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
