//! CLI commands.

mod build;
mod rules;
mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::output::OutputFormat;

/// eid - Build and validate UK election identifiers.
#[derive(Debug, Parser)]
#[command(name = "eid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json). Defaults to EID_FORMAT, then table.
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    /// Log level when RUST_LOG is unset. Defaults to EID_LOG_LEVEL, then info.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build every identifier available from the given segments.
    Build(build::BuildCommand),

    /// Validate one or more identifiers (reads stdin when none are given).
    Validate(validate::ValidateCommand),

    /// Show which segments each election type accepts.
    Rules(rules::RulesCommand),
}

impl Cli {
    /// Merge flags over environment configuration.
    pub fn resolve_config(&self, mut config: Config) -> Config {
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        config.log_json |= self.log_json;
        config
    }

    /// Run the CLI command.
    pub fn run(self, config: &Config) -> Result<()> {
        let ctx = CommandContext {
            format: config.format,
        };

        match self.command {
            Commands::Build(cmd) => cmd.run(&ctx),
            Commands::Validate(cmd) => cmd.run(&ctx),
            Commands::Rules(cmd) => cmd.run(&ctx),
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub format: OutputFormat,
}
