//! Build command.

use anyhow::Result;
use clap::Args;
use election_id::{IdBuilder, IdError};
use tabled::Tabled;
use tracing::debug;

use crate::error::CliError;
use crate::output::{print_single, print_table, OutputFormat};

use super::CommandContext;

/// Build identifiers from segments.
#[derive(Debug, Args)]
pub struct BuildCommand {
    /// Election type (e.g. local, parl, sp).
    election_type: String,

    /// Polling date (YYYY-MM-DD).
    date: String,

    /// Subtype (e.g. c, r, a).
    #[arg(long)]
    subtype: Option<String>,

    /// Organisation name or slug.
    #[arg(long, visible_alias = "organisation")]
    org: Option<String>,

    /// Division name or slug.
    #[arg(long)]
    division: Option<String>,

    /// Contest type (election, by, by-election).
    #[arg(long)]
    contest_type: Option<String>,

    /// Fail unless a complete ballot id can be built.
    #[arg(long)]
    ballot: bool,
}

#[derive(Debug, Tabled)]
struct IdRow {
    #[tabled(rename = "Group")]
    group: String,

    #[tabled(rename = "ID")]
    id: String,
}

impl BuildCommand {
    fn builder(&self) -> Result<IdBuilder, IdError> {
        let mut builder = IdBuilder::from_strs(&self.election_type, &self.date)?;
        if let Some(subtype) = &self.subtype {
            builder = builder.with_subtype(subtype)?;
        }
        if let Some(org) = &self.org {
            builder = builder.with_organisation(org)?;
        }
        if let Some(division) = &self.division {
            builder = builder.with_division(division)?;
        }
        if let Some(contest_type) = &self.contest_type {
            builder = builder.with_contest_type(contest_type)?;
        }
        Ok(builder)
    }

    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let builder = self.builder().map_err(CliError::from)?;
        debug!(?builder, "built identifier segments");

        if self.ballot {
            builder.ballot_id().map_err(CliError::from)?;
        }

        let ids = builder.ids();
        match ctx.format {
            OutputFormat::Json => print_single(&ids),
            OutputFormat::Table => {
                let rows: Vec<IdRow> = ids
                    .iter()
                    .map(|(group, id)| IdRow {
                        group: group.to_string(),
                        id: id.to_string(),
                    })
                    .collect();
                print_table(&rows);
            }
        }

        Ok(())
    }
}
