//! Rules command.

use anyhow::Result;
use clap::Args;
use election_id::{DivisionPrerequisite, ElectionRules, ElectionType, Presence, ALL_RULES};
use tabled::Tabled;

use crate::error::CliError;
use crate::output::{print_single, print_table, OutputFormat};

use super::CommandContext;

/// Show grammar rules.
#[derive(Debug, Args)]
pub struct RulesCommand {
    /// Only show this election type.
    election_type: Option<String>,
}

#[derive(Debug, Tabled)]
struct RuleRow {
    #[tabled(rename = "Type")]
    election_type: String,

    #[tabled(rename = "Description")]
    description: String,

    #[tabled(rename = "Subtypes")]
    subtypes: String,

    #[tabled(rename = "Organisation")]
    organisation: String,

    #[tabled(rename = "Division")]
    division: String,

    #[tabled(rename = "Contest Types")]
    contest_types: String,

    #[tabled(rename = "Order")]
    order: String,
}

fn presence(p: Presence) -> &'static str {
    match p {
        Presence::Required => "required",
        Presence::Optional => "optional",
        Presence::Disallowed => "-",
    }
}

fn join<I: IntoIterator<Item = &'static str>>(items: I) -> String {
    let joined = items.into_iter().collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "-".to_string()
    } else {
        joined
    }
}

impl From<&ElectionRules> for RuleRow {
    fn from(rules: &ElectionRules) -> Self {
        let division = match (rules.division, rules.division_prerequisite) {
            (Presence::Disallowed, _) => "-".to_string(),
            (p, DivisionPrerequisite::None) => presence(p).to_string(),
            (p, DivisionPrerequisite::Organisation) => format!("{} (after organisation)", presence(p)),
            (p, DivisionPrerequisite::Subtype(subtypes)) => format!(
                "{} (subtype {})",
                presence(p),
                join(subtypes.iter().map(|s| s.as_str()))
            ),
        };

        Self {
            election_type: rules.election_type.to_string(),
            description: rules.description.to_string(),
            subtypes: join(rules.subtypes.iter().map(|s| s.as_str())),
            organisation: presence(rules.organisation).to_string(),
            division,
            contest_types: join(rules.contest_types.iter().filter_map(|c| c.token())),
            order: rules
                .segment_order()
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join("."),
        }
    }
}

impl RulesCommand {
    fn selected(&self) -> Result<Vec<&'static ElectionRules>, CliError> {
        match &self.election_type {
            Some(raw) => {
                let election_type: ElectionType = raw.parse()?;
                Ok(vec![election_id::rules(election_type)])
            }
            None => Ok(ALL_RULES.iter().collect()),
        }
    }

    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let selected = self.selected()?;
        match ctx.format {
            OutputFormat::Json => print_single(&selected),
            OutputFormat::Table => {
                let rows: Vec<RuleRow> = selected.into_iter().map(RuleRow::from).collect();
                print_table(&rows);
            }
        }
        Ok(())
    }
}
