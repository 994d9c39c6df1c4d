//! Error handling and display for the CLI.

use colored::Colorize;
use election_id::IdError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{invalid} of {total} identifier(s) failed validation")]
    InvalidIdentifiers { invalid: usize, total: usize },

    #[error(transparent)]
    Id(#[from] IdError),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), err);

    if let Some(CliError::Id(id_err)) = err.downcast_ref::<CliError>() {
        let hint = match id_err {
            IdError::MissingPrerequisite { requires, .. } => {
                Some(format!("Hint: pass --{} as well.", flag_for(*requires)))
            }
            IdError::MissingSegment { kind, .. } => {
                Some(format!("Hint: pass --{} to build this id.", flag_for(*kind)))
            }
            IdError::SegmentNotApplicable { election_type, .. } => Some(format!(
                "Hint: run `eid rules {election_type}` to see which segments apply."
            )),
            _ => None,
        };
        if let Some(hint) = hint {
            eprintln!("\n{}", hint.yellow());
        }
    }
}

fn flag_for(kind: election_id::SegmentKind) -> &'static str {
    use election_id::SegmentKind;
    match kind {
        SegmentKind::Subtype => "subtype",
        SegmentKind::Organisation => "org",
        SegmentKind::Division => "division",
        SegmentKind::ContestType => "contest-type",
        SegmentKind::ElectionType | SegmentKind::Date => "help",
    }
}
