//! Validate command.

use std::io::BufRead;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::error::CliError;
use crate::output::{print_failure, print_single, print_success, OutputFormat};

use super::CommandContext;

/// Validate identifiers.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Identifiers to check. Reads one per line from stdin when omitted.
    candidates: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Verdict {
    id: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    segment: Option<election_id::SegmentKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

fn verdict(candidate: &str) -> Verdict {
    match election_id::check(candidate) {
        Ok(()) => Verdict {
            id: candidate.to_string(),
            valid: true,
            segment: None,
            reason: None,
        },
        Err(err) => Verdict {
            id: candidate.to_string(),
            valid: false,
            segment: err.segment(),
            reason: Some(err.to_string()),
        },
    }
}

fn read_stdin() -> Result<Vec<String>> {
    let stdin = std::io::stdin();
    let mut candidates = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read identifiers from stdin")?;
        let line = line.trim();
        if !line.is_empty() {
            candidates.push(line.to_string());
        }
    }
    Ok(candidates)
}

impl ValidateCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        let candidates = if self.candidates.is_empty() {
            read_stdin()?
        } else {
            self.candidates
        };

        let verdicts: Vec<Verdict> = candidates.iter().map(|c| verdict(c)).collect();
        let invalid = verdicts.iter().filter(|v| !v.valid).count();

        match ctx.format {
            OutputFormat::Json => print_single(&verdicts),
            OutputFormat::Table => {
                for v in &verdicts {
                    match &v.reason {
                        None => print_success(&v.id),
                        Some(reason) => print_failure(&v.id, reason),
                    }
                }
            }
        }

        if invalid > 0 {
            return Err(CliError::InvalidIdentifiers {
                invalid,
                total: verdicts.len(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_valid() {
        let v = verdict("local.birmingham.area1.2018-05-03");
        assert!(v.valid);
        assert!(v.reason.is_none());
    }

    #[test]
    fn test_verdict_reports_segment() {
        let v = verdict("local.birmingham.area1.2018-13-40");
        assert!(!v.valid);
        assert_eq!(v.segment, Some(election_id::SegmentKind::Date));
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["segment"], "date");
    }
}
