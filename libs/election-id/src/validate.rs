//! Identifier validation.
//!
//! Parsing runs the builder in reverse: the candidate is split into tokens,
//! the election type and date are read from the ends, and the middle tokens
//! are matched positionally against the election type's segment order. The
//! candidate must be exactly one of the identifiers the reconstructed builder
//! renders, so a ballot id missing a required segment is rejected.

use tracing::debug;

use crate::builder::IdBuilder;
use crate::segment::{date_token, is_canonical, parse_date, ElectionType, SegmentKind, DELIMITER};
use crate::IdError;

/// Parses a candidate identifier into the builder that renders it.
///
/// A trailing `by` is read as the by-election contest type first. When that
/// reading does not yield a valid identifier, `by` is read as the slug of the
/// last organisation or division instead, so `local.birmingham.by.2018-05-03`
/// parses as the ballot for division `by`. A ballot whose contest type was
/// set to `election` parses back with no contest type, since `election`
/// renders no token.
pub fn parse(candidate: &str) -> Result<IdBuilder, IdError> {
    let result = parse_tokens(candidate);
    if let Err(err) = &result {
        debug!(candidate, error = %err, "rejected election identifier");
    }
    result
}

/// Checks a candidate identifier, returning the first failure found.
pub fn check(candidate: &str) -> Result<(), IdError> {
    parse(candidate).map(|_| ())
}

/// Returns true if `candidate` is a well-formed identifier at any granularity.
#[must_use]
pub fn validate(candidate: &str) -> bool {
    check(candidate).is_ok()
}

fn canonical(kind: SegmentKind, token: &str) -> Result<(), IdError> {
    if is_canonical(token) {
        Ok(())
    } else {
        Err(IdError::InvalidSegmentFormat {
            kind,
            value: token.to_string(),
        })
    }
}

fn parse_tokens(candidate: &str) -> Result<IdBuilder, IdError> {
    let tokens: Vec<&str> = candidate.split(DELIMITER).collect();
    let [first, middle @ .., last] = tokens.as_slice() else {
        return Err(IdError::unparseable(
            candidate,
            "expected at least an election type and a date",
        ));
    };

    canonical(SegmentKind::ElectionType, first)?;
    let election_type: ElectionType = first.parse()?;

    let date = parse_date(last)?;
    if date_token(date) != *last {
        return Err(IdError::InvalidDate {
            value: last.to_string(),
        });
    }

    let builder = IdBuilder::new(election_type, date)?;

    if let Some((&"by", rest)) = middle.split_last() {
        if builder.rules().allows_by_elections() {
            let as_contest = builder
                .with_contest_type("by")
                .and_then(|b| read_segments(candidate, b, rest));
            if as_contest.is_err() {
                // a division or organisation may itself be slugged "by"
                if let Ok(b) = read_segments(candidate, builder, middle) {
                    return Ok(b);
                }
            }
            return as_contest;
        }
    }

    read_segments(candidate, builder, middle)
}

/// Assigns the middle tokens positionally and checks that the result renders
/// one of its identifiers as exactly `candidate`.
fn read_segments(
    candidate: &str,
    mut builder: IdBuilder,
    middle: &[&str],
) -> Result<IdBuilder, IdError> {
    let rules = builder.rules();
    let mut remaining = middle.iter().copied();

    if rules.has_subtypes() {
        if let Some(token) = remaining.next() {
            canonical(SegmentKind::Subtype, token)?;
            builder = builder.with_subtype(token)?;
        }
    }

    if rules.is_applicable(SegmentKind::Organisation) {
        if let Some(token) = remaining.next() {
            canonical(SegmentKind::Organisation, token)?;
            builder = builder.with_organisation(token)?;
        }
    }

    if rules.division_applicable(builder.subtype()) {
        if let Some(token) = remaining.next() {
            canonical(SegmentKind::Division, token)?;
            builder = builder.with_division(token)?;
        }
    }

    let leftover: Vec<&str> = remaining.collect();
    if !leftover.is_empty() {
        return Err(IdError::unparseable(
            candidate,
            format!(
                "unexpected segments '{}' for election_type {}",
                leftover.join(DELIMITER),
                builder.election_type()
            ),
        ));
    }

    builder.check_prerequisites()?;

    if !builder.ids().iter().any(|(_, id)| id == candidate) {
        return Err(IdError::unparseable(
            candidate,
            "segments do not render back to the identifier",
        ));
    }

    Ok(builder)
}
