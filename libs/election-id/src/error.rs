//! Error types for building and validating election identifiers.

use thiserror::Error;

use crate::builder::IdGroup;
use crate::segment::{ElectionType, SegmentKind};

/// Errors that can occur when building, rendering or validating identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The value does not normalise to a lowercase slug.
    #[error("invalid {kind} '{value}': only lowercase letters, digits and hyphens are allowed")]
    InvalidSegmentFormat { kind: SegmentKind, value: String },

    /// The value is not a calendar date in `YYYY-MM-DD` form.
    #[error("invalid date '{value}': expected a calendar date in YYYY-MM-DD format")]
    InvalidDate { value: String },

    /// The election type never carries this kind of segment.
    #[error("election_type {election_type} may not have a {kind}")]
    SegmentNotApplicable {
        election_type: ElectionType,
        kind: SegmentKind,
    },

    /// The value is outside the closed set allowed for this segment.
    #[error("invalid {kind} '{value}': allowed values are {allowed}")]
    IllegalSegmentValue {
        kind: SegmentKind,
        value: String,
        allowed: String,
    },

    /// A dependent segment was set without the segment it depends on.
    #[error("election_type {election_type} must have a {requires} in order to have a {kind}")]
    MissingPrerequisite {
        election_type: ElectionType,
        kind: SegmentKind,
        requires: SegmentKind,
    },

    /// A segment needed to render the requested identifier is unset.
    #[error("election_type {election_type} must have a {kind} in order to create a {group}")]
    MissingSegment {
        election_type: ElectionType,
        kind: SegmentKind,
        group: IdGroup,
    },

    /// The candidate string could not be matched against the grammar.
    #[error("unparseable identifier '{identifier}': {reason}")]
    UnparseableIdentifier { identifier: String, reason: String },
}

impl IdError {
    pub(crate) fn illegal_value<I>(kind: SegmentKind, value: &str, allowed: I) -> Self
    where
        I: IntoIterator<Item = &'static str>,
    {
        IdError::IllegalSegmentValue {
            kind,
            value: value.to_string(),
            allowed: allowed.into_iter().collect::<Vec<_>>().join(", "),
        }
    }

    pub(crate) fn unparseable(identifier: &str, reason: impl Into<String>) -> Self {
        IdError::UnparseableIdentifier {
            identifier: identifier.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns the segment kind this error is about, if there is one.
    pub fn segment(&self) -> Option<SegmentKind> {
        match self {
            IdError::InvalidSegmentFormat { kind, .. }
            | IdError::SegmentNotApplicable { kind, .. }
            | IdError::IllegalSegmentValue { kind, .. }
            | IdError::MissingPrerequisite { kind, .. }
            | IdError::MissingSegment { kind, .. } => Some(*kind),
            IdError::InvalidDate { .. } => Some(SegmentKind::Date),
            IdError::UnparseableIdentifier { .. } => None,
        }
    }

    /// Returns true if this error comes from a cross-segment rule.
    pub fn is_prerequisite_error(&self) -> bool {
        matches!(
            self,
            IdError::MissingPrerequisite { .. } | IdError::MissingSegment { .. }
        )
    }
}
