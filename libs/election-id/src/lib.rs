//! # election-id
//!
//! Builds and validates structured identifiers for UK elections,
//! organisations and ballots.
//!
//! ## Identifier Format
//!
//! Identifiers are lowercase slug tokens joined by `.`, always starting with
//! the election type and ending with the polling date:
//!
//! `{election_type}[.{subtype}][.{organisation}][.{division}][.by].{date}`
//!
//! Examples:
//! - `local.2018-05-03` (election group)
//! - `local.birmingham.2018-05-03` (organisation group)
//! - `local.birmingham.area1.2018-05-03` (ballot)
//! - `parl.cities-of-london.by.2021-03-04` (by-election ballot)
//! - `sp.c.glasgow-kelvin.2021-05-06` (ballot with subtype)
//!
//! Which segments an election type may carry is fixed by the table in
//! [`grammar`]. Reference data such as organisation codes is supplied by the
//! caller; only the grammar is checked here.

mod builder;
mod error;
pub mod grammar;
mod segment;
mod validate;

pub use builder::{IdBuilder, IdGroup, IdSet};
pub use error::IdError;
pub use grammar::{
    is_segment_applicable, legal_values, rules, segment_order, DivisionPrerequisite,
    ElectionRules, Presence, ALL_RULES,
};
pub use segment::{
    check_date, date_from_ymd, date_token, encode, is_canonical, is_slug, parse_date, slugify,
    ContestType, ElectionType, SegmentKind, Subtype, DATE_FORMAT, DELIMITER, YEAR_RANGE,
};
pub use validate::{check, parse, validate};

/// Re-export chrono's date type for consumers building identifiers.
pub use chrono::NaiveDate;
