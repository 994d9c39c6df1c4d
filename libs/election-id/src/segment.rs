//! Segment kinds and their canonical textual encoding.
//!
//! Every identifier token is a slug: lowercase ASCII letters, digits and
//! single hyphens. Free-form values (organisation and division names) are
//! normalised with [`slugify`] before being checked; closed enumerations
//! (election type, subtype, contest type) are typed.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::IdError;

/// Delimiter between tokens of a rendered identifier.
pub const DELIMITER: &str = ".";

/// `strftime` pattern of the date token.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Years whose `%Y` rendering is four plain digits.
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

// =============================================================================
// Segment Kinds
// =============================================================================

/// The named pieces an identifier is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    ElectionType,
    Subtype,
    Organisation,
    Division,
    ContestType,
    Date,
}

impl SegmentKind {
    /// Canonical concatenation order shared by every election type.
    pub const CANONICAL_ORDER: [SegmentKind; 6] = [
        SegmentKind::ElectionType,
        SegmentKind::Subtype,
        SegmentKind::Organisation,
        SegmentKind::Division,
        SegmentKind::ContestType,
        SegmentKind::Date,
    ];

    /// Returns the snake_case name of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::ElectionType => "election_type",
            SegmentKind::Subtype => "subtype",
            SegmentKind::Organisation => "organisation",
            SegmentKind::Division => "division",
            SegmentKind::ContestType => "contest_type",
            SegmentKind::Date => "date",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Election Types
// =============================================================================

/// Election family, the mandatory first token of every identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectionType {
    /// European Parliament (UK).
    Europarl,
    /// Greater London Assembly.
    Gla,
    /// Local elections.
    Local,
    /// Directly elected mayors.
    Mayor,
    /// National Assembly for Wales.
    Naw,
    /// Northern Ireland Assembly.
    Nia,
    /// UK Parliament.
    Parl,
    /// Police and Crime Commissioner.
    Pcc,
    /// Referendums.
    Ref,
    /// Senedd Cymru.
    Senedd,
    /// Scottish Parliament.
    Sp,
}

impl ElectionType {
    /// Every election type, in the order the grammar table lists them.
    pub const ALL: [ElectionType; 11] = [
        ElectionType::Europarl,
        ElectionType::Gla,
        ElectionType::Local,
        ElectionType::Mayor,
        ElectionType::Naw,
        ElectionType::Nia,
        ElectionType::Parl,
        ElectionType::Pcc,
        ElectionType::Ref,
        ElectionType::Senedd,
        ElectionType::Sp,
    ];

    /// Returns the token used in identifiers.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ElectionType::Europarl => "europarl",
            ElectionType::Gla => "gla",
            ElectionType::Local => "local",
            ElectionType::Mayor => "mayor",
            ElectionType::Naw => "naw",
            ElectionType::Nia => "nia",
            ElectionType::Parl => "parl",
            ElectionType::Pcc => "pcc",
            ElectionType::Ref => "ref",
            ElectionType::Senedd => "senedd",
            ElectionType::Sp => "sp",
        }
    }
}

impl fmt::Display for ElectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElectionType {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElectionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                IdError::illegal_value(
                    SegmentKind::ElectionType,
                    s,
                    ElectionType::ALL.iter().map(ElectionType::as_str),
                )
            })
    }
}

// =============================================================================
// Subtypes
// =============================================================================

/// Subtype of an election that elects members in more than one way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subtype {
    /// Additional members (London-wide list).
    #[serde(rename = "a")]
    Additional,
    /// Constituency members.
    #[serde(rename = "c")]
    Constituency,
    /// Regional members.
    #[serde(rename = "r")]
    Region,
}

impl Subtype {
    /// Returns the token used in identifiers.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Subtype::Additional => "a",
            Subtype::Constituency => "c",
            Subtype::Region => "r",
        }
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Contest Types
// =============================================================================

/// Whether a ballot is a scheduled election or a by-election.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContestType {
    /// Ordinary contest. Renders no token.
    Election,
    /// Out-of-cycle contest for a single seat. Renders `by`.
    ByElection,
}

impl ContestType {
    /// Spellings accepted for [`ContestType::Election`].
    pub const ELECTION_SPELLINGS: [&'static str; 1] = ["election"];

    /// Spellings accepted for [`ContestType::ByElection`].
    pub const BY_ELECTION_SPELLINGS: [&'static str; 3] = ["by", "by election", "by-election"];

    /// Returns the token this contest type adds to a ballot id, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&'static str> {
        match self {
            ContestType::Election => None,
            ContestType::ByElection => Some("by"),
        }
    }

    /// Returns the raw spellings that select this contest type.
    #[must_use]
    pub fn spellings(&self) -> &'static [&'static str] {
        match self {
            ContestType::Election => &Self::ELECTION_SPELLINGS,
            ContestType::ByElection => &Self::BY_ELECTION_SPELLINGS,
        }
    }

    /// Matches a raw, case-insensitive spelling.
    pub(crate) fn from_spelling(raw: &str) -> Option<Self> {
        let raw = raw.trim().to_lowercase();
        [ContestType::Election, ContestType::ByElection]
            .into_iter()
            .find(|c| c.spellings().contains(&raw.as_str()))
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Normalises a raw value into slug form.
///
/// Lowercases, drops everything that is not a word character, whitespace or
/// hyphen, and collapses runs of whitespace and hyphens into one hyphen.
/// Leading and trailing hyphens and underscores are stripped. The result is
/// not guaranteed to be a valid token; see [`is_slug`].
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for ch in raw.trim().chars().flat_map(char::to_lowercase) {
        if ch == '-' || ch.is_whitespace() {
            pending_separator = true;
        } else if ch.is_alphanumeric() || ch == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch);
        }
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Returns true when `token` is a non-empty `[a-z0-9-]` slug with no
/// leading, trailing or doubled hyphen.
pub fn is_slug(token: &str) -> bool {
    !token.is_empty()
        && !token.starts_with('-')
        && !token.ends_with('-')
        && !token.contains("--")
        && token
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Returns true when `token` is already in canonical slug form.
pub fn is_canonical(token: &str) -> bool {
    is_slug(token) && slugify(token) == token
}

/// Encodes a free-form raw value as a token for `kind`.
pub fn encode(kind: SegmentKind, raw: &str) -> Result<String, IdError> {
    let token = slugify(raw);
    if is_slug(&token) {
        Ok(token)
    } else {
        Err(IdError::InvalidSegmentFormat {
            kind,
            value: raw.to_string(),
        })
    }
}

/// Renders a date as its `YYYY-MM-DD` token.
#[must_use]
pub fn date_token(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` date, rejecting anything that is not a real
/// calendar date with a four-digit year.
pub fn parse_date(raw: &str) -> Result<NaiveDate, IdError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| IdError::InvalidDate {
            value: raw.to_string(),
        })
        .and_then(check_date)
}

/// Builds a date from its parts.
pub fn date_from_ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, IdError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| IdError::InvalidDate {
            value: format!("{year:04}-{month:02}-{day:02}"),
        })
        .and_then(check_date)
}

/// Rejects dates whose token would not be a slug (`+10000-01-01`,
/// `-0005-01-01`).
pub fn check_date(date: NaiveDate) -> Result<NaiveDate, IdError> {
    if YEAR_RANGE.contains(&date.year()) {
        Ok(date)
    } else {
        Err(IdError::InvalidDate {
            value: date_token(date),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
