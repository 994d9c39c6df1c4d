//! Identifier builder.
//!
//! An [`IdBuilder`] is an immutable value: every `with_*` call returns a new
//! builder and leaves the receiver untouched, so a partially built
//! identifier can be reused as the prefix of several ballots.
//!
//! ```
//! use election_id::{ElectionType, IdBuilder};
//!
//! let date = election_id::date_from_ymd(2018, 5, 3)?;
//! let council = IdBuilder::new(ElectionType::Local, date)?.with_organisation("Birmingham")?;
//! let ballot = council.with_division("area1")?;
//!
//! assert_eq!(ballot.ballot_id()?, "local.birmingham.area1.2018-05-03");
//! assert_eq!(council.organisation_group_id()?, "local.birmingham.2018-05-03");
//! # Ok::<(), election_id::IdError>(())
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::grammar::{rules, DivisionPrerequisite, ElectionRules, Presence};
use crate::segment::{
    check_date, date_token, encode, parse_date, ContestType, ElectionType, SegmentKind, Subtype,
    DELIMITER,
};
use crate::IdError;

// =============================================================================
// Identifier Groups
// =============================================================================

/// The granularities an identifier can be rendered at, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdGroup {
    /// Election type and date.
    ElectionGroupId,
    /// Election type, subtype and date.
    SubtypeGroupId,
    /// Election type, subtype (if any), organisation and date.
    OrganisationGroupId,
    /// Every segment that is set.
    BallotId,
}

impl IdGroup {
    pub const ALL: [IdGroup; 4] = [
        IdGroup::ElectionGroupId,
        IdGroup::SubtypeGroupId,
        IdGroup::OrganisationGroupId,
        IdGroup::BallotId,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IdGroup::ElectionGroupId => "election_group_id",
            IdGroup::SubtypeGroupId => "subtype_group_id",
            IdGroup::OrganisationGroupId => "organisation_group_id",
            IdGroup::BallotId => "ballot_id",
        }
    }
}

impl fmt::Display for IdGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every identifier a builder can currently render, keyed by group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IdSet(BTreeMap<IdGroup, String>);

impl IdSet {
    /// Returns the identifier rendered for `group`, if any.
    #[must_use]
    pub fn get(&self, group: IdGroup) -> Option<&str> {
        self.0.get(&group).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, group: IdGroup) -> bool {
        self.0.contains_key(&group)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates groups and identifiers, coarsest first.
    pub fn iter(&self) -> impl Iterator<Item = (IdGroup, &str)> {
        self.0.iter().map(|(group, id)| (*group, id.as_str()))
    }

    /// Returns the distinct identifiers, coarsest first.
    ///
    /// A ballot id that equals a group id (e.g. a mayoral ballot and its
    /// organisation group) is listed once.
    #[must_use]
    pub fn distinct(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::with_capacity(self.0.len());
        for id in self.0.values() {
            if !ids.contains(&id.as_str()) {
                ids.push(id);
            }
        }
        ids
    }
}

impl<'a> IntoIterator for &'a IdSet {
    type Item = (&'a IdGroup, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, IdGroup, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Accumulates segments for one election identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct IdBuilder {
    election_type: ElectionType,
    date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtype: Option<Subtype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    organisation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    division: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contest_type: Option<ContestType>,
}

impl IdBuilder {
    /// Creates a builder seeded with an election type and polling date.
    ///
    /// Fails with [`IdError::InvalidDate`] when the year falls outside
    /// [`YEAR_RANGE`](crate::YEAR_RANGE).
    pub fn new(election_type: ElectionType, date: NaiveDate) -> Result<Self, IdError> {
        Ok(Self {
            election_type,
            date: check_date(date)?,
            subtype: None,
            organisation: None,
            division: None,
            contest_type: None,
        })
    }

    /// Creates a builder from an election type token and a `YYYY-MM-DD` date.
    pub fn from_strs(election_type: &str, date: &str) -> Result<Self, IdError> {
        let election_type = election_type.parse()?;
        let date = parse_date(date)?;
        Self::new(election_type, date)
    }

    #[must_use]
    pub fn election_type(&self) -> ElectionType {
        self.election_type
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub fn subtype(&self) -> Option<Subtype> {
        self.subtype
    }

    #[must_use]
    pub fn organisation(&self) -> Option<&str> {
        self.organisation.as_deref()
    }

    #[must_use]
    pub fn division(&self) -> Option<&str> {
        self.division.as_deref()
    }

    #[must_use]
    pub fn contest_type(&self) -> Option<ContestType> {
        self.contest_type
    }

    /// Returns the grammar rules for this builder's election type.
    #[must_use]
    pub fn rules(&self) -> &'static ElectionRules {
        rules(self.election_type)
    }

    fn require_applicable(&self, kind: SegmentKind) -> Result<(), IdError> {
        if self.rules().is_applicable(kind) {
            Ok(())
        } else {
            Err(IdError::SegmentNotApplicable {
                election_type: self.election_type,
                kind,
            })
        }
    }

    // -------------------------------------------------------------------------
    // Segments
    // -------------------------------------------------------------------------

    /// Sets the subtype, e.g. `c` for constituency ballots.
    pub fn with_subtype(&self, subtype: &str) -> Result<Self, IdError> {
        self.require_applicable(SegmentKind::Subtype)?;
        let allowed = self.rules().subtypes;
        let raw = subtype.trim().to_lowercase();
        let subtype = allowed
            .iter()
            .copied()
            .find(|s| s.as_str() == raw)
            .ok_or_else(|| {
                IdError::illegal_value(
                    SegmentKind::Subtype,
                    subtype,
                    allowed.iter().map(Subtype::as_str),
                )
            })?;

        Ok(Self {
            subtype: Some(subtype),
            ..self.clone()
        })
    }

    /// Sets the organisation holding the election, e.g. a council name.
    pub fn with_organisation(&self, organisation: &str) -> Result<Self, IdError> {
        self.require_applicable(SegmentKind::Organisation)?;
        let organisation = encode(SegmentKind::Organisation, organisation)?;

        Ok(Self {
            organisation: Some(organisation),
            ..self.clone()
        })
    }

    /// Sets the electoral division, e.g. a ward or constituency name.
    ///
    /// Prerequisites (organisation or subtype) are only checked at render
    /// time, so segments may be supplied in any order.
    pub fn with_division(&self, division: &str) -> Result<Self, IdError> {
        self.require_applicable(SegmentKind::Division)?;
        let division = encode(SegmentKind::Division, division)?;

        Ok(Self {
            division: Some(division),
            ..self.clone()
        })
    }

    /// Sets the contest type.
    ///
    /// `by`, `by election` and `by-election` add a `by` token to the ballot
    /// id. `election` is accepted and clears any earlier by-election.
    pub fn with_contest_type(&self, contest_type: &str) -> Result<Self, IdError> {
        self.require_applicable(SegmentKind::ContestType)?;
        let allowed = self.rules().contest_types;
        let parsed = ContestType::from_spelling(contest_type)
            .filter(|c| allowed.contains(c))
            .ok_or_else(|| {
                IdError::illegal_value(
                    SegmentKind::ContestType,
                    contest_type,
                    allowed.iter().flat_map(|c| c.spellings().iter().copied()),
                )
            })?;

        Ok(Self {
            contest_type: Some(parsed),
            ..self.clone()
        })
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    fn token(&self, kind: SegmentKind) -> Option<Cow<'_, str>> {
        match kind {
            SegmentKind::ElectionType => Some(Cow::Borrowed(self.election_type.as_str())),
            SegmentKind::Subtype => self.subtype.map(|s| Cow::Borrowed(s.as_str())),
            SegmentKind::Organisation => self.organisation.as_deref().map(Cow::Borrowed),
            SegmentKind::Division => self.division.as_deref().map(Cow::Borrowed),
            SegmentKind::ContestType => self.contest_type.and_then(|c| c.token()).map(Cow::Borrowed),
            SegmentKind::Date => Some(Cow::Owned(date_token(self.date))),
        }
    }

    /// Joins the tokens of every set segment among `kinds`, in grammar order.
    fn render(&self, kinds: &[SegmentKind]) -> String {
        let parts: Vec<Cow<'_, str>> = self
            .rules()
            .segment_order()
            .into_iter()
            .filter(|kind| kinds.contains(kind))
            .filter_map(|kind| self.token(kind))
            .collect();
        parts.join(DELIMITER)
    }

    /// Renders every set segment without checking completeness.
    pub(crate) fn render_all(&self) -> String {
        self.render(&SegmentKind::CANONICAL_ORDER)
    }

    fn missing(&self, kind: SegmentKind, group: IdGroup) -> IdError {
        IdError::MissingSegment {
            election_type: self.election_type,
            kind,
            group,
        }
    }

    fn require_subtype(&self, group: IdGroup) -> Result<(), IdError> {
        if self.rules().has_subtypes() && self.subtype.is_none() {
            return Err(self.missing(SegmentKind::Subtype, group));
        }
        Ok(())
    }

    /// Checks cross-segment rules that single `with_*` calls cannot.
    ///
    /// A division needs its prerequisite organisation or subtype, and a
    /// subtype-gated division must sit under a subtype that takes one.
    pub fn check_prerequisites(&self) -> Result<(), IdError> {
        if self.division.is_none() {
            return Ok(());
        }

        let rules = self.rules();
        match rules.division_prerequisite {
            DivisionPrerequisite::None => Ok(()),
            DivisionPrerequisite::Organisation if self.organisation.is_none() => {
                Err(IdError::MissingPrerequisite {
                    election_type: self.election_type,
                    kind: SegmentKind::Division,
                    requires: SegmentKind::Organisation,
                })
            }
            DivisionPrerequisite::Organisation => Ok(()),
            DivisionPrerequisite::Subtype(_) if self.subtype.is_none() => {
                Err(IdError::MissingPrerequisite {
                    election_type: self.election_type,
                    kind: SegmentKind::Division,
                    requires: SegmentKind::Subtype,
                })
            }
            DivisionPrerequisite::Subtype(_) if !rules.division_applicable(self.subtype) => {
                Err(IdError::SegmentNotApplicable {
                    election_type: self.election_type,
                    kind: SegmentKind::Division,
                })
            }
            DivisionPrerequisite::Subtype(_) => Ok(()),
        }
    }

    /// Election group id: `{election_type}.{date}`. Always available.
    #[must_use]
    pub fn election_group_id(&self) -> String {
        self.render(&[SegmentKind::ElectionType, SegmentKind::Date])
    }

    /// Subtype group id: `{election_type}.{subtype}.{date}`.
    ///
    /// `None` when the election type has no subtypes or none is set.
    #[must_use]
    pub fn subtype_group_id(&self) -> Option<String> {
        if !self.rules().has_subtypes() {
            return None;
        }
        self.subtype.map(|_| {
            self.render(&[
                SegmentKind::ElectionType,
                SegmentKind::Subtype,
                SegmentKind::Date,
            ])
        })
    }

    /// Organisation group id: `{election_type}[.{subtype}].{organisation}.{date}`.
    pub fn organisation_group_id(&self) -> Result<String, IdError> {
        let group = IdGroup::OrganisationGroupId;
        self.require_applicable(SegmentKind::Organisation)?;
        self.check_prerequisites()?;
        self.require_subtype(group)?;
        if self.organisation.is_none() {
            return Err(self.missing(SegmentKind::Organisation, group));
        }

        Ok(self.render(&[
            SegmentKind::ElectionType,
            SegmentKind::Subtype,
            SegmentKind::Organisation,
            SegmentKind::Date,
        ]))
    }

    /// Ballot id: every set segment, with all required segments present.
    pub fn ballot_id(&self) -> Result<String, IdError> {
        let group = IdGroup::BallotId;
        let rules = self.rules();
        self.check_prerequisites()?;
        self.require_subtype(group)?;
        if rules.organisation == Presence::Required && self.organisation.is_none() {
            return Err(self.missing(SegmentKind::Organisation, group));
        }
        if rules.division == Presence::Required
            && rules.division_applicable(self.subtype)
            && self.division.is_none()
        {
            return Err(self.missing(SegmentKind::Division, group));
        }

        Ok(self.render_all())
    }

    /// Renders every group that is currently available.
    ///
    /// The election group id is always present; groups that fail to render
    /// are left out.
    #[must_use]
    pub fn ids(&self) -> IdSet {
        let mut ids = BTreeMap::new();
        ids.insert(IdGroup::ElectionGroupId, self.election_group_id());

        if let Some(id) = self.subtype_group_id() {
            ids.insert(IdGroup::SubtypeGroupId, id);
        }

        let rendered = [
            (IdGroup::OrganisationGroupId, self.organisation_group_id()),
            (IdGroup::BallotId, self.ballot_id()),
        ];
        for (group, result) in rendered {
            match result {
                Ok(id) => {
                    ids.insert(group, id);
                }
                Err(err) => {
                    debug!(
                        election_type = %self.election_type,
                        group = %group,
                        error = %err,
                        "identifier group not available"
                    );
                }
            }
        }

        IdSet(ids)
    }
}

impl FromStr for IdBuilder {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::validate::parse(s)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::date_from_ymd;

    fn builder(election_type: ElectionType) -> IdBuilder {
        IdBuilder::new(election_type, date_from_ymd(2018, 5, 3).unwrap()).unwrap()
    }

    #[test]
    fn test_local_ballot() {
        let b = builder(ElectionType::Local)
            .with_organisation("birmingham")
            .unwrap()
            .with_division("area1")
            .unwrap();
        assert_eq!(b.ballot_id().unwrap(), "local.birmingham.area1.2018-05-03");
        assert_eq!(b.election_group_id(), "local.2018-05-03");
        assert_eq!(
            b.organisation_group_id().unwrap(),
            "local.birmingham.2018-05-03"
        );
        assert_eq!(b.subtype_group_id(), None);
    }

    #[test]
    fn test_local_by_election() {
        let b = builder(ElectionType::Local)
            .with_organisation("Birmingham")
            .unwrap()
            .with_division("Kings Norton")
            .unwrap()
            .with_contest_type("By-Election")
            .unwrap();
        assert_eq!(
            b.ballot_id().unwrap(),
            "local.birmingham.kings-norton.by.2018-05-03"
        );
    }

    #[test]
    fn test_receiver_is_unchanged() {
        let base = builder(ElectionType::Local).with_organisation("birmingham").unwrap();
        let a = base.with_division("area1").unwrap();
        let b = base.with_division("area2").unwrap();
        assert_eq!(base.division(), None);
        assert_eq!(a.ballot_id().unwrap(), "local.birmingham.area1.2018-05-03");
        assert_eq!(b.ballot_id().unwrap(), "local.birmingham.area2.2018-05-03");
    }

    #[test]
    fn test_division_without_organisation() {
        let b = builder(ElectionType::Local).with_division("area1").unwrap();
        let err = b.ballot_id().unwrap_err();
        assert_eq!(
            err,
            IdError::MissingPrerequisite {
                election_type: ElectionType::Local,
                kind: SegmentKind::Division,
                requires: SegmentKind::Organisation,
            }
        );
        assert!(b.organisation_group_id().is_err());
        assert_eq!(b.election_group_id(), "local.2018-05-03");
    }

    #[test]
    fn test_not_applicable_segments() {
        let parl = builder(ElectionType::Parl);
        assert!(matches!(
            parl.with_organisation("x"),
            Err(IdError::SegmentNotApplicable {
                kind: SegmentKind::Organisation,
                ..
            })
        ));
        assert!(matches!(
            parl.with_subtype("c"),
            Err(IdError::SegmentNotApplicable {
                kind: SegmentKind::Subtype,
                ..
            })
        ));
        assert!(matches!(
            builder(ElectionType::Mayor).with_division("x"),
            Err(IdError::SegmentNotApplicable {
                kind: SegmentKind::Division,
                ..
            })
        ));
    }

    #[test]
    fn test_illegal_values() {
        assert!(matches!(
            builder(ElectionType::Sp).with_subtype("a"),
            Err(IdError::IllegalSegmentValue {
                kind: SegmentKind::Subtype,
                ..
            })
        ));
        assert!(matches!(
            builder(ElectionType::Ref).with_contest_type("by"),
            Err(IdError::IllegalSegmentValue {
                kind: SegmentKind::ContestType,
                ..
            })
        ));
        assert!(matches!(
            builder(ElectionType::Local).with_contest_type("local"),
            Err(IdError::IllegalSegmentValue { .. })
        ));
    }

    #[test]
    fn test_election_contest_type_clears_by() {
        let b = builder(ElectionType::Parl)
            .with_division("cities-of-london")
            .unwrap()
            .with_contest_type("by")
            .unwrap()
            .with_contest_type("election")
            .unwrap();
        assert_eq!(b.ballot_id().unwrap(), "parl.cities-of-london.2018-05-03");
    }

    #[test]
    fn test_gla_additional_has_no_division() {
        let a = builder(ElectionType::Gla).with_subtype("a").unwrap();
        assert_eq!(a.ballot_id().unwrap(), "gla.a.2018-05-03");
        assert_eq!(a.subtype_group_id().unwrap(), "gla.a.2018-05-03");

        let with_div = a.with_division("barnet").unwrap();
        assert!(matches!(
            with_div.ballot_id(),
            Err(IdError::SegmentNotApplicable {
                kind: SegmentKind::Division,
                ..
            })
        ));
    }

    #[test]
    fn test_gla_constituency_needs_division() {
        let c = builder(ElectionType::Gla).with_subtype("c").unwrap();
        assert!(matches!(
            c.ballot_id(),
            Err(IdError::MissingSegment {
                kind: SegmentKind::Division,
                group: IdGroup::BallotId,
                ..
            })
        ));
        let ballot = c.with_division("Barnet and Camden").unwrap();
        assert_eq!(
            ballot.ballot_id().unwrap(),
            "gla.c.barnet-and-camden.2018-05-03"
        );
    }

    #[test]
    fn test_subtype_required_for_ballot() {
        let sp = builder(ElectionType::Sp);
        assert!(matches!(
            sp.ballot_id(),
            Err(IdError::MissingSegment {
                kind: SegmentKind::Subtype,
                ..
            })
        ));
        assert_eq!(sp.subtype_group_id(), None);
    }

    #[test]
    fn test_mayor_ids_share_slug() {
        let b = builder(ElectionType::Mayor).with_organisation("London").unwrap();
        let ids = b.ids();
        assert_eq!(ids.get(IdGroup::OrganisationGroupId), Some("mayor.london.2018-05-03"));
        assert_eq!(ids.get(IdGroup::BallotId), Some("mayor.london.2018-05-03"));
        assert_eq!(
            ids.distinct(),
            vec!["mayor.2018-05-03", "mayor.london.2018-05-03"]
        );
    }

    #[test]
    fn test_minimal_ids() {
        for election_type in ElectionType::ALL {
            let ids = builder(election_type).ids();
            assert_eq!(
                ids.get(IdGroup::ElectionGroupId),
                Some(format!("{election_type}.2018-05-03").as_str())
            );
        }
    }

    #[test]
    fn test_ids_serialize_as_object() {
        let b = builder(ElectionType::Sp)
            .with_subtype("c")
            .unwrap()
            .with_division("Glasgow Kelvin")
            .unwrap();
        let json = serde_json::to_value(b.ids()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "election_group_id": "sp.2018-05-03",
                "subtype_group_id": "sp.c.2018-05-03",
                "ballot_id": "sp.c.glasgow-kelvin.2018-05-03",
            })
        );
    }

    #[test]
    fn test_new_rejects_unrenderable_years() {
        let far = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
        assert!(matches!(
            IdBuilder::new(ElectionType::Local, far),
            Err(IdError::InvalidDate { value }) if value == "+10000-01-01"
        ));
        let before = NaiveDate::from_ymd_opt(-5, 1, 1).unwrap();
        assert!(IdBuilder::new(ElectionType::Parl, before).is_err());
    }

    #[test]
    fn test_from_strs() {
        let b = IdBuilder::from_strs("pcc", "2021-05-06").unwrap();
        assert_eq!(b.election_group_id(), "pcc.2021-05-06");
        assert!(matches!(
            IdBuilder::from_strs("pcc", "2021-02-30"),
            Err(IdError::InvalidDate { .. })
        ));
        assert!(IdBuilder::from_strs("council", "2021-05-06").is_err());
    }
}
