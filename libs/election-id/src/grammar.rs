//! Grammar rules per election type.
//!
//! [`ALL_RULES`] is the single source of truth for which segments an
//! election type may carry, which values the closed segments accept, and
//! which segments depend on others. Adding an election type is a new
//! [`ElectionType`] variant plus one table row.

use serde::Serialize;

use crate::segment::{ContestType, ElectionType, SegmentKind, Subtype};

/// How a segment participates in an election type's identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// Needed to render a ballot id.
    Required,
    /// May be set but a ballot id renders without it.
    Optional,
    /// Never part of an identifier for this election type.
    Disallowed,
}

/// What must be present before a division can be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "requires", content = "subtypes")]
pub enum DivisionPrerequisite {
    None,
    Organisation,
    /// One of these subtypes must be set; other subtypes take no division.
    Subtype(&'static [Subtype]),
}

/// Segment rules for one election type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ElectionRules {
    pub election_type: ElectionType,
    pub description: &'static str,
    /// Legal subtypes; empty when the type has none. When non-empty a
    /// subtype is required below the election group.
    pub subtypes: &'static [Subtype],
    pub organisation: Presence,
    pub division: Presence,
    pub division_prerequisite: DivisionPrerequisite,
    pub contest_types: &'static [ContestType],
}

const ORDINARY_AND_BY: &[ContestType] = &[ContestType::Election, ContestType::ByElection];
const ORDINARY_ONLY: &[ContestType] = &[ContestType::Election];
const CONSTITUENCY_AND_REGION: &[Subtype] = &[Subtype::Constituency, Subtype::Region];

/// The grammar table, one row per [`ElectionType`] in [`ElectionType::ALL`] order.
pub static ALL_RULES: [ElectionRules; 11] = [
    ElectionRules {
        election_type: ElectionType::Europarl,
        description: "European Parliament (UK)",
        subtypes: &[],
        organisation: Presence::Disallowed,
        division: Presence::Required,
        division_prerequisite: DivisionPrerequisite::None,
        contest_types: ORDINARY_AND_BY,
    },
    ElectionRules {
        election_type: ElectionType::Gla,
        description: "Greater London Assembly",
        subtypes: &[Subtype::Additional, Subtype::Constituency],
        organisation: Presence::Disallowed,
        division: Presence::Required,
        division_prerequisite: DivisionPrerequisite::Subtype(&[Subtype::Constituency]),
        contest_types: ORDINARY_AND_BY,
    },
    ElectionRules {
        election_type: ElectionType::Local,
        description: "Local elections",
        subtypes: &[],
        organisation: Presence::Required,
        division: Presence::Required,
        division_prerequisite: DivisionPrerequisite::Organisation,
        contest_types: ORDINARY_AND_BY,
    },
    ElectionRules {
        election_type: ElectionType::Mayor,
        description: "Mayoral elections",
        subtypes: &[],
        organisation: Presence::Required,
        division: Presence::Disallowed,
        division_prerequisite: DivisionPrerequisite::None,
        contest_types: ORDINARY_AND_BY,
    },
    ElectionRules {
        election_type: ElectionType::Naw,
        description: "National Assembly for Wales",
        subtypes: CONSTITUENCY_AND_REGION,
        organisation: Presence::Disallowed,
        division: Presence::Required,
        division_prerequisite: DivisionPrerequisite::Subtype(CONSTITUENCY_AND_REGION),
        contest_types: ORDINARY_AND_BY,
    },
    ElectionRules {
        election_type: ElectionType::Nia,
        description: "Northern Ireland Assembly",
        subtypes: &[],
        organisation: Presence::Disallowed,
        division: Presence::Required,
        division_prerequisite: DivisionPrerequisite::None,
        contest_types: ORDINARY_AND_BY,
    },
    ElectionRules {
        election_type: ElectionType::Parl,
        description: "UK Parliament",
        subtypes: &[],
        organisation: Presence::Disallowed,
        division: Presence::Required,
        division_prerequisite: DivisionPrerequisite::None,
        contest_types: ORDINARY_AND_BY,
    },
    ElectionRules {
        election_type: ElectionType::Pcc,
        description: "Police and Crime Commissioner",
        subtypes: &[],
        organisation: Presence::Required,
        division: Presence::Disallowed,
        division_prerequisite: DivisionPrerequisite::None,
        contest_types: ORDINARY_AND_BY,
    },
    ElectionRules {
        election_type: ElectionType::Ref,
        description: "Referendums",
        subtypes: &[],
        organisation: Presence::Required,
        division: Presence::Optional,
        division_prerequisite: DivisionPrerequisite::Organisation,
        contest_types: ORDINARY_ONLY,
    },
    ElectionRules {
        election_type: ElectionType::Senedd,
        description: "Senedd Cymru",
        subtypes: CONSTITUENCY_AND_REGION,
        organisation: Presence::Disallowed,
        division: Presence::Required,
        division_prerequisite: DivisionPrerequisite::Subtype(CONSTITUENCY_AND_REGION),
        contest_types: ORDINARY_AND_BY,
    },
    ElectionRules {
        election_type: ElectionType::Sp,
        description: "Scottish Parliament",
        subtypes: CONSTITUENCY_AND_REGION,
        organisation: Presence::Disallowed,
        division: Presence::Required,
        division_prerequisite: DivisionPrerequisite::Subtype(CONSTITUENCY_AND_REGION),
        contest_types: ORDINARY_AND_BY,
    },
];

/// Returns the grammar rules for an election type.
#[must_use]
pub fn rules(election_type: ElectionType) -> &'static ElectionRules {
    // ALL_RULES is laid out in declaration order; see the completeness test.
    &ALL_RULES[election_type as usize]
}

/// Returns true if `kind` can ever appear in identifiers of `election_type`.
#[must_use]
pub fn is_segment_applicable(election_type: ElectionType, kind: SegmentKind) -> bool {
    rules(election_type).is_applicable(kind)
}

/// Returns the closed set of tokens `kind` accepts for `election_type`.
///
/// Empty for free-form kinds (organisation, division, date) and for kinds
/// that are not applicable.
#[must_use]
pub fn legal_values(election_type: ElectionType, kind: SegmentKind) -> Vec<&'static str> {
    rules(election_type).legal_values(kind)
}

/// Returns the canonical token order for `election_type`.
#[must_use]
pub fn segment_order(election_type: ElectionType) -> Vec<SegmentKind> {
    rules(election_type).segment_order()
}

impl ElectionRules {
    #[must_use]
    pub fn has_subtypes(&self) -> bool {
        !self.subtypes.is_empty()
    }

    #[must_use]
    pub fn allows_by_elections(&self) -> bool {
        self.contest_types.contains(&ContestType::ByElection)
    }

    /// Returns true if `kind` can ever appear for this election type.
    #[must_use]
    pub fn is_applicable(&self, kind: SegmentKind) -> bool {
        match kind {
            SegmentKind::ElectionType | SegmentKind::Date => true,
            SegmentKind::Subtype => self.has_subtypes(),
            SegmentKind::Organisation => self.organisation != Presence::Disallowed,
            SegmentKind::Division => self.division != Presence::Disallowed,
            SegmentKind::ContestType => !self.contest_types.is_empty(),
        }
    }

    /// Returns the closed set of tokens `kind` accepts.
    #[must_use]
    pub fn legal_values(&self, kind: SegmentKind) -> Vec<&'static str> {
        match kind {
            SegmentKind::ElectionType => vec![self.election_type.as_str()],
            SegmentKind::Subtype => self.subtypes.iter().map(Subtype::as_str).collect(),
            SegmentKind::ContestType => self
                .contest_types
                .iter()
                .flat_map(|c| c.spellings().iter().copied())
                .collect(),
            SegmentKind::Organisation | SegmentKind::Division | SegmentKind::Date => Vec::new(),
        }
    }

    /// Returns the applicable segment kinds in concatenation order.
    ///
    /// Always starts with the election type and ends with the date.
    #[must_use]
    pub fn segment_order(&self) -> Vec<SegmentKind> {
        SegmentKind::CANONICAL_ORDER
            .into_iter()
            .filter(|kind| self.is_applicable(*kind))
            .collect()
    }

    /// Returns true if a division can be rendered under `subtype`.
    ///
    /// For subtype-gated divisions an unset subtype answers false.
    #[must_use]
    pub fn division_applicable(&self, subtype: Option<Subtype>) -> bool {
        if self.division == Presence::Disallowed {
            return false;
        }
        match self.division_prerequisite {
            DivisionPrerequisite::Subtype(allowed) => {
                subtype.is_some_and(|subtype| allowed.contains(&subtype))
            }
            DivisionPrerequisite::None | DivisionPrerequisite::Organisation => true,
        }
    }
}
