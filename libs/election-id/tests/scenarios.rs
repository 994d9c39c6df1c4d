//! Worked examples across election types.

use election_id::{
    check, date_from_ymd, validate, ElectionType, IdBuilder, IdError, IdGroup, SegmentKind,
};
use rstest::rstest;

fn builder(election_type: ElectionType, y: i32, m: u32, d: u32) -> IdBuilder {
    IdBuilder::new(election_type, date_from_ymd(y, m, d).unwrap()).unwrap()
}

#[test]
fn test_local_council_ward() {
    let b = builder(ElectionType::Local, 2018, 5, 3)
        .with_organisation("birmingham")
        .unwrap()
        .with_division("area1")
        .unwrap()
        .with_contest_type("election")
        .unwrap();

    assert_eq!(b.ballot_id().unwrap(), "local.birmingham.area1.2018-05-03");
    assert_eq!(b.election_group_id(), "local.2018-05-03");
    assert_eq!(
        b.organisation_group_id().unwrap(),
        "local.birmingham.2018-05-03"
    );
}

#[test]
fn test_validate_local_ballot() {
    assert!(validate("local.birmingham.area1.2018-05-03"));
}

#[test]
fn test_validate_rejects_impossible_date() {
    assert!(!validate("local.birmingham.area1.2018-13-40"));
    assert!(matches!(
        check("local.birmingham.area1.2018-13-40"),
        Err(IdError::InvalidDate { .. })
    ));
}

#[test]
fn test_parliamentary_by_election() {
    let b = builder(ElectionType::Parl, 2021, 3, 4)
        .with_contest_type("by")
        .unwrap()
        .with_division("Cities of London")
        .unwrap();

    assert_eq!(b.ballot_id().unwrap(), "parl.cities-of-london.by.2021-03-04");
    assert_eq!(b.subtype_group_id(), None);
    assert!(matches!(
        b.with_subtype("by"),
        Err(IdError::SegmentNotApplicable {
            kind: SegmentKind::Subtype,
            ..
        })
    ));
    assert!(validate(&b.ballot_id().unwrap()));
}

#[test]
fn test_senedd_division_needs_subtype() {
    let b = builder(ElectionType::Senedd, 2021, 5, 6)
        .with_division("area2")
        .unwrap();

    assert_eq!(
        b.ballot_id(),
        Err(IdError::MissingPrerequisite {
            election_type: ElectionType::Senedd,
            kind: SegmentKind::Division,
            requires: SegmentKind::Subtype,
        })
    );
    assert!(!b.ids().contains(IdGroup::BallotId));

    let fixed = b.with_subtype("c").unwrap();
    assert_eq!(fixed.ballot_id().unwrap(), "senedd.c.area2.2021-05-06");
    assert_eq!(fixed.subtype_group_id().unwrap(), "senedd.c.2021-05-06");
}

#[rstest]
#[case::europarl(ElectionType::Europarl, &[("division", "London")], "europarl.london.2019-05-23")]
#[case::gla_additional(ElectionType::Gla, &[("subtype", "a")], "gla.a.2019-05-23")]
#[case::gla_constituency(
    ElectionType::Gla,
    &[("subtype", "c"), ("division", "Barnet and Camden")],
    "gla.c.barnet-and-camden.2019-05-23"
)]
#[case::mayor(ElectionType::Mayor, &[("organisation", "Greater London Authority")], "mayor.greater-london-authority.2019-05-23")]
#[case::naw_region(ElectionType::Naw, &[("subtype", "r"), ("division", "South Wales Central")], "naw.r.south-wales-central.2019-05-23")]
#[case::nia(ElectionType::Nia, &[("division", "Belfast East")], "nia.belfast-east.2019-05-23")]
#[case::pcc(ElectionType::Pcc, &[("organisation", "Avon and Somerset")], "pcc.avon-and-somerset.2019-05-23")]
#[case::ref_council(ElectionType::Ref, &[("organisation", "Bristol")], "ref.bristol.2019-05-23")]
#[case::ref_parish(
    ElectionType::Ref,
    &[("division", "Kings Norton"), ("organisation", "Birmingham")],
    "ref.birmingham.kings-norton.2019-05-23"
)]
#[case::sp_by(
    ElectionType::Sp,
    &[("contest_type", "by-election"), ("subtype", "c"), ("division", "Airdrie and Shotts")],
    "sp.c.airdrie-and-shotts.by.2019-05-23"
)]
fn test_ballot_ids(
    #[case] election_type: ElectionType,
    #[case] segments: &[(&str, &str)],
    #[case] expected: &str,
) {
    let mut b = builder(election_type, 2019, 5, 23);
    for (kind, value) in segments {
        b = match *kind {
            "subtype" => b.with_subtype(value),
            "organisation" => b.with_organisation(value),
            "division" => b.with_division(value),
            "contest_type" => b.with_contest_type(value),
            other => panic!("unknown segment {other}"),
        }
        .unwrap();
    }

    assert_eq!(b.ballot_id().unwrap(), expected);
    assert_eq!(b.ids().get(IdGroup::BallotId), Some(expected));
    assert!(validate(expected), "{expected}: {:?}", check(expected));
}

#[rstest]
#[case::local_without_division(ElectionType::Local, SegmentKind::Division)]
#[case::pcc_without_organisation(ElectionType::Pcc, SegmentKind::Organisation)]
#[case::parl_without_division(ElectionType::Parl, SegmentKind::Division)]
#[case::sp_without_subtype(ElectionType::Sp, SegmentKind::Subtype)]
fn test_incomplete_ballot(#[case] election_type: ElectionType, #[case] missing: SegmentKind) {
    let mut b = builder(election_type, 2019, 5, 23);
    if election_type == ElectionType::Local {
        b = b.with_organisation("birmingham").unwrap();
    }

    match b.ballot_id() {
        Err(IdError::MissingSegment { kind, group, .. }) => {
            assert_eq!(kind, missing);
            assert_eq!(group, IdGroup::BallotId);
        }
        other => panic!("expected missing {missing}, got {other:?}"),
    }
}

#[test]
fn test_ids_lists_every_available_group() {
    let b = builder(ElectionType::Local, 2018, 5, 3)
        .with_organisation("birmingham")
        .unwrap();
    let ids = b.ids();

    let groups: Vec<IdGroup> = ids.iter().map(|(group, _)| group).collect();
    assert_eq!(
        groups,
        vec![IdGroup::ElectionGroupId, IdGroup::OrganisationGroupId]
    );
    assert_eq!(
        ids.distinct(),
        vec!["local.2018-05-03", "local.birmingham.2018-05-03"]
    );
}
