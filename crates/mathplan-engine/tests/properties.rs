use std::collections::BTreeSet;
use std::sync::LazyLock;

use mathplan_engine::{Advisor, EligibilityResult};
use mathplan_model::{ClearanceKind, CourseId, Grade, MajorCode, StudentAcademicRecord};
use proptest::prelude::*;

static ADVISOR: LazyLock<Advisor> =
    LazyLock::new(|| Advisor::builtin().expect("builtin advisor"));

const COURSES: &[&str] = &[
    "M 002", "M 101", "M 117", "M 118", "M 120", "M 124", "M 125", "M 126", "M 127", "M 141",
    "M 155", "M 156", "M 160", "M 161", "M 255", "S 201",
];

const GRADES: &[Grade] = &[
    Grade::A,
    Grade::B,
    Grade::BMinus,
    Grade::C,
    Grade::CMinus,
    Grade::D,
    Grade::F,
    Grade::Withdrawn,
];

const TRANSFERS: &[&str] = &[
    "MTH 111",
    "MAT 099",
    "MAT 122",
    "AP CALC AB",
    "AP STAT",
    "MATH1B",
    "M120",
    "PHIL 101",
];

const MAJORS: &[&str] = &[
    "AGBI-BS",
    "ANTH-BA",
    "BUSA-BS",
    "CBEG-BS",
    "CPSC-BS",
    "ECON-BA",
    "MECH-BS",
    "HORT-HOSZ-BS",
];

fn id(code: &str) -> CourseId {
    CourseId::new(code).unwrap()
}

fn kind(credit: bool) -> ClearanceKind {
    if credit {
        ClearanceKind::CreditEarned
    } else {
        ClearanceKind::Placed
    }
}

prop_compose! {
    fn arb_record()(
        completed in prop::collection::vec((0..COURSES.len(), 0..GRADES.len()), 0..4),
        transfers in prop::collection::vec((0..TRANSFERS.len(), any::<bool>()), 0..3),
        placements in prop::collection::vec((0..COURSES.len(), any::<bool>()), 0..3),
        major in prop::option::of(0..MAJORS.len()),
    ) -> StudentAcademicRecord {
        let mut record = StudentAcademicRecord::default();
        for (course, grade) in completed {
            record = record.with_completed(id(COURSES[course]), GRADES[grade]);
        }
        for (code, credit) in transfers {
            record = record.with_transfer(TRANSFERS[code], kind(credit));
        }
        for (course, credit) in placements {
            record = record.with_placement(id(COURSES[course]), kind(credit));
        }
        if let Some(major) = major {
            record = record.with_major(MajorCode::new(MAJORS[major]).unwrap());
        }
        record
    }
}

fn evaluate(record: &StudentAcademicRecord) -> EligibilityResult {
    ADVISOR.evaluate(record).unwrap()
}

fn set(ids: impl Iterator<Item = CourseId>) -> BTreeSet<CourseId> {
    ids.collect()
}

proptest! {
    #[test]
    fn credit_implies_cleared_implies_eligible(record in arb_record()) {
        let result = evaluate(&record);
        for course in ADVISOR.catalog().iter() {
            let standing = result.standing(&course.id);
            if standing.has_credit() {
                prop_assert!(standing.is_cleared());
            }
            if standing.is_cleared() {
                prop_assert!(standing.is_eligible());
                for parent in course.canonical_parents() {
                    prop_assert!(result.is_cleared(parent), "{} cleared but not {}", course.id, parent);
                }
            }
            if !course.has_prerequisites() {
                prop_assert!(standing.is_eligible(), "{} should be eligible", course.id);
            }
        }
    }

    #[test]
    fn evaluation_is_idempotent(record in arb_record()) {
        prop_assert_eq!(evaluate(&record), evaluate(&record));
        let first = ADVISOR.recommend(&record).ok().map(|advice| advice.recommendation);
        let second = ADVISOR.recommend(&record).ok().map(|advice| advice.recommendation);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn credit_placement_never_removes_clearance(
        record in arb_record(),
        extra in 0..COURSES.len(),
    ) {
        let before = evaluate(&record);
        let after = evaluate(&record.clone().with_placement(id(COURSES[extra]), ClearanceKind::CreditEarned));
        let cleared_before = set(before.cleared().cloned());
        let cleared_after = set(after.cleared().cloned());
        prop_assert!(cleared_before.is_subset(&cleared_after));
        let eligible_before = set(before.eligible().cloned());
        let eligible_after = set(after.eligible().cloned());
        prop_assert!(eligible_before.is_subset(&eligible_after));
        prop_assert!(after.has_credit(&id(COURSES[extra])));
    }

    #[test]
    fn single_major_recommendations_never_fail(record in arb_record()) {
        prop_assert!(ADVISOR.recommend(&record).is_ok());
    }
}

#[test]
fn advisor_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Advisor>();
}
