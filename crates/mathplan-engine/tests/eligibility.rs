use mathplan_catalog::CatalogError;
use mathplan_engine::{Advisor, EligibilityResult, EngineConfig, EngineError};
use mathplan_model::{
    ClearanceKind, ClearanceSource, CourseId, Grade, Standing, StudentAcademicRecord,
};

fn id(code: &str) -> CourseId {
    CourseId::new(code).unwrap()
}

fn evaluate(record: &StudentAcademicRecord) -> EligibilityResult {
    Advisor::builtin()
        .expect("builtin advisor")
        .evaluate(record)
        .expect("evaluate record")
}

#[test]
fn empty_record_is_eligible_only_for_entry_courses() {
    let result = evaluate(&StudentAcademicRecord::default());
    assert_eq!(result.standing(&id("M 002")), Standing::Eligible);
    assert_eq!(result.standing(&id("M 101")), Standing::Eligible);
    assert_eq!(result.standing(&id("S 100")), Standing::Eligible);
    assert_eq!(result.standing(&id("M 117")), Standing::Ineligible);
    assert_eq!(result.cleared().count(), 0);
    assert!(result.ignored_transfers().is_empty());
}

#[test]
fn intermediate_algebra_transfer_clears_both_courses() {
    let record = StudentAcademicRecord::default().with_transfer("MTH 111", ClearanceKind::CreditEarned);
    let result = evaluate(&record);
    assert_eq!(result.standing(&id("M 117")), Standing::CreditEarned);
    assert_eq!(result.standing(&id("M 118")), Standing::CreditEarned);
    // Readiness is implied, without credit.
    assert_eq!(result.standing(&id("M 002")), Standing::Cleared);
    assert!(result.is_eligible(&id("M 124")));
    assert!(result.is_eligible(&id("M 125")));
    assert!(result.is_eligible(&id("M 141")));
    assert!(!result.is_eligible(&id("M 126")));
}

#[test]
fn failing_grade_does_not_clear() {
    let record = StudentAcademicRecord::default().with_completed(id("M 117"), Grade::CMinus);
    let result = evaluate(&record);
    let status = result.status(&id("M 117")).unwrap();
    assert_eq!(status.standing, Standing::Ineligible);
    assert_eq!(status.best_grade, Some(Grade::CMinus));
    assert!(status.sources.is_empty());

    let lenient = Advisor::new(
        mathplan_catalog::Policy::builtin().unwrap(),
        EngineConfig::lenient(),
    )
    .unwrap();
    let result = lenient.evaluate(&record).unwrap();
    assert_eq!(result.standing(&id("M 117")), Standing::CreditEarned);
}

#[test]
fn grade_threshold_needs_a_b() {
    let with_c = StudentAcademicRecord::default()
        .with_completed(id("M 124"), Grade::C)
        .with_completed(id("M 126"), Grade::B);
    let result = evaluate(&with_c);
    assert!(result.is_cleared(&id("M 124")));
    assert!(!result.is_eligible(&id("M 160")));
    assert!(!result.is_eligible(&id("M 156")));

    let with_b = StudentAcademicRecord::default()
        .with_completed(id("M 124"), Grade::B)
        .with_completed(id("M 126"), Grade::BPlus);
    let result = evaluate(&with_b);
    assert!(result.is_eligible(&id("M 160")));
    assert!(result.is_eligible(&id("M 156")));
}

#[test]
fn placement_meets_grade_threshold() {
    let record = StudentAcademicRecord::default()
        .with_placement(id("M 124"), ClearanceKind::Placed)
        .with_placement(id("M 126"), ClearanceKind::Placed);
    let result = evaluate(&record);
    assert_eq!(result.standing(&id("M 124")), Standing::Cleared);
    assert!(result.is_eligible(&id("M 160")));
}

#[test]
fn placement_implies_earlier_courses() {
    let record = StudentAcademicRecord::default().with_placement(id("M 125"), ClearanceKind::Placed);
    let result = evaluate(&record);
    for code in ["M 002", "M 117", "M 118", "M 125"] {
        assert_eq!(result.standing(&id(code)), Standing::Cleared, "{code}");
    }
    assert!(result.is_eligible(&id("M 126")));
    assert!(!result.is_cleared(&id("M 124")));
    let sources = &result.status(&id("M 118")).unwrap().sources;
    assert!(sources.contains(&ClearanceSource::Implied { via: id("M 125") }));
}

#[test]
fn aggregate_course_clears_covered_courses() {
    let record = StudentAcademicRecord::default().with_completed(id("M 127"), Grade::B);
    let result = evaluate(&record);
    for code in ["M 117", "M 118", "M 124", "M 125", "M 126"] {
        assert_eq!(result.standing(&id(code)), Standing::CreditEarned, "{code}");
    }
    assert!(result.is_eligible(&id("M 160")));
    assert!(result.is_eligible(&id("M 155")));
}

#[test]
fn generic_core_credit_satisfies_only_core_courses() {
    let record = StudentAcademicRecord::default().with_transfer("MATH1B", ClearanceKind::CreditEarned);
    let result = evaluate(&record);
    assert!(result.has_credit(&id("M 101")));
    assert!(result.has_credit(&id("S 204")));
    assert!(!result.is_cleared(&id("M 117")));
    assert_eq!(
        result.status(&id("M 101")).unwrap().sources,
        vec![ClearanceSource::GenericCore {
            code: "MATH1B".to_string()
        }]
    );
}

#[test]
fn equivalency_kind_overrides_record_kind() {
    let record = StudentAcademicRecord::default().with_transfer("MAT 099", ClearanceKind::CreditEarned);
    let result = evaluate(&record);
    assert_eq!(result.standing(&id("M 002")), Standing::Cleared);
    assert!(result.is_eligible(&id("M 117")));
}

#[test]
fn calculus_credit_implies_whole_chain() {
    let record = StudentAcademicRecord::default().with_transfer("AP CALC AB", ClearanceKind::CreditEarned);
    let result = evaluate(&record);
    assert!(result.has_credit(&id("M 155")));
    for code in ["M 124", "M 125", "M 118", "M 117", "M 002"] {
        assert_eq!(result.standing(&id(code)), Standing::Cleared, "{code}");
    }
    assert!(!result.is_eligible(&id("M 255")));
}

#[test]
fn unknown_transfer_is_ignored() {
    let record = StudentAcademicRecord::default()
        .with_transfer("PHIL 101", ClearanceKind::CreditEarned)
        .with_transfer("MTH 111", ClearanceKind::CreditEarned);
    let result = evaluate(&record);
    assert_eq!(result.ignored_transfers(), ["PHIL 101".to_string()]);
    assert!(result.has_credit(&id("M 117")));
}

#[test]
fn unknown_completed_course_is_fatal() {
    let record = StudentAcademicRecord::default().with_completed(id("M 999"), Grade::A);
    let err = Advisor::builtin().unwrap().evaluate(&record).unwrap_err();
    assert!(matches!(
        err,
        EngineError::Catalog(CatalogError::MissingCatalogEntry { .. })
    ));
}

#[test]
fn unknown_placement_course_is_fatal() {
    let record = StudentAcademicRecord::default().with_placement(id("M 998"), ClearanceKind::Placed);
    assert!(Advisor::builtin().unwrap().evaluate(&record).is_err());
}

#[test]
fn result_serializes_by_course() {
    let record = StudentAcademicRecord::default().with_completed(id("M 117"), Grade::A);
    let value = serde_json::to_value(evaluate(&record)).unwrap();
    assert_eq!(value["courses"]["M 117"]["standing"], "credit_earned");
    assert_eq!(value["courses"]["M 117"]["sources"][0]["type"], "completed");
    assert_eq!(value["courses"]["M 118"]["standing"], "eligible");
}
