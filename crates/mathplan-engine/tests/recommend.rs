use std::path::Path;

use mathplan_catalog::{Policy, parse_registry};
use mathplan_engine::recommend::reachable_missing_sets;
use mathplan_engine::{
    Advisor, DecisionTable, EngineConfig, EngineError, GateIndex, GroupCredits,
    RecommendationResolver,
};
use mathplan_model::{
    AdvisoryCategory, ClearanceKind, CourseId, Grade, MajorCode, NextStepCode,
    RequirementTarget, StudentAcademicRecord,
};

fn id(code: &str) -> CourseId {
    CourseId::new(code).unwrap()
}

fn major(code: &str) -> MajorCode {
    MajorCode::new(code).unwrap()
}

fn advisor() -> Advisor {
    Advisor::builtin().expect("builtin advisor")
}

fn next_step(record: &StudentAcademicRecord) -> NextStepCode {
    advisor()
        .recommend(record)
        .expect("recommendation")
        .recommendation
        .code
}

/// Builtin catalog with a single major requiring only M 120.
fn policy_requiring_m120() -> Policy {
    let builtin = Policy::builtin().unwrap();
    let registry = parse_registry(
        r#"
[policy]
schema = "mathplan.majors"
schema_version = 1

[[majors]]
code = "ALGB-BS"
name = "Algebra Studies"
semester1 = "M 120"
"#,
        Path::new("majors.toml"),
        &builtin.catalog,
    )
    .unwrap();
    Policy {
        catalog: builtin.catalog,
        registry,
    }
}

#[test]
fn dual_transfer_leaves_only_trigonometry() {
    let record = StudentAcademicRecord::default()
        .with_transfer("MTH 111", ClearanceKind::CreditEarned)
        .with_major(major("ENHR-LDAZ-BS"));
    let advice = advisor().recommend(&record).unwrap();
    assert_eq!(advice.recommendation.code, NextStepCode::PlaceOut125);
    assert_eq!(advice.recommendation.missing, vec![id("M 125")]);
    assert_eq!(
        advice.recommendation.category,
        AdvisoryCategory::StudyAndPlace
    );
}

#[test]
fn core_only_major_without_records_is_already_eligible() {
    let record = StudentAcademicRecord::default().with_major(major("ANTH-BA"));
    let advice = advisor().recommend(&record).unwrap();
    assert_eq!(advice.recommendation.code, NextStepCode::AlreadyEligible);
    assert!(advice.recommendation.missing.is_empty());
}

#[test]
fn no_major_falls_back_to_core_requirement() {
    let advice = advisor().recommend(&StudentAcademicRecord::default()).unwrap();
    assert_eq!(advice.recommendation.code, NextStepCode::AlreadyEligible);
    assert_eq!(advice.recommendation.requirements.len(), 1);
}

#[test]
fn credited_requirements_need_nothing() {
    let record = StudentAcademicRecord::default()
        .with_completed(id("S 100"), Grade::B)
        .with_major(major("ANTH-BA"));
    assert_eq!(next_step(&record), NextStepCode::NotNeeded);
}

#[test]
fn core_credits_are_tallied() {
    let record = StudentAcademicRecord::default()
        .with_completed(id("M 117"), Grade::B)
        .with_completed(id("M 118"), Grade::C)
        .with_major(major("ANTH-BA"));
    let advice = advisor().recommend(&record).unwrap();
    assert_eq!(advice.recommendation.code, NextStepCode::NotNeeded);
    let credits = &advice.recommendation.credits;
    assert_eq!(
        credits,
        &vec![GroupCredits {
            group: "AUCC3".to_string(),
            completed: 2,
            required: 3,
        }]
    );
    assert!(!credits[0].is_satisfied());

    let record = StudentAcademicRecord::default()
        .with_completed(id("S 100"), Grade::B)
        .with_completed(id("M 117"), Grade::F)
        .with_major(major("ANTH-BA"));
    let credits = advisor().recommend(&record).unwrap().recommendation.credits;
    assert_eq!(credits[0].completed, 3);
    assert!(credits[0].is_satisfied());

    let record = StudentAcademicRecord::default().with_major(major("ANTH-BA"));
    let credits = advisor().recommend(&record).unwrap().recommendation.credits;
    assert_eq!(credits[0].completed, 0);
}

#[test]
fn course_requirements_have_no_credit_tally() {
    let record = StudentAcademicRecord::default()
        .with_placement(id("M 160"), ClearanceKind::CreditEarned)
        .with_major(major("CBEG-BS"));
    let advice = advisor().recommend(&record).unwrap();
    assert!(advice.recommendation.credits.is_empty());
}

#[test]
fn placed_requirements_are_not_credit() {
    let record = StudentAcademicRecord::default()
        .with_placement(id("M 125"), ClearanceKind::Placed)
        .with_major(major("ENHR-LDAZ-BS"));
    assert_eq!(next_step(&record), NextStepCode::AlreadyEligible);
}

#[test]
fn empty_record_places_into_the_chain() {
    let record = StudentAcademicRecord::default().with_major(major("ENHR-LDAZ-BS"));
    assert_eq!(next_step(&record), NextStepCode::PlaceInto125);

    let record = StudentAcademicRecord::default().with_major(major("AGBU-BS"));
    assert_eq!(next_step(&record), NextStepCode::PlaceOut117_118_124);

    let record = StudentAcademicRecord::default().with_major(major("HORT-HOSZ-BS"));
    assert_eq!(next_step(&record), NextStepCode::PlaceInto155);
}

#[test]
fn readiness_cleared_places_out_of_algebra() {
    let record = StudentAcademicRecord::default()
        .with_placement(id("M 002"), ClearanceKind::Placed)
        .with_major(major("AGBU-BS"));
    assert_eq!(next_step(&record), NextStepCode::PlaceOut117_118_124);

    let record = StudentAcademicRecord::default()
        .with_placement(id("M 002"), ClearanceKind::Placed)
        .with_major(major("ENHR-LDAZ-BS"));
    assert_eq!(next_step(&record), NextStepCode::PlaceOut117_118_125);
}

#[test]
fn only_calculus_left_is_already_eligible() {
    let record = StudentAcademicRecord::default()
        .with_completed(id("M 124"), Grade::B)
        .with_completed(id("M 125"), Grade::B)
        .with_completed(id("M 126"), Grade::B)
        .with_major(major("HORT-HOSZ-BS"));
    let advice = advisor().recommend(&record).unwrap();
    assert_eq!(advice.recommendation.missing, vec![id("M 155")]);
    assert_eq!(advice.recommendation.code, NextStepCode::AlreadyEligible);
}

#[test]
fn calculus_grade_threshold_sends_student_back_to_placement() {
    let record = StudentAcademicRecord::default()
        .with_completed(id("M 124"), Grade::C)
        .with_completed(id("M 125"), Grade::C)
        .with_completed(id("M 126"), Grade::C)
        .with_major(major("CBEG-BS"));
    let advice = advisor().recommend(&record).unwrap();
    assert!(!advice.eligibility.is_eligible(&id("M 160")));
    assert_eq!(advice.recommendation.code, NextStepCode::PlaceOut124_126);
    assert_eq!(advice.recommendation.missing, vec![id("M 124"), id("M 126")]);
}

#[test]
fn only_the_low_grade_is_retaken() {
    let record = StudentAcademicRecord::default()
        .with_completed(id("M 124"), Grade::C)
        .with_completed(id("M 125"), Grade::B)
        .with_completed(id("M 126"), Grade::B)
        .with_major(major("CBEG-BS"));
    let advice = advisor().recommend(&record).unwrap();
    assert_eq!(advice.recommendation.code, NextStepCode::PlaceOut124);
    assert_eq!(advice.recommendation.missing, vec![id("M 124")]);

    let record = StudentAcademicRecord::default()
        .with_completed(id("M 124"), Grade::B)
        .with_completed(id("M 125"), Grade::B)
        .with_completed(id("M 126"), Grade::C)
        .with_major(major("CPSC-BS"));
    assert_eq!(next_step(&record), NextStepCode::PlaceOut126);
}

#[test]
fn calculus_grades_at_threshold_are_eligible() {
    let record = StudentAcademicRecord::default()
        .with_completed(id("M 124"), Grade::B)
        .with_completed(id("M 125"), Grade::B)
        .with_completed(id("M 126"), Grade::B)
        .with_major(major("CBEG-BS"));
    let advice = advisor().recommend(&record).unwrap();
    assert!(advice.eligibility.is_eligible(&id("M 160")));
    assert_eq!(advice.recommendation.code, NextStepCode::AlreadyEligible);
}

#[test]
fn low_grade_sets_are_reachable() {
    let advisor = advisor();
    let sets = reachable_missing_sets(
        advisor.catalog(),
        advisor.gates(),
        &[RequirementTarget::Course(id("M 160"))],
    )
    .unwrap();
    let gates = advisor.gates();
    assert!(sets.contains(&gates.set_of(&[id("M 124"), id("M 126")])));
    assert!(sets.contains(&gates.set_of(&[id("M 124")])));
    assert!(sets.contains(&gates.set_of(&[id("M 126")])));
    for set in &sets {
        assert!(advisor.table().lookup(*set).is_some(), "{set}");
    }
}

#[test]
fn majors_are_combined() {
    let record = StudentAcademicRecord::default()
        .with_transfer("MTH 111", ClearanceKind::CreditEarned)
        .with_major(major("ANTH-BA"))
        .with_major(major("AGBU-BS"));
    let advice = advisor().recommend(&record).unwrap();
    assert_eq!(advice.recommendation.code, NextStepCode::PlaceOut124);
    assert_eq!(advice.recommendation.requirements.len(), 5);
}

#[test]
fn horizon_limits_requirements() {
    let record = StudentAcademicRecord::default().with_major(major("ECON-BA"));
    assert_eq!(next_step(&record), NextStepCode::PlaceInto118);

    let first = Advisor::new(Policy::builtin().unwrap(), EngineConfig::first_semester()).unwrap();
    let advice = first.recommend(&record).unwrap();
    assert_eq!(advice.recommendation.code, NextStepCode::NotNeeded);
    assert!(advice.recommendation.requirements.is_empty());
}

#[test]
fn unknown_major_is_an_error() {
    let record = StudentAcademicRecord::default().with_major(major("NOPE-BS"));
    let err = advisor().recommend(&record).unwrap_err();
    assert!(matches!(err, EngineError::UnknownMajor { .. }));
}

#[test]
fn readiness_alone_is_unsupported() {
    let policy = policy_requiring_m120();
    let gates = GateIndex::new(&policy.catalog).unwrap();
    let table = DecisionTable::builtin(&gates).unwrap();
    let resolver = RecommendationResolver::new(
        &policy.catalog,
        &policy.registry,
        &gates,
        &table,
        EngineConfig::default(),
    );
    let record = StudentAcademicRecord::default().with_major(major("ALGB-BS"));
    let eligibility = mathplan_engine::EligibilityEvaluator::new(&policy.catalog, EngineConfig::default())
        .evaluate(&record)
        .unwrap();
    let err = resolver.resolve(&record, &eligibility).unwrap_err();
    match err {
        EngineError::UnsupportedEligibilityCombination { missing } => {
            assert_eq!(missing, vec![id("M 002")]);
        }
        other => panic!("unexpected error {other}"),
    }
}

#[test]
fn incomplete_table_fails_at_load() {
    let err = Advisor::new(policy_requiring_m120(), EngineConfig::default()).unwrap_err();
    assert!(matches!(err, EngineError::IncompleteDecisionTable { .. }));

    let gates = GateIndex::new(&Policy::builtin().unwrap().catalog).unwrap();
    let empty = DecisionTable::new();
    let err = Advisor::with_table(Policy::builtin().unwrap(), EngineConfig::default(), empty)
        .unwrap_err();
    assert!(matches!(err, EngineError::IncompleteDecisionTable { .. }));
    assert_eq!(gates.len(), 7);
}

#[test]
fn decision_table_rows() {
    let advisor = advisor();
    let gates = advisor.gates();
    let rows = advisor
        .table()
        .iter()
        .map(|(set, code)| {
            let courses = gates
                .courses_in(set)
                .iter()
                .map(CourseId::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            format!("[{courses}] -> {code}")
        })
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(rows);
}

#[test]
fn place_out_rows_match_their_targets() {
    let advisor = advisor();
    for (set, code) in advisor.table().iter() {
        if code.category() != AdvisoryCategory::StudyAndPlace || set.contains(0) {
            continue;
        }
        let courses = advisor.gates().courses_in(set);
        let names: Vec<&str> = courses.iter().map(CourseId::as_str).collect();
        if names.contains(&"M 155") {
            continue;
        }
        assert_eq!(names, code.target_courses(), "{code}");
    }
}
