use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span};

use mathplan_catalog::Policy;
use mathplan_catalog::paths::{POLICY_ENV_VAR, policy_root};
use mathplan_engine::{Advice, Advisor, EngineConfig, RequirementHorizon, SelfAssessmentTree};
use mathplan_model::{Grade, StudentAcademicRecord};

use crate::cli::{AssessArgs, EvaluateArgs};
use crate::summary::{check_lines, majors_table, paths_table, print_advice, step_lines};

/// Counts reported by `mathplan check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyCheck {
    pub origin: String,
    pub courses: usize,
    pub gates: usize,
    pub equivalencies: usize,
    pub majors: usize,
    pub selectable: usize,
    pub table_rows: usize,
    pub tree_nodes: usize,
    pub tree_paths: usize,
}

/// Loads policy from `policy_dir`, then `MATHPLAN_POLICY_DIR`, falling back to
/// the compiled-in policy.
pub fn load_policy(policy_dir: Option<&Path>) -> Result<Policy> {
    if let Some(dir) = policy_dir {
        return Policy::load(dir)
            .with_context(|| format!("load policy from {}", dir.display()));
    }
    if env::var_os(POLICY_ENV_VAR).is_some() {
        let root = policy_root();
        return Policy::load_default()
            .with_context(|| format!("load policy from {}", root.display()));
    }
    Policy::builtin().context("load builtin policy")
}

pub fn build_advisor(policy_dir: Option<&Path>, config: EngineConfig) -> Result<Advisor> {
    let policy = load_policy(policy_dir)?;
    Advisor::new(policy, config).context("validate policy")
}

pub fn read_record(path: &Path) -> Result<StudentAcademicRecord> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse record {}", path.display()))
}

pub fn engine_config(args: &EvaluateArgs) -> Result<EngineConfig> {
    let mut config = EngineConfig::default();
    if args.first_semester {
        config = config.with_horizon(RequirementHorizon::FirstSemester);
    }
    if let Some(grade) = &args.passing_grade {
        let grade: Grade = grade
            .parse()
            .with_context(|| format!("invalid --passing-grade {grade}"))?;
        config = config.with_passing_grade(grade);
    }
    Ok(config)
}

/// Evaluates the record at `args.record` and recommends a next step.
pub fn evaluate(args: &EvaluateArgs, policy_dir: Option<&Path>) -> Result<(Advisor, Advice)> {
    let span = info_span!("evaluate", record = %args.record.display());
    let _guard = span.enter();
    let advisor = build_advisor(policy_dir, engine_config(args)?)?;
    let record = read_record(&args.record)?;
    debug!(
        completed = record.completed.len(),
        transfers = record.transfers.len(),
        placements = record.placements.len(),
        majors = record.majors().len(),
        "record loaded"
    );
    let advice = advisor.recommend(&record).context("recommend next step")?;
    info!(code = %advice.recommendation.code, "recommendation resolved");
    Ok((advisor, advice))
}

pub fn run_evaluate(args: &EvaluateArgs, policy_dir: Option<&Path>) -> Result<()> {
    let (advisor, advice) = evaluate(args, policy_dir)?;
    if args.json {
        let json = serde_json::to_string_pretty(&advice).context("serialize advice")?;
        println!("{json}");
    } else {
        print_advice(advisor.catalog(), &advice);
    }
    Ok(())
}

pub fn run_assess(args: &AssessArgs) -> Result<()> {
    for line in assess(&args.path)? {
        println!("{line}");
    }
    Ok(())
}

pub fn assess(path: &str) -> Result<Vec<String>> {
    let tree = SelfAssessmentTree::builtin().context("load questionnaire")?;
    let step = tree
        .walk(path)
        .with_context(|| format!("answers {path:?}"))?;
    Ok(step_lines(&step))
}

pub fn run_majors(policy_dir: Option<&Path>) -> Result<()> {
    let policy = load_policy(policy_dir)?;
    println!("{}", majors_table(&policy.registry));
    Ok(())
}

pub fn run_paths() -> Result<()> {
    let tree = SelfAssessmentTree::builtin().context("load questionnaire")?;
    println!("{}", paths_table(&tree));
    Ok(())
}

pub fn check(policy_dir: Option<&Path>) -> Result<PolicyCheck> {
    let advisor = build_advisor(policy_dir, EngineConfig::default())?;
    let origin = match policy_dir {
        Some(dir) => dir.display().to_string(),
        None if env::var_os(POLICY_ENV_VAR).is_some() => policy_root().display().to_string(),
        None => "builtin".to_string(),
    };
    Ok(PolicyCheck {
        origin,
        courses: advisor.catalog().len(),
        gates: advisor.gates().len(),
        equivalencies: advisor.catalog().equivalencies().len(),
        majors: advisor.registry().len(),
        selectable: advisor.registry().selectable().count(),
        table_rows: advisor.table().len(),
        tree_nodes: advisor.tree().len(),
        tree_paths: advisor.tree().paths().len(),
    })
}

pub fn run_check(policy_dir: Option<&Path>) -> Result<()> {
    for line in check_lines(&check(policy_dir)?) {
        println!("{line}");
    }
    Ok(())
}
