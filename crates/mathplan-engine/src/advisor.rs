#![deny(unsafe_code)]

use mathplan_catalog::{CourseCatalog, MajorRequirementRegistry, Policy};
use mathplan_model::StudentAcademicRecord;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::eligibility::{EligibilityEvaluator, EligibilityResult};
use crate::error::Result;
use crate::gates::GateIndex;
use crate::recommend::{DecisionTable, Recommendation, RecommendationResolver, validate_table};
use crate::self_assess::{SelfAssessmentTree, Step};

/// Eligibility and recommendation for one student.
#[derive(Debug, Clone, Serialize)]
pub struct Advice {
    pub eligibility: EligibilityResult,
    pub recommendation: Recommendation,
}

/// Validated policy, decision table and questionnaire, ready to serve
/// requests. Immutable once built.
#[derive(Debug, Clone)]
pub struct Advisor {
    policy: Policy,
    config: EngineConfig,
    gates: GateIndex,
    table: DecisionTable,
    tree: SelfAssessmentTree,
}

impl Advisor {
    pub fn new(policy: Policy, config: EngineConfig) -> Result<Self> {
        let gates = GateIndex::new(&policy.catalog)?;
        let table = DecisionTable::builtin(&gates)?;
        Self::with_table(policy, config, table)
    }

    /// Builtin policy with default settings.
    pub fn builtin() -> Result<Self> {
        Self::new(Policy::builtin()?, EngineConfig::default())
    }

    /// Uses a caller-supplied decision table; it is checked like the builtin one.
    pub fn with_table(policy: Policy, config: EngineConfig, table: DecisionTable) -> Result<Self> {
        let gates = GateIndex::new(&policy.catalog)?;
        validate_table(&table, &gates, &policy.catalog, &policy.registry, &config)?;
        let tree = SelfAssessmentTree::builtin()?;
        tracing::info!(
            gates = gates.len(),
            rows = table.len(),
            questionnaire_nodes = tree.len(),
            "advisor ready"
        );
        Ok(Self {
            policy,
            config,
            gates,
            table,
            tree,
        })
    }

    pub fn catalog(&self) -> &CourseCatalog {
        &self.policy.catalog
    }

    pub fn registry(&self) -> &MajorRequirementRegistry {
        &self.policy.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn gates(&self) -> &GateIndex {
        &self.gates
    }

    pub fn table(&self) -> &DecisionTable {
        &self.table
    }

    pub fn tree(&self) -> &SelfAssessmentTree {
        &self.tree
    }

    pub fn evaluator(&self) -> EligibilityEvaluator<'_> {
        EligibilityEvaluator::new(&self.policy.catalog, self.config.clone())
    }

    pub fn resolver(&self) -> RecommendationResolver<'_> {
        RecommendationResolver::new(
            &self.policy.catalog,
            &self.policy.registry,
            &self.gates,
            &self.table,
            self.config.clone(),
        )
    }

    pub fn evaluate(&self, record: &StudentAcademicRecord) -> Result<EligibilityResult> {
        self.evaluator().evaluate(record)
    }

    pub fn recommend(&self, record: &StudentAcademicRecord) -> Result<Advice> {
        let eligibility = self.evaluate(record)?;
        let recommendation = self.resolver().resolve(record, &eligibility)?;
        Ok(Advice {
            eligibility,
            recommendation,
        })
    }

    /// Position in the questionnaire after the given answers.
    pub fn self_assess(&self, answers: &str) -> Result<Step<'_>> {
        self.tree.walk(answers)
    }
}
