#![deny(unsafe_code)]

use mathplan_catalog::{CourseCatalog, MajorRequirementRegistry};
use mathplan_model::{
    AdvisoryCategory, CourseId, Major, MajorCode, NextStepCode, RequirementTarget,
    StudentAcademicRecord,
};
use serde::Serialize;

use crate::config::EngineConfig;
use crate::eligibility::{Clearances, EligibilityResult};
use crate::error::{EngineError, Result};
use crate::gates::{GateIndex, GateSet};
use crate::recommend::table::DecisionTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub code: NextStepCode,
    pub category: AdvisoryCategory,
    /// Requirement targets the recommendation was computed against.
    pub requirements: Vec<RequirementTarget>,
    /// Unmet placement gates, in catalog order.
    pub missing: Vec<CourseId>,
    /// Credit hours earned toward each group requirement that counts hours.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub credits: Vec<GroupCredits>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCredits {
    pub group: String,
    pub completed: u8,
    pub required: u8,
}

impl GroupCredits {
    pub fn is_satisfied(&self) -> bool {
        self.completed >= self.required
    }
}

/// Turns an eligibility result into a single next step.
#[derive(Debug, Clone)]
pub struct RecommendationResolver<'a> {
    catalog: &'a CourseCatalog,
    registry: &'a MajorRequirementRegistry,
    gates: &'a GateIndex,
    table: &'a DecisionTable,
    config: EngineConfig,
}

impl<'a> RecommendationResolver<'a> {
    pub fn new(
        catalog: &'a CourseCatalog,
        registry: &'a MajorRequirementRegistry,
        gates: &'a GateIndex,
        table: &'a DecisionTable,
        config: EngineConfig,
    ) -> Self {
        Self {
            catalog,
            registry,
            gates,
            table,
            config,
        }
    }

    /// Union of the requirements of the student's majors, or the catalog
    /// default when no major is selected.
    pub fn requirements(&self, record: &StudentAcademicRecord) -> Result<Vec<RequirementTarget>> {
        let majors = record.majors();
        if majors.is_empty() {
            return Ok(self.catalog.default_requirement().cloned().into_iter().collect());
        }
        let mut out = Vec::new();
        for code in majors {
            let major = self.lookup_major(code)?;
            for target in major_targets(major, &self.config) {
                if !out.contains(&target) {
                    out.push(target);
                }
            }
        }
        Ok(out)
    }

    fn lookup_major(&self, code: &MajorCode) -> Result<&'a Major> {
        self.registry
            .get(code)
            .ok_or_else(|| EngineError::UnknownMajor { code: code.clone() })
    }

    pub fn resolve(
        &self,
        record: &StudentAcademicRecord,
        eligibility: &EligibilityResult,
    ) -> Result<Recommendation> {
        let requirements = self.requirements(record)?;
        let credits = self.group_credits(&requirements, eligibility);

        if self.all_credited(&requirements, eligibility)? {
            tracing::debug!(count = requirements.len(), "requirements already met by credit");
            return Ok(Recommendation {
                code: NextStepCode::NotNeeded,
                category: NextStepCode::NotNeeded.category(),
                requirements,
                missing: Vec::new(),
                credits,
            });
        }

        let walked = missing_courses(self.catalog, &requirements, eligibility)?;
        let missing = self.gates.set_of(&walked);
        let code = self.lookup(missing)?;
        tracing::debug!(missing = %missing, code = %code, "resolved next step");
        Ok(Recommendation {
            code,
            category: code.category(),
            requirements,
            missing: self.gates.courses_in(missing),
            credits,
        })
    }

    /// Sums the credit hours of credited options for every group requirement
    /// that carries a credit count.
    pub fn group_credits(
        &self,
        requirements: &[RequirementTarget],
        eligibility: &EligibilityResult,
    ) -> Vec<GroupCredits> {
        requirements
            .iter()
            .filter_map(|target| match target {
                RequirementTarget::Group(name) => self.catalog.group(name),
                RequirementTarget::Course(_) => None,
            })
            .filter_map(|group| {
                let required = group.credits?;
                let completed = group
                    .options
                    .iter()
                    .filter(|course| eligibility.has_credit(course))
                    .filter_map(|course| self.catalog.get(course))
                    .fold(0u8, |sum, course| sum.saturating_add(course.credits));
                Some(GroupCredits {
                    group: group.name.clone(),
                    completed,
                    required,
                })
            })
            .collect()
    }

    pub fn lookup(&self, missing: GateSet) -> Result<NextStepCode> {
        self.table
            .lookup(missing)
            .ok_or_else(|| EngineError::UnsupportedEligibilityCombination {
                missing: self.gates.courses_in(missing),
            })
    }

    fn all_credited(
        &self,
        requirements: &[RequirementTarget],
        eligibility: &EligibilityResult,
    ) -> Result<bool> {
        for target in requirements {
            let options = self.catalog.target_options(target)?;
            if !options.iter().any(|course| eligibility.has_credit(course)) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Requirement targets of one major within the configured horizon.
pub(crate) fn major_targets(major: &Major, config: &EngineConfig) -> Vec<RequirementTarget> {
    let mut out: Vec<RequirementTarget> = Vec::new();
    for requirement in major.requirements_through(config.horizon.last_semester()) {
        if !out.contains(&requirement.target) {
            out.push(requirement.target.clone());
        }
    }
    out
}

/// Courses that still have to be cleared on the way to the unmet
/// requirements, following the canonical prerequisite of each unsatisfied
/// group. A group requirement is planned through its representative. A
/// canonical course cleared below its required grade is listed as well.
pub fn missing_courses<C: Clearances>(
    catalog: &CourseCatalog,
    requirements: &[RequirementTarget],
    clearances: &C,
) -> Result<Vec<CourseId>> {
    let mut visited = Vec::new();
    for target in requirements {
        let met = catalog
            .target_options(target)?
            .into_iter()
            .any(|course| clearances.is_cleared(course));
        if !met {
            walk(catalog, catalog.representative(target)?, clearances, &mut visited)?;
        }
    }
    Ok(visited)
}

fn walk<C: Clearances>(
    catalog: &CourseCatalog,
    course: &CourseId,
    clearances: &C,
    visited: &mut Vec<CourseId>,
) -> Result<()> {
    if clearances.is_cleared(course) || visited.contains(course) {
        return Ok(());
    }
    visited.push(course.clone());
    for group in catalog.prerequisites_of(course)? {
        if clearances.group_satisfied(group) {
            continue;
        }
        let Some(canonical) = group.canonical() else {
            continue;
        };
        if clearances.is_cleared(&canonical.course) {
            // Cleared, but below the required grade.
            if !visited.contains(&canonical.course) {
                visited.push(canonical.course.clone());
            }
        } else {
            walk(catalog, &canonical.course, clearances, visited)?;
        }
    }
    Ok(())
}
