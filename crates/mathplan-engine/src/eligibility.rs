//! Per-course standing computed from a student record.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use mathplan_catalog::{CatalogError, CourseCatalog, EquivalencyMatch};
use mathplan_model::{
    ClearanceKind, ClearanceSource, CourseId, Grade, Prerequisite, PrerequisiteGroup, Standing,
    StudentAcademicRecord,
};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::Result;

/// Read access to which courses a student has cleared.
pub trait Clearances {
    fn is_cleared(&self, course: &CourseId) -> bool;

    /// True when the prerequisite is cleared at its required grade.
    fn meets(&self, prerequisite: &Prerequisite) -> bool;

    fn group_satisfied(&self, group: &PrerequisiteGroup) -> bool {
        group.any_of.iter().any(|alt| self.meets(alt))
    }
}

/// Plain cleared set with no grade information; thresholds count as met.
impl Clearances for BTreeSet<CourseId> {
    fn is_cleared(&self, course: &CourseId) -> bool {
        self.contains(course)
    }

    fn meets(&self, prerequisite: &Prerequisite) -> bool {
        self.contains(&prerequisite.course)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseStatus {
    pub standing: Standing,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<ClearanceSource>,
    /// Best grade on any completion attempt, passing or not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_grade: Option<Grade>,
}

impl CourseStatus {
    fn new() -> Self {
        Self {
            standing: Standing::Ineligible,
            sources: Vec::new(),
            best_grade: None,
        }
    }

    fn add_source(&mut self, source: ClearanceSource) {
        if !self.sources.contains(&source) {
            self.sources.push(source);
        }
    }

    /// Raises the standing; returns true if it went up.
    fn raise(&mut self, standing: Standing) -> bool {
        if standing > self.standing {
            self.standing = standing;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    courses: BTreeMap<CourseId, CourseStatus>,
    /// Transfer codes that matched nothing in the catalog.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    ignored_transfers: Vec<String>,
}

impl EligibilityResult {
    pub fn status(&self, course: &CourseId) -> Option<&CourseStatus> {
        self.courses.get(course)
    }

    /// Standing of `course`; courses outside the catalog are ineligible.
    pub fn standing(&self, course: &CourseId) -> Standing {
        self.status(course)
            .map_or(Standing::Ineligible, |status| status.standing)
    }

    pub fn is_cleared(&self, course: &CourseId) -> bool {
        self.standing(course).is_cleared()
    }

    pub fn is_eligible(&self, course: &CourseId) -> bool {
        self.standing(course).is_eligible()
    }

    pub fn has_credit(&self, course: &CourseId) -> bool {
        self.standing(course).has_credit()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CourseId, &CourseStatus)> {
        self.courses.iter()
    }

    pub fn cleared(&self) -> impl Iterator<Item = &CourseId> {
        self.with_standing(Standing::Cleared)
    }

    pub fn eligible(&self) -> impl Iterator<Item = &CourseId> {
        self.with_standing(Standing::Eligible)
    }

    pub fn credited(&self) -> impl Iterator<Item = &CourseId> {
        self.with_standing(Standing::CreditEarned)
    }

    fn with_standing(&self, floor: Standing) -> impl Iterator<Item = &CourseId> {
        self.courses
            .iter()
            .filter(move |(_, status)| status.standing >= floor)
            .map(|(id, _)| id)
    }

    pub fn ignored_transfers(&self) -> &[String] {
        &self.ignored_transfers
    }
}

impl Clearances for EligibilityResult {
    fn is_cleared(&self, course: &CourseId) -> bool {
        EligibilityResult::is_cleared(self, course)
    }

    fn meets(&self, prerequisite: &Prerequisite) -> bool {
        let Some(status) = self.status(&prerequisite.course) else {
            return false;
        };
        if !status.standing.is_cleared() {
            return false;
        }
        match prerequisite.min_grade {
            None => true,
            Some(minimum) => {
                status.sources.iter().any(ClearanceSource::bypasses_grade)
                    || status.best_grade.is_some_and(|grade| grade.meets(minimum))
            }
        }
    }
}

/// Classifies a record against the catalog in a single pass.
#[derive(Debug, Clone)]
pub struct EligibilityEvaluator<'a> {
    catalog: &'a CourseCatalog,
    config: EngineConfig,
}

impl<'a> EligibilityEvaluator<'a> {
    pub fn new(catalog: &'a CourseCatalog, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluate(&self, record: &StudentAcademicRecord) -> Result<EligibilityResult> {
        let mut courses: BTreeMap<CourseId, CourseStatus> = self
            .catalog
            .iter()
            .map(|course| (course.id.clone(), CourseStatus::new()))
            .collect();
        let mut ignored_transfers = Vec::new();

        for completed in &record.completed {
            let status = courses
                .get_mut(&completed.course)
                .ok_or_else(|| missing(&completed.course, "completed course"))?;
            status.best_grade = Some(match status.best_grade {
                Some(best) => best.better(completed.grade),
                None => completed.grade,
            });
            if completed.grade.meets(self.config.passing_grade) {
                status.raise(Standing::CreditEarned);
                status.add_source(ClearanceSource::Completed {
                    grade: completed.grade,
                });
            } else {
                tracing::debug!(
                    course = %completed.course,
                    grade = %completed.grade,
                    passing = %self.config.passing_grade,
                    "grade below passing, course not cleared"
                );
            }
        }

        for transfer in &record.transfers {
            let found = self.catalog.resolve_transfer(transfer);
            let (standing, source) = match &found {
                EquivalencyMatch::Table { kind, .. } => (
                    kind.unwrap_or(transfer.kind).standing(),
                    ClearanceSource::Transfer {
                        code: transfer.code.clone(),
                    },
                ),
                EquivalencyMatch::GenericCore { .. } => (
                    ClearanceKind::CreditEarned.standing(),
                    ClearanceSource::GenericCore {
                        code: transfer.code.clone(),
                    },
                ),
                EquivalencyMatch::Course(_) => (
                    transfer.kind.standing(),
                    ClearanceSource::Transfer {
                        code: transfer.code.clone(),
                    },
                ),
                EquivalencyMatch::Unrecognized => {
                    tracing::warn!(code = %transfer.code, "unrecognized transfer code ignored");
                    ignored_transfers.push(transfer.code.clone());
                    continue;
                }
            };
            for course in found.courses() {
                let status = courses
                    .get_mut(course)
                    .ok_or_else(|| missing(course, "transfer equivalency"))?;
                status.raise(standing);
                status.add_source(source.clone());
            }
        }

        for placement in &record.placements {
            let status = courses
                .get_mut(&placement.course)
                .ok_or_else(|| missing(&placement.course, "placement result"))?;
            status.raise(placement.kind.standing());
            status.add_source(ClearanceSource::Placement);
        }

        self.propagate(&mut courses)?;
        self.mark_eligible(&mut courses);

        tracing::debug!(
            cleared = courses.values().filter(|s| s.standing.is_cleared()).count(),
            ignored = ignored_transfers.len(),
            "evaluated student record"
        );

        Ok(EligibilityResult {
            courses,
            ignored_transfers,
        })
    }

    /// Spreads clearance to covered courses (same standing) and to canonical
    /// prerequisites (cleared, never credit) until nothing changes.
    fn propagate(&self, courses: &mut BTreeMap<CourseId, CourseStatus>) -> Result<()> {
        let mut queue: VecDeque<CourseId> = courses
            .iter()
            .filter(|(_, status)| status.standing.is_cleared())
            .map(|(id, _)| id.clone())
            .collect();

        while let Some(id) = queue.pop_front() {
            let course = self.catalog.course(&id)?;
            let standing = courses
                .get(&id)
                .map_or(Standing::Ineligible, |status| status.standing);

            let covered = course.covers.iter().map(|target| {
                (
                    target,
                    standing,
                    ClearanceSource::Aggregate { via: id.clone() },
                )
            });
            let implied = course.canonical_parents().map(|parent| {
                (
                    parent,
                    Standing::Cleared,
                    ClearanceSource::Implied { via: id.clone() },
                )
            });

            for (target, level, source) in covered.chain(implied) {
                let status = courses
                    .get_mut(target)
                    .ok_or_else(|| missing(target, format!("course {id}")))?;
                status.add_source(source);
                if status.raise(level) {
                    queue.push_back(target.clone());
                }
            }
        }
        Ok(())
    }

    fn mark_eligible(&self, courses: &mut BTreeMap<CourseId, CourseStatus>) {
        let snapshot = EligibilityResult {
            courses: courses.clone(),
            ignored_transfers: Vec::new(),
        };
        for course in self.catalog.iter() {
            let ready = course
                .prerequisites
                .iter()
                .all(|group| snapshot.group_satisfied(group));
            if ready && let Some(status) = courses.get_mut(&course.id) {
                status.raise(Standing::Eligible);
            }
        }
    }
}

fn missing(course: &CourseId, context: impl Into<String>) -> CatalogError {
    CatalogError::MissingCatalogEntry {
        course: course.clone(),
        context: context.into(),
    }
}
