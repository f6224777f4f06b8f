//! Load-time totality check of the decision table.
//!
//! For a requirement list, every cleared state a student can reach is
//! enumerated: each subset of the courses involved is cleared directly and
//! closed under coverage and canonical prerequisites. Each cleared course that
//! carries a grade threshold somewhere is also tried as cleared below it.
//! Group requirements can also be met through an unrelated option, so each
//! one is tried both ways.

use std::collections::BTreeSet;

use mathplan_catalog::{CourseCatalog, MajorRequirementRegistry};
use mathplan_model::{CourseId, Prerequisite, RequirementTarget};

use crate::config::EngineConfig;
use crate::eligibility::Clearances;
use crate::error::{EngineError, Result};
use crate::gates::{GateIndex, GateSet};
use crate::recommend::resolver::{major_targets, missing_courses};
use crate::recommend::table::DecisionTable;

/// Upper bound on enumerated courses plus group flags per requirement list.
const MAX_ENUMERATED: usize = 24;

/// Checks that every missing set reachable from a single registered major,
/// or from the default requirement, has a row in `table`.
pub fn validate_table(
    table: &DecisionTable,
    gates: &GateIndex,
    catalog: &CourseCatalog,
    registry: &MajorRequirementRegistry,
    config: &EngineConfig,
) -> Result<()> {
    let mut checked: Vec<Vec<RequirementTarget>> = Vec::new();
    let defaults: Vec<RequirementTarget> = catalog.default_requirement().cloned().into_iter().collect();
    let lists = std::iter::once(("default requirement".to_string(), defaults)).chain(
        registry
            .iter()
            .map(|major| (format!("major {}", major.code), major_targets(major, config))),
    );

    for (context, requirements) in lists {
        if checked.contains(&requirements) {
            continue;
        }
        for missing in reachable_missing_sets(catalog, gates, &requirements)? {
            if table.lookup(missing).is_none() {
                return Err(EngineError::IncompleteDecisionTable {
                    context,
                    missing: gates.courses_in(missing),
                });
            }
        }
        checked.push(requirements);
    }
    tracing::debug!(rows = table.len(), lists = checked.len(), "decision table covers all majors");
    Ok(())
}

/// Every gate set the resolver can produce for `requirements`.
pub fn reachable_missing_sets(
    catalog: &CourseCatalog,
    gates: &GateIndex,
    requirements: &[RequirementTarget],
) -> Result<BTreeSet<GateSet>> {
    let universe = involved_courses(catalog, requirements)?;
    let graded = graded_courses(catalog, &universe)?;
    if universe.len() + graded.len() + requirements.len() > MAX_ENUMERATED {
        return Err(EngineError::RequirementsTooBroad {
            courses: universe.len() + graded.len(),
            max: MAX_ENUMERATED,
        });
    }
    let groups: Vec<usize> = requirements
        .iter()
        .enumerate()
        .filter(|(_, target)| matches!(target, RequirementTarget::Group(_)))
        .map(|(pos, _)| pos)
        .collect();

    let mut out = BTreeSet::new();
    for mask in 0u64..(1u64 << universe.len()) {
        let direct = universe
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, id)| (*id).clone());
        let cleared = close(catalog, direct)?;
        let candidates: Vec<&CourseId> = graded
            .iter()
            .copied()
            .filter(|id| cleared.contains(*id))
            .collect();
        for low in 0u64..(1u64 << candidates.len()) {
            let state = ReachableState {
                cleared: &cleared,
                below_threshold: candidates
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| low & (1 << bit) != 0)
                    .map(|(_, id)| (*id).clone())
                    .collect(),
            };
            for flags in 0u64..(1u64 << groups.len()) {
                let open: Vec<RequirementTarget> = requirements
                    .iter()
                    .enumerate()
                    .filter(|(pos, _)| {
                        groups
                            .iter()
                            .position(|group| group == pos)
                            .is_none_or(|bit| flags & (1 << bit) == 0)
                    })
                    .map(|(_, target)| target.clone())
                    .collect();
                let walked = missing_courses(catalog, &open, &state)?;
                out.insert(gates.set_of(&walked));
            }
        }
    }
    Ok(out)
}

/// Cleared set in which some courses were completed below every grade
/// threshold placed on them.
struct ReachableState<'s> {
    cleared: &'s BTreeSet<CourseId>,
    below_threshold: BTreeSet<CourseId>,
}

impl Clearances for ReachableState<'_> {
    fn is_cleared(&self, course: &CourseId) -> bool {
        self.cleared.contains(course)
    }

    fn meets(&self, prerequisite: &Prerequisite) -> bool {
        self.cleared.contains(&prerequisite.course)
            && (prerequisite.min_grade.is_none()
                || !self.below_threshold.contains(&prerequisite.course))
    }
}

/// Courses in `universe` that some prerequisite alternative requires at a
/// minimum grade.
fn graded_courses<'c>(
    catalog: &'c CourseCatalog,
    universe: &[&'c CourseId],
) -> Result<Vec<&'c CourseId>> {
    let mut out: Vec<&CourseId> = Vec::new();
    for id in universe {
        for group in catalog.prerequisites_of(id)? {
            for alternative in &group.any_of {
                if alternative.min_grade.is_some() && !out.contains(&&alternative.course) {
                    out.push(&alternative.course);
                }
            }
        }
    }
    Ok(out)
}

/// Requirement representatives and everything reachable through any
/// prerequisite alternative or coverage.
fn involved_courses<'c>(
    catalog: &'c CourseCatalog,
    requirements: &[RequirementTarget],
) -> Result<Vec<&'c CourseId>> {
    let mut seen: Vec<&CourseId> = Vec::new();
    let mut work: Vec<&CourseId> = requirements
        .iter()
        .map(|target| catalog.representative(target))
        .collect::<std::result::Result<_, _>>()?;
    while let Some(id) = work.pop() {
        if seen.contains(&id) {
            continue;
        }
        let course = catalog.course(id)?;
        seen.push(&course.id);
        work.extend(course.referenced());
    }
    Ok(seen)
}

/// Closes a directly cleared set under coverage and canonical prerequisites.
fn close(
    catalog: &CourseCatalog,
    direct: impl IntoIterator<Item = CourseId>,
) -> Result<BTreeSet<CourseId>> {
    let mut cleared = BTreeSet::new();
    let mut work: Vec<CourseId> = direct.into_iter().collect();
    while let Some(id) = work.pop() {
        if !cleared.insert(id.clone()) {
            continue;
        }
        let course = catalog.course(&id)?;
        work.extend(course.covers.iter().cloned());
        work.extend(course.canonical_parents().cloned());
    }
    Ok(cleared)
}
