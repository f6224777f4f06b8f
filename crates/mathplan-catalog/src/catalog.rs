#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};

use mathplan_model::{
    Course, CourseGroup, CourseId, PrerequisiteGroup, RequirementTarget, TransferCredit,
};

use crate::equivalency::{
    EquivalencyMatch, EquivalencyTable, course_id_candidates, has_generic_marker,
};
use crate::error::{CatalogError, Result};

/// Static course rules: prerequisites, groups, and external equivalencies.
///
/// Courses keep the order they were declared in; gate bit positions and
/// table output follow that order.
#[derive(Debug, Clone)]
pub struct CourseCatalog {
    courses: Vec<Course>,
    index: BTreeMap<CourseId, usize>,
    groups: BTreeMap<String, CourseGroup>,
    equivalencies: EquivalencyTable,
    generic_marker: Option<String>,
    default_requirement: Option<RequirementTarget>,
}

impl CourseCatalog {
    pub fn new(
        courses: Vec<Course>,
        groups: Vec<CourseGroup>,
        equivalencies: EquivalencyTable,
        generic_marker: Option<String>,
        default_requirement: Option<String>,
    ) -> Result<Self> {
        let mut index = BTreeMap::new();
        for (pos, course) in courses.iter().enumerate() {
            if index.insert(course.id.clone(), pos).is_some() {
                return Err(CatalogError::Duplicate {
                    kind: "course",
                    key: course.id.to_string(),
                });
            }
        }

        let mut by_name = BTreeMap::new();
        for mut group in groups {
            group.name = group_key(&group.name);
            if by_name.contains_key(&group.name) {
                return Err(CatalogError::Duplicate {
                    kind: "course group",
                    key: group.name,
                });
            }
            by_name.insert(group.name.clone(), group);
        }

        let mut catalog = Self {
            courses,
            index,
            groups: by_name,
            equivalencies,
            generic_marker: generic_marker.filter(|marker| !marker.trim().is_empty()),
            default_requirement: None,
        };
        catalog.default_requirement = default_requirement
            .map(|name| catalog.resolve_target(&name, "default requirement"))
            .transpose()?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn get(&self, id: &CourseId) -> Option<&Course> {
        self.index.get(id).map(|&pos| &self.courses[pos])
    }

    /// Like [`get`](Self::get), but a missing course is an error.
    pub fn course(&self, id: &CourseId) -> Result<&Course> {
        self.get(id)
            .ok_or_else(|| CatalogError::missing(id, "catalog lookup"))
    }

    pub fn contains(&self, id: &CourseId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    /// Position of a course in declaration order.
    pub fn position(&self, id: &CourseId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn prerequisites_of(&self, id: &CourseId) -> Result<&[PrerequisiteGroup]> {
        Ok(&self.course(id)?.prerequisites)
    }

    pub fn is_aucc(&self, id: &CourseId) -> bool {
        self.get(id).is_some_and(|course| course.aucc)
    }

    pub fn aucc_courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter().filter(|course| course.aucc)
    }

    /// Placement-gateable courses in declaration order.
    pub fn gates(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter().filter(|course| course.gate)
    }

    /// First alternative of each prerequisite group of `id`.
    pub fn canonical_parents(&self, id: &CourseId) -> Result<Vec<&CourseId>> {
        Ok(self.course(id)?.canonical_parents().collect())
    }

    pub fn group(&self, name: &str) -> Option<&CourseGroup> {
        self.groups.get(&group_key(name))
    }

    pub fn groups(&self) -> impl Iterator<Item = &CourseGroup> {
        self.groups.values()
    }

    pub fn equivalencies(&self) -> &EquivalencyTable {
        &self.equivalencies
    }

    pub fn generic_marker(&self) -> Option<&str> {
        self.generic_marker.as_deref()
    }

    /// Requirement used when a student has selected no major.
    pub fn default_requirement(&self) -> Option<&RequirementTarget> {
        self.default_requirement.as_ref()
    }

    /// Resolves an external code through the equivalency table, the generic
    /// marker rule, and finally the catalog's own course ids.
    pub fn equivalent_local_courses(&self, code: &str) -> EquivalencyMatch {
        if let Some(entry) = self.equivalencies.get(code) {
            return EquivalencyMatch::Table {
                courses: entry.courses.clone(),
                kind: entry.kind,
            };
        }
        if let Some(marker) = &self.generic_marker
            && has_generic_marker(code, marker)
        {
            return EquivalencyMatch::GenericCore {
                courses: self.aucc_courses().map(|course| course.id.clone()).collect(),
            };
        }
        course_id_candidates(code)
            .into_iter()
            .filter_map(|candidate| CourseId::new(candidate).ok())
            .find(|id| self.contains(id))
            .map_or(EquivalencyMatch::Unrecognized, EquivalencyMatch::Course)
    }

    /// [`equivalent_local_courses`](Self::equivalent_local_courses) for a
    /// transfer record, falling back to the course the registrar mapped it to.
    pub fn resolve_transfer(&self, transfer: &TransferCredit) -> EquivalencyMatch {
        let found = self.equivalent_local_courses(&transfer.code);
        if found.is_recognized() {
            return found;
        }
        match &transfer.course {
            Some(course) if self.contains(course) => EquivalencyMatch::Course(course.clone()),
            _ => EquivalencyMatch::Unrecognized,
        }
    }

    /// Treats `name` as a group when one is defined, otherwise as a course id
    /// that must exist in the catalog.
    pub fn resolve_target(&self, name: &str, context: &str) -> Result<RequirementTarget> {
        if let Some(group) = self.group(name) {
            return Ok(RequirementTarget::Group(group.name.clone()));
        }
        let id = CourseId::new(name)?;
        if !self.contains(&id) {
            return Err(CatalogError::missing(&id, context));
        }
        Ok(RequirementTarget::Course(id))
    }

    /// Courses that satisfy a requirement target.
    pub fn target_options(&self, target: &RequirementTarget) -> Result<Vec<&CourseId>> {
        match target {
            RequirementTarget::Course(id) => Ok(vec![&self.course(id)?.id]),
            RequirementTarget::Group(name) => Ok(self.target_group(name)?.options.iter().collect()),
        }
    }

    /// Course planned toward when a requirement target is unmet.
    pub fn representative(&self, target: &RequirementTarget) -> Result<&CourseId> {
        match target {
            RequirementTarget::Course(id) => Ok(&self.course(id)?.id),
            RequirementTarget::Group(name) => Ok(&self.target_group(name)?.representative),
        }
    }

    fn target_group(&self, name: &str) -> Result<&CourseGroup> {
        self.group(name).ok_or_else(|| CatalogError::UnknownGroup {
            name: name.to_string(),
            context: "requirement".to_string(),
        })
    }

    /// Checks that every referenced course exists and that no prerequisite
    /// chain loops.
    pub fn validate(&self) -> Result<()> {
        for course in &self.courses {
            for referenced in course.referenced() {
                if !self.contains(referenced) {
                    return Err(CatalogError::missing(
                        referenced,
                        format!("course {}", course.id),
                    ));
                }
            }
        }
        for group in self.groups.values() {
            for option in group.options.iter().chain(std::iter::once(&group.representative)) {
                if !self.contains(option) {
                    return Err(CatalogError::missing(option, format!("group {}", group.name)));
                }
            }
        }
        for entry in self.equivalencies.iter() {
            for course in &entry.courses {
                if !self.contains(course) {
                    return Err(CatalogError::missing(
                        course,
                        format!("equivalency {}", entry.code),
                    ));
                }
            }
        }
        self.check_acyclic()
    }

    fn check_acyclic(&self) -> Result<()> {
        let mut done = BTreeSet::new();
        for course in &self.courses {
            let mut trail = Vec::new();
            self.visit(&course.id, &mut trail, &mut done)?;
        }
        Ok(())
    }

    fn visit<'a>(
        &'a self,
        id: &'a CourseId,
        trail: &mut Vec<&'a CourseId>,
        done: &mut BTreeSet<&'a CourseId>,
    ) -> Result<()> {
        if done.contains(id) {
            return Ok(());
        }
        if trail.contains(&id) {
            return Err(CatalogError::PrerequisiteCycle { course: id.clone() });
        }
        trail.push(id);
        let course = self.course(id)?;
        for parent in course.prerequisites.iter().flat_map(PrerequisiteGroup::courses) {
            self.visit(parent, trail, done)?;
        }
        trail.pop();
        done.insert(id);
        Ok(())
    }
}

fn group_key(name: &str) -> String {
    name.trim().to_uppercase()
}
