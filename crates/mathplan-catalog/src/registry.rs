#![deny(unsafe_code)]

use std::collections::BTreeMap;

use mathplan_model::{CourseGroup, CourseId, Major, MajorCode, Requirement, RequirementTarget};

use crate::catalog::CourseCatalog;
use crate::error::{CatalogError, Result};

/// Majors and the courses each one requires.
#[derive(Debug, Clone)]
pub struct MajorRequirementRegistry {
    majors: Vec<Major>,
    index: BTreeMap<MajorCode, usize>,
    by_question: BTreeMap<u32, usize>,
    /// Groups referenced by any requirement, copied from the catalog so
    /// reverse lookups can see group membership.
    groups: BTreeMap<String, CourseGroup>,
}

impl MajorRequirementRegistry {
    /// Builds the registry, checking every requirement against `catalog`.
    pub fn new(majors: Vec<Major>, catalog: &CourseCatalog) -> Result<Self> {
        let mut index = BTreeMap::new();
        let mut by_question = BTreeMap::new();
        let mut groups = BTreeMap::new();

        for (pos, major) in majors.iter().enumerate() {
            if index.insert(major.code.clone(), pos).is_some() {
                return Err(CatalogError::Duplicate {
                    kind: "major",
                    key: major.code.to_string(),
                });
            }
            for &question in &major.questions {
                if by_question.insert(question, pos).is_some() {
                    return Err(CatalogError::Duplicate {
                        kind: "question number",
                        key: question.to_string(),
                    });
                }
            }
            for requirement in &major.requirements {
                let context = format!("major {}", major.code);
                match &requirement.target {
                    RequirementTarget::Course(id) => {
                        if !catalog.contains(id) {
                            return Err(CatalogError::missing(id, context));
                        }
                    }
                    RequirementTarget::Group(name) => {
                        let group =
                            catalog
                                .group(name)
                                .ok_or_else(|| CatalogError::UnknownGroup {
                                    name: name.clone(),
                                    context,
                                })?;
                        groups.insert(group.name.clone(), group.clone());
                    }
                }
            }
        }

        Ok(Self {
            majors,
            index,
            by_question,
            groups,
        })
    }

    pub fn get(&self, code: &MajorCode) -> Option<&Major> {
        self.index.get(code).map(|&pos| &self.majors[pos])
    }

    /// Like [`get`](Self::get), but an unknown code is an error.
    pub fn major(&self, code: &MajorCode) -> Result<&Major> {
        self.get(code)
            .ok_or_else(|| CatalogError::UnknownMajor { code: code.clone() })
    }

    /// Major selected by a self-report question number.
    pub fn by_question(&self, question: u32) -> Option<&Major> {
        self.by_question.get(&question).map(|&pos| &self.majors[pos])
    }

    pub fn requirements(&self, code: &MajorCode) -> Result<&[Requirement]> {
        Ok(&self.major(code)?.requirements)
    }

    /// Distinct requirement targets of a major, in listed order.
    pub fn required_courses(&self, code: &MajorCode) -> Result<Vec<&RequirementTarget>> {
        let mut out: Vec<&RequirementTarget> = Vec::new();
        for requirement in self.requirements(code)? {
            if !out.contains(&&requirement.target) {
                out.push(&requirement.target);
            }
        }
        Ok(out)
    }

    /// Majors with a requirement that `course` satisfies, directly or as a
    /// group option.
    pub fn majors_requiring(&self, course: &CourseId) -> Vec<&Major> {
        self.majors
            .iter()
            .filter(|major| {
                major
                    .requirements
                    .iter()
                    .any(|requirement| self.satisfies(&requirement.target, course))
            })
            .collect()
    }

    fn satisfies(&self, target: &RequirementTarget, course: &CourseId) -> bool {
        match target {
            RequirementTarget::Course(id) => id == course,
            RequirementTarget::Group(name) => self
                .groups
                .get(name)
                .is_some_and(|group| group.contains(course)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Major> {
        self.majors.iter()
    }

    /// Majors a student can pick directly.
    pub fn selectable(&self) -> impl Iterator<Item = &Major> {
        self.majors.iter().filter(|major| major.selectable)
    }

    pub fn len(&self) -> usize {
        self.majors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.majors.is_empty()
    }
}
