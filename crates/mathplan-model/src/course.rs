//! Catalog course definitions.

use serde::{Deserialize, Serialize};

use crate::{CourseId, Grade};

/// One acceptable way to satisfy a prerequisite group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prerequisite {
    pub course: CourseId,
    /// Minimum grade when the prerequisite was satisfied by completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_grade: Option<Grade>,
}

/// Alternatives of which at least one must be cleared.
///
/// The first alternative is the canonical one: it is the course a student is
/// expected to take, and the one implied when a later course is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrerequisiteGroup {
    pub any_of: Vec<Prerequisite>,
}

impl PrerequisiteGroup {
    pub fn canonical(&self) -> Option<&Prerequisite> {
        self.any_of.first()
    }

    pub fn courses(&self) -> impl Iterator<Item = &CourseId> {
        self.any_of.iter().map(|alt| &alt.course)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    #[serde(default)]
    pub credits: u8,
    /// Every group must be satisfied.
    #[serde(default)]
    pub prerequisites: Vec<PrerequisiteGroup>,
    /// Zero-prerequisite course that satisfies the core quantitative requirement.
    #[serde(default)]
    pub aucc: bool,
    /// Course a student can place into or out of with the placement tool.
    #[serde(default)]
    pub gate: bool,
    /// Courses cleared along with this one.
    #[serde(default)]
    pub covers: Vec<CourseId>,
}

impl Course {
    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }

    /// First alternative of each prerequisite group.
    pub fn canonical_parents(&self) -> impl Iterator<Item = &CourseId> {
        self.prerequisites
            .iter()
            .filter_map(|group| group.canonical().map(|alt| &alt.course))
    }

    /// Every course referenced by a prerequisite alternative.
    pub fn referenced(&self) -> impl Iterator<Item = &CourseId> {
        self.prerequisites
            .iter()
            .flat_map(PrerequisiteGroup::courses)
            .chain(self.covers.iter())
    }
}

/// Named pick-list of courses, such as the AUCC core group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseGroup {
    pub name: String,
    /// Credit hours the requirement asks for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<u8>,
    /// Lowest-level member, used when planning toward the group.
    pub representative: CourseId,
    pub options: Vec<CourseId>,
}

impl CourseGroup {
    pub fn contains(&self, course: &CourseId) -> bool {
        self.options.contains(course)
    }
}
