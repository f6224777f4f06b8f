//! Majors and their per-semester math requirements.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CourseId, MajorCode};

/// How strongly a major expects a requirement to be met on schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    Typical,
    Recommended,
    Critical,
}

impl Importance {
    /// Suffix used in the compact requirement notation.
    pub fn marker(&self) -> &'static str {
        match self {
            Importance::Typical => "",
            Importance::Recommended => ".",
            Importance::Critical => "!",
        }
    }
}

/// Either a single course or a named course group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RequirementTarget {
    Course(CourseId),
    Group(String),
}

impl fmt::Display for RequirementTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequirementTarget::Course(id) => write!(f, "{id}"),
            RequirementTarget::Group(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// 1-based semester in which the major schedules this requirement.
    pub semester: u8,
    pub target: RequirementTarget,
    pub importance: Importance,
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.target, self.importance.marker())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Major {
    pub code: MajorCode,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concentration: Option<String>,
    /// Self-report question numbers that select this major.
    #[serde(default)]
    pub questions: Vec<u32>,
    #[serde(default)]
    pub tracks: Vec<String>,
    /// False for program shells that students pick through a concentration.
    #[serde(default = "default_selectable")]
    pub selectable: bool,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

fn default_selectable() -> bool {
    true
}

impl Major {
    pub fn display_name(&self) -> String {
        match &self.concentration {
            Some(concentration) => format!("{} ({concentration})", self.name),
            None => self.name.clone(),
        }
    }

    /// Requirements scheduled no later than `semester`.
    pub fn requirements_through(&self, semester: u8) -> impl Iterator<Item = &Requirement> {
        self.requirements
            .iter()
            .filter(move |req| req.semester <= semester)
    }
}
