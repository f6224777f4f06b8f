//! Compact notation used in the policy files.
//!
//! - prerequisite alternatives: `"M 124"` or `"M 124 >= B"`
//! - requirement lists: `"M 117!,M 118.,AUCC3"`

use mathplan_model::{CourseId, Grade, Importance, Prerequisite};

use crate::error::{CatalogError, Result};

pub fn parse_prerequisite(value: &str) -> Result<Prerequisite> {
    let (course, min_grade) = match value.split_once(">=") {
        Some((course, grade)) => {
            let grade: Grade = grade.parse()?;
            (course, Some(grade))
        }
        None => (value, None),
    };
    Ok(Prerequisite {
        course: CourseId::new(course)?,
        min_grade,
    })
}

/// One entry of a requirement list, before it is resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementToken {
    pub name: String,
    pub importance: Importance,
}

pub fn parse_requirement_list(value: &str) -> Result<Vec<RequirementToken>> {
    let mut tokens = Vec::new();
    for raw in value.split(',') {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CatalogError::InvalidNotation {
                value: value.to_string(),
                message: "empty entry".to_string(),
            });
        }
        let (name, importance) = if let Some(name) = raw.strip_suffix('!') {
            (name, Importance::Critical)
        } else if let Some(name) = raw.strip_suffix('.') {
            (name, Importance::Recommended)
        } else {
            (raw, Importance::Typical)
        };
        let name = name.trim();
        if name.is_empty() || name.ends_with(['!', '.']) {
            return Err(CatalogError::InvalidNotation {
                value: value.to_string(),
                message: format!("malformed entry {raw:?}"),
            });
        }
        tokens.push(RequirementToken {
            name: name.to_string(),
            importance,
        });
    }
    Ok(tokens)
}
