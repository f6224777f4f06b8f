#![deny(unsafe_code)]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Catalog course identifier such as `M 117` or `S 204`.
///
/// Whitespace is collapsed to single spaces and letters are uppercased, so
/// `"m  117"` and `"M 117"` name the same course.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseId(String);

impl CourseId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let normalized = normalize_code(&value);
        if normalized.is_empty() {
            return Err(ModelError::InvalidCourseId(value));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CourseId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CourseId> for String {
    fn from(value: CourseId) -> Self {
        value.0
    }
}

/// Program code of a major or concentration, e.g. `AGBI-BS`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MajorCode(String);

impl MajorCode {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(ModelError::InvalidMajorCode(value));
        }
        Ok(Self(trimmed.to_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MajorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MajorCode {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MajorCode> for String {
    fn from(value: MajorCode) -> Self {
        value.0
    }
}

/// Collapse runs of whitespace and uppercase an external or local code.
pub fn normalize_code(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_id_normalizes_spacing_and_case() {
        let id = CourseId::new("  m   117 ").unwrap();
        assert_eq!(id.as_str(), "M 117");
        assert_eq!(id, CourseId::new("M 117").unwrap());
    }

    #[test]
    fn blank_ids_are_rejected() {
        assert!(CourseId::new("   ").is_err());
        assert!(MajorCode::new("").is_err());
        assert!(MajorCode::new("AGBI BS").is_err());
    }

    #[test]
    fn course_id_deserializes_through_validation() {
        let id: CourseId = serde_json::from_str("\"s 204\"").unwrap();
        assert_eq!(id.to_string(), "S 204");
        assert!(serde_json::from_str::<CourseId>("\"\"").is_err());
    }
}
