#![deny(unsafe_code)]

use mathplan_catalog::CatalogError;
use mathplan_model::{CourseId, MajorCode};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EngineError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("no next step is defined for missing courses [{}]", join(.missing))]
    UnsupportedEligibilityCombination { missing: Vec<CourseId> },

    #[error("self-assessment path {path:?} is invalid: {reason}")]
    InvalidSelfAssessmentPath { path: String, reason: String },

    #[error("decision table has no entry for missing courses [{}] reachable from {context}", join(.missing))]
    IncompleteDecisionTable {
        context: String,
        missing: Vec<CourseId>,
    },

    #[error("major {code} is not in the registry")]
    UnknownMajor { code: MajorCode },

    #[error("invalid self-assessment tree at {path:?}: {message}")]
    InvalidTree { path: String, message: String },

    #[error("requirements involve {courses} courses, at most {max} can be checked")]
    RequirementsTooBroad { courses: usize, max: usize },

    #[error("catalog defines {count} placement gates, at most {max} are supported")]
    TooManyGates { count: usize, max: usize },
}

impl EngineError {
    pub(crate) fn bad_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSelfAssessmentPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

fn join(courses: &[CourseId]) -> String {
    courses
        .iter()
        .map(CourseId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, EngineError>;
