#![deny(unsafe_code)]

use std::path::PathBuf;

use mathplan_model::{CourseId, MajorCode, ModelError};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("failed to read policy file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML policy {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported policy schema in {path}: expected {expected} v{version}, found {found}")]
    UnsupportedSchema {
        path: PathBuf,
        expected: &'static str,
        version: u32,
        found: String,
    },

    #[error("course {course} referenced by {context} is not in the catalog")]
    MissingCatalogEntry { course: CourseId, context: String },

    #[error("course group {name} referenced by {context} is not defined")]
    UnknownGroup { name: String, context: String },

    #[error("major {code} is not in the registry")]
    UnknownMajor { code: MajorCode },

    #[error("prerequisite chain of {course} loops back on itself")]
    PrerequisiteCycle { course: CourseId },

    #[error("duplicate {kind} in policy: {key}")]
    Duplicate { kind: &'static str, key: String },

    #[error("invalid requirement notation {value:?}: {message}")]
    InvalidNotation { value: String, message: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn missing(course: &CourseId, context: impl Into<String>) -> Self {
        Self::MissingCatalogEntry {
            course: course.clone(),
            context: context.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
