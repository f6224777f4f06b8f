use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    #[error("invalid course id: {0:?}")]
    InvalidCourseId(String),
    #[error("invalid major code: {0:?}")]
    InvalidMajorCode(String),
    #[error("unknown grade: {0:?}")]
    UnknownGrade(String),
    #[error("unknown {kind}: {value:?}")]
    UnknownValue { kind: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
