//! Shared types for math placement advising: course and major definitions,
//! student records, and the outcome codes the engine produces.

pub mod clearance;
pub mod course;
pub mod error;
pub mod grade;
pub mod ids;
pub mod major;
pub mod outcome;
pub mod record;

pub use clearance::{ClearanceKind, ClearanceSource, Standing};
pub use course::{Course, CourseGroup, Prerequisite, PrerequisiteGroup};
pub use error::{ModelError, Result};
pub use grade::Grade;
pub use ids::{CourseId, MajorCode, normalize_code};
pub use major::{Importance, Major, Requirement, RequirementTarget};
pub use outcome::{AdvisoryCategory, NextStepCode, PlacementSection};
pub use record::{CompletedCourse, PlacementResult, StudentAcademicRecord, TransferCredit};
