//! Math placement decisions: per-course eligibility from a student record,
//! a single next-step recommendation, and the self-assessment questionnaire.

#![deny(unsafe_code)]

pub mod advisor;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod gates;
pub mod recommend;
pub mod self_assess;

pub use crate::advisor::{Advice, Advisor};
pub use crate::config::{EngineConfig, RequirementHorizon};
pub use crate::eligibility::{Clearances, CourseStatus, EligibilityEvaluator, EligibilityResult};
pub use crate::error::{EngineError, Result};
pub use crate::gates::{GateIndex, GateSet};
pub use crate::recommend::{DecisionTable, GroupCredits, Recommendation, RecommendationResolver};
pub use crate::self_assess::{Answer, Node, Question, SelfAssessmentTree, Step, Terminal};
