//! Evaluation settings.

use mathplan_model::Grade;
use serde::{Deserialize, Serialize};

/// Which scheduled requirements count toward a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementHorizon {
    #[default]
    AllListed,
    FirstSemester,
}

impl RequirementHorizon {
    /// Last semester whose requirements are included.
    pub fn last_semester(&self) -> u8 {
        match self {
            RequirementHorizon::AllListed => u8::MAX,
            RequirementHorizon::FirstSemester => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Lowest grade on a completed course that clears it.
    pub passing_grade: Grade,
    pub horizon: RequirementHorizon,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            passing_grade: Grade::C,
            horizon: RequirementHorizon::AllListed,
        }
    }
}

impl EngineConfig {
    /// Only first-semester requirements count.
    pub fn first_semester() -> Self {
        Self {
            horizon: RequirementHorizon::FirstSemester,
            ..Self::default()
        }
    }

    /// Accepts C- as passing.
    pub fn lenient() -> Self {
        Self {
            passing_grade: Grade::CMinus,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_passing_grade(mut self, grade: Grade) -> Self {
        self.passing_grade = grade;
        self
    }

    #[must_use]
    pub fn with_horizon(mut self, horizon: RequirementHorizon) -> Self {
        self.horizon = horizon;
        self
    }
}
