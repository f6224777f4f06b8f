//! Per-student facts supplied by the caller.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{ClearanceKind, CourseId, Grade, MajorCode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedCourse {
    pub course: CourseId,
    pub grade: Grade,
    /// Term code as the registrar reports it, e.g. `FA24`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferCredit {
    /// External course or exam code (`MTH 111`, `AP CALC AB`, `MATH1B`).
    pub code: String,
    /// Local course the registrar mapped the credit to, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseId>,
    #[serde(default = "default_transfer_kind")]
    pub kind: ClearanceKind,
}

fn default_transfer_kind() -> ClearanceKind {
    ClearanceKind::CreditEarned
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    pub course: CourseId,
    pub kind: ClearanceKind,
    /// Section name to score, e.g. `"Algebra" -> 17.0`.
    #[serde(default)]
    pub section_scores: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempted_on: Option<NaiveDate>,
}

/// Facts about one student, assembled fresh for each request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentAcademicRecord {
    #[serde(default)]
    pub completed: Vec<CompletedCourse>,
    #[serde(default)]
    pub transfers: Vec<TransferCredit>,
    #[serde(default)]
    pub placements: Vec<PlacementResult>,
    #[serde(default)]
    pub selected_majors: Vec<MajorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_major: Option<MajorCode>,
}

impl StudentAcademicRecord {
    #[must_use]
    pub fn with_completed(mut self, course: CourseId, grade: Grade) -> Self {
        self.completed.push(CompletedCourse {
            course,
            grade,
            term: None,
        });
        self
    }

    #[must_use]
    pub fn with_transfer(mut self, code: impl Into<String>, kind: ClearanceKind) -> Self {
        self.transfers.push(TransferCredit {
            code: code.into(),
            course: None,
            kind,
        });
        self
    }

    #[must_use]
    pub fn with_placement(mut self, course: CourseId, kind: ClearanceKind) -> Self {
        self.placements.push(PlacementResult {
            course,
            kind,
            section_scores: BTreeMap::new(),
            attempted_on: None,
        });
        self
    }

    #[must_use]
    pub fn with_major(mut self, major: MajorCode) -> Self {
        self.selected_majors.push(major);
        self
    }

    /// Selected majors followed by the declared major, without duplicates.
    pub fn majors(&self) -> Vec<&MajorCode> {
        let mut out: Vec<&MajorCode> = Vec::new();
        for code in self.selected_majors.iter().chain(self.declared_major.iter()) {
            if !out.contains(&code) {
                out.push(code);
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty() && self.transfers.is_empty() && self.placements.is_empty()
    }
}
