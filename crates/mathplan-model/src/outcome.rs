//! Recommendation outcomes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Advice bucket shared by the recommendation engine and the self-assessment
/// questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvisoryCategory {
    NoActionNeeded,
    StudyAndPlace,
    BringTranscript,
    CheckMajorReqs,
    StronglyRecommendPlace,
}

impl AdvisoryCategory {
    pub const ALL: [AdvisoryCategory; 5] = [
        AdvisoryCategory::NoActionNeeded,
        AdvisoryCategory::StudyAndPlace,
        AdvisoryCategory::BringTranscript,
        AdvisoryCategory::CheckMajorReqs,
        AdvisoryCategory::StronglyRecommendPlace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisoryCategory::NoActionNeeded => "NO_ACTION_NEEDED",
            AdvisoryCategory::StudyAndPlace => "STUDY_AND_PLACE",
            AdvisoryCategory::BringTranscript => "BRING_TRANSCRIPT",
            AdvisoryCategory::CheckMajorReqs => "CHECK_MAJOR_REQS",
            AdvisoryCategory::StronglyRecommendPlace => "STRONGLY_RECOMMEND_PLACE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdvisoryCategory::NoActionNeeded => "No action needed",
            AdvisoryCategory::StudyAndPlace => "Review, practice, and take the placement tool",
            AdvisoryCategory::BringTranscript => "Bring a transcript to orientation",
            AdvisoryCategory::CheckMajorReqs => "Check the math requirements for your major",
            AdvisoryCategory::StronglyRecommendPlace => "Placement strongly recommended",
        }
    }
}

impl fmt::Display for AdvisoryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdvisoryCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        AdvisoryCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownValue {
                kind: "advisory category",
                value: s.to_string(),
            })
    }
}

/// Section of the placement tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementSection {
    Algebra,
    LogarithmicExponential,
    Trigonometry,
}

impl PlacementSection {
    pub fn label(&self) -> &'static str {
        match self {
            PlacementSection::Algebra => "Algebra",
            PlacementSection::LogarithmicExponential => "Logarithmic & Exponential Functions",
            PlacementSection::Trigonometry => "Trigonometry",
        }
    }
}

/// The single next step recommended to a student.
///
/// `PlaceInto*` codes apply when the student is not yet eligible for the
/// first course they need. `PlaceOut*` codes list the courses the student
/// could place out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
#[allow(non_camel_case_types)]
pub enum NextStepCode {
    NotNeeded,
    AlreadyEligible,
    PlaceInto117,
    PlaceInto118,
    PlaceInto125,
    PlaceInto155,
    PlaceOut117,
    PlaceOut118,
    PlaceOut117_118,
    PlaceOut125,
    PlaceOut118_125,
    PlaceOut117_118_125,
    PlaceOut126,
    PlaceOut125_126,
    PlaceOut118_125_126,
    PlaceOut117_118_125_126,
    PlaceOut124,
    PlaceOut118_124,
    PlaceOut117_118_124,
    PlaceOut124_126,
    PlaceOut124_125_126,
    PlaceOut118_124_125_126,
    PlaceOut117_118_124_125_126,
    PlaceOut118_124_125,
    PlaceOut117_118_124_125,
    PlaceOut124_125,
}

impl NextStepCode {
    pub const ALL: [NextStepCode; 26] = [
        NextStepCode::NotNeeded,
        NextStepCode::AlreadyEligible,
        NextStepCode::PlaceInto117,
        NextStepCode::PlaceInto118,
        NextStepCode::PlaceInto125,
        NextStepCode::PlaceInto155,
        NextStepCode::PlaceOut117,
        NextStepCode::PlaceOut118,
        NextStepCode::PlaceOut117_118,
        NextStepCode::PlaceOut125,
        NextStepCode::PlaceOut118_125,
        NextStepCode::PlaceOut117_118_125,
        NextStepCode::PlaceOut126,
        NextStepCode::PlaceOut125_126,
        NextStepCode::PlaceOut118_125_126,
        NextStepCode::PlaceOut117_118_125_126,
        NextStepCode::PlaceOut124,
        NextStepCode::PlaceOut118_124,
        NextStepCode::PlaceOut117_118_124,
        NextStepCode::PlaceOut124_126,
        NextStepCode::PlaceOut124_125_126,
        NextStepCode::PlaceOut118_124_125_126,
        NextStepCode::PlaceOut117_118_124_125_126,
        NextStepCode::PlaceOut118_124_125,
        NextStepCode::PlaceOut117_118_124_125,
        NextStepCode::PlaceOut124_125,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NextStepCode::NotNeeded => "NOT_NEEDED",
            NextStepCode::AlreadyEligible => "ALREADY_ELIGIBLE",
            NextStepCode::PlaceInto117 => "PLACE_INTO_117",
            NextStepCode::PlaceInto118 => "PLACE_INTO_118",
            NextStepCode::PlaceInto125 => "PLACE_INTO_125",
            NextStepCode::PlaceInto155 => "PLACE_INTO_155",
            NextStepCode::PlaceOut117 => "PLACE_OUT_117",
            NextStepCode::PlaceOut118 => "PLACE_OUT_118",
            NextStepCode::PlaceOut117_118 => "PLACE_OUT_117_118",
            NextStepCode::PlaceOut125 => "PLACE_OUT_125",
            NextStepCode::PlaceOut118_125 => "PLACE_OUT_118_125",
            NextStepCode::PlaceOut117_118_125 => "PLACE_OUT_117_118_125",
            NextStepCode::PlaceOut126 => "PLACE_OUT_126",
            NextStepCode::PlaceOut125_126 => "PLACE_OUT_125_126",
            NextStepCode::PlaceOut118_125_126 => "PLACE_OUT_118_125_126",
            NextStepCode::PlaceOut117_118_125_126 => "PLACE_OUT_117_118_125_126",
            NextStepCode::PlaceOut124 => "PLACE_OUT_124",
            NextStepCode::PlaceOut118_124 => "PLACE_OUT_118_124",
            NextStepCode::PlaceOut117_118_124 => "PLACE_OUT_117_118_124",
            NextStepCode::PlaceOut124_126 => "PLACE_OUT_124_126",
            NextStepCode::PlaceOut124_125_126 => "PLACE_OUT_124_125_126",
            NextStepCode::PlaceOut118_124_125_126 => "PLACE_OUT_118_124_125_126",
            NextStepCode::PlaceOut117_118_124_125_126 => "PLACE_OUT_117_118_124_125_126",
            NextStepCode::PlaceOut118_124_125 => "PLACE_OUT_118_124_125",
            NextStepCode::PlaceOut117_118_124_125 => "PLACE_OUT_117_118_124_125",
            NextStepCode::PlaceOut124_125 => "PLACE_OUT_124_125",
        }
    }

    /// Courses the student should try to place into or out of.
    pub fn target_courses(&self) -> &'static [&'static str] {
        match self {
            NextStepCode::NotNeeded | NextStepCode::AlreadyEligible => &[],
            NextStepCode::PlaceInto117 => &["M 117"],
            NextStepCode::PlaceInto118 => &["M 117", "M 118"],
            NextStepCode::PlaceInto125 => &["M 117", "M 118", "M 125"],
            NextStepCode::PlaceInto155 => &["M 117", "M 118", "M 124", "M 125"],
            NextStepCode::PlaceOut117 => &["M 117"],
            NextStepCode::PlaceOut118 => &["M 118"],
            NextStepCode::PlaceOut117_118 => &["M 117", "M 118"],
            NextStepCode::PlaceOut125 => &["M 125"],
            NextStepCode::PlaceOut118_125 => &["M 118", "M 125"],
            NextStepCode::PlaceOut117_118_125 => &["M 117", "M 118", "M 125"],
            NextStepCode::PlaceOut126 => &["M 126"],
            NextStepCode::PlaceOut125_126 => &["M 125", "M 126"],
            NextStepCode::PlaceOut118_125_126 => &["M 118", "M 125", "M 126"],
            NextStepCode::PlaceOut117_118_125_126 => &["M 117", "M 118", "M 125", "M 126"],
            NextStepCode::PlaceOut124 => &["M 124"],
            NextStepCode::PlaceOut118_124 => &["M 118", "M 124"],
            NextStepCode::PlaceOut117_118_124 => &["M 117", "M 118", "M 124"],
            NextStepCode::PlaceOut124_126 => &["M 124", "M 126"],
            NextStepCode::PlaceOut124_125_126 => &["M 124", "M 125", "M 126"],
            NextStepCode::PlaceOut118_124_125_126 => &["M 118", "M 124", "M 125", "M 126"],
            NextStepCode::PlaceOut117_118_124_125_126 => &["M 117", "M 118", "M 124", "M 125", "M 126"],
            NextStepCode::PlaceOut118_124_125 => &["M 118", "M 124", "M 125"],
            NextStepCode::PlaceOut117_118_124_125 => &["M 117", "M 118", "M 124", "M 125"],
            NextStepCode::PlaceOut124_125 => &["M 124", "M 125"],
        }
    }

    pub fn category(&self) -> AdvisoryCategory {
        match self {
            NextStepCode::NotNeeded | NextStepCode::AlreadyEligible => {
                AdvisoryCategory::NoActionNeeded
            }
            NextStepCode::PlaceInto117
            | NextStepCode::PlaceInto118
            | NextStepCode::PlaceInto125
            | NextStepCode::PlaceInto155 => AdvisoryCategory::StronglyRecommendPlace,
            _ => AdvisoryCategory::StudyAndPlace,
        }
    }

    pub fn is_place_into(&self) -> bool {
        self.category() == AdvisoryCategory::StronglyRecommendPlace
    }

    /// Placement tool sections worth attempting for this step.
    pub fn placement_sections(&self) -> Vec<PlacementSection> {
        if self.category() == AdvisoryCategory::NoActionNeeded {
            return Vec::new();
        }
        if *self == NextStepCode::PlaceInto155 {
            return vec![
                PlacementSection::Algebra,
                PlacementSection::Trigonometry,
                PlacementSection::LogarithmicExponential,
            ];
        }
        let targets = self.target_courses();
        let mut sections = vec![PlacementSection::Algebra];
        if targets.iter().any(|c| *c == "M 125" || *c == "M 126") && !self.is_place_into() {
            sections.push(PlacementSection::Trigonometry);
        }
        if targets.contains(&"M 124") {
            sections.push(PlacementSection::LogarithmicExponential);
        }
        sections
    }

    /// One-sentence advice for the student.
    pub fn advice(&self) -> String {
        let sections = self
            .placement_sections()
            .iter()
            .map(|section| format!("\"{}\"", section.label()))
            .collect::<Vec<_>>();
        let sections = join_words(&sections);
        let courses = join_words(
            &self
                .target_courses()
                .iter()
                .map(|c| c.replace("M ", "MATH "))
                .collect::<Vec<_>>(),
        );
        match self {
            NextStepCode::NotNeeded => {
                "You have already completed the math your program needs.".to_string()
            }
            NextStepCode::AlreadyEligible => {
                "You are eligible to register for a Mathematics course appropriate for your program."
                    .to_string()
            }
            NextStepCode::PlaceInto117 => format!(
                "Complete the {sections} section of the Math Placement Tool to become eligible for MATH 117 or MATH 120."
            ),
            NextStepCode::PlaceInto118 => format!(
                "Complete the {sections} section of the Math Placement Tool to place out of MATH 117 and become eligible for MATH 118."
            ),
            NextStepCode::PlaceInto125 => format!(
                "Complete the {sections} section of the Math Placement Tool to place out of MATH 117 and MATH 118 and become eligible for MATH 125."
            ),
            NextStepCode::PlaceInto155 => format!(
                "Complete the {sections} sections of the Math Placement Tool to become eligible for MATH 155."
            ),
            _ => format!(
                "Complete the {sections} section(s) of the Math Placement Tool to try to place out of {courses}."
            ),
        }
    }
}

fn join_words(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
    }
}

impl fmt::Display for NextStepCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NextStepCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        let normalized = normalized.strip_prefix("MSG_").unwrap_or(&normalized);
        let normalized = if normalized == "PLACEMENT_NOT_NEEDED" {
            "NOT_NEEDED"
        } else {
            normalized
        };
        NextStepCode::ALL
            .into_iter()
            .find(|code| code.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownValue {
                kind: "next step code",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for NextStepCode {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NextStepCode> for String {
    fn from(value: NextStepCode) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_round_trips_through_its_name() {
        for code in NextStepCode::ALL {
            assert_eq!(code.as_str().parse::<NextStepCode>().unwrap(), code);
        }
        assert_eq!(
            "MSG_PLACEMENT_NOT_NEEDED".parse::<NextStepCode>().unwrap(),
            NextStepCode::NotNeeded
        );
    }

    #[test]
    fn sections_follow_target_courses() {
        assert_eq!(
            NextStepCode::PlaceOut117_118.placement_sections(),
            vec![PlacementSection::Algebra]
        );
        assert_eq!(
            NextStepCode::PlaceOut124_126.placement_sections(),
            vec![
                PlacementSection::Algebra,
                PlacementSection::Trigonometry,
                PlacementSection::LogarithmicExponential,
            ]
        );
        assert_eq!(
            NextStepCode::PlaceInto125.placement_sections(),
            vec![PlacementSection::Algebra]
        );
        assert!(NextStepCode::AlreadyEligible.placement_sections().is_empty());
    }

    #[test]
    fn categories() {
        assert_eq!(
            NextStepCode::PlaceInto155.category(),
            AdvisoryCategory::StronglyRecommendPlace
        );
        assert_eq!(
            NextStepCode::PlaceOut125.category(),
            AdvisoryCategory::StudyAndPlace
        );
        assert_eq!(
            NextStepCode::NotNeeded.category(),
            AdvisoryCategory::NoActionNeeded
        );
    }

    #[test]
    fn advice_names_courses() {
        assert_eq!(
            NextStepCode::PlaceOut118_125.advice(),
            "Complete the \"Algebra\" and \"Trigonometry\" section(s) of the Math Placement Tool to try to place out of MATH 118 and MATH 125."
        );
    }
}
