//! Letter grades on completed courses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Letter grade recorded for a completed course.
///
/// `S` (satisfactory) counts as a C for threshold checks. `W` and `I` never
/// meet any threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Grade {
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    DPlus,
    D,
    F,
    Satisfactory,
    Unsatisfactory,
    Withdrawn,
    Incomplete,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::F => "F",
            Grade::Satisfactory => "S",
            Grade::Unsatisfactory => "U",
            Grade::Withdrawn => "W",
            Grade::Incomplete => "I",
        }
    }

    /// Ordinal used for threshold comparison, higher is better.
    fn rank(&self) -> Option<u8> {
        match self {
            Grade::A => Some(12),
            Grade::AMinus => Some(11),
            Grade::BPlus => Some(10),
            Grade::B => Some(9),
            Grade::BMinus => Some(8),
            Grade::CPlus => Some(7),
            Grade::C | Grade::Satisfactory => Some(6),
            Grade::CMinus => Some(5),
            Grade::DPlus => Some(4),
            Grade::D => Some(3),
            Grade::F | Grade::Unsatisfactory => Some(0),
            Grade::Withdrawn | Grade::Incomplete => None,
        }
    }

    /// Returns true if this grade is at or above `minimum`.
    pub fn meets(&self, minimum: Grade) -> bool {
        match (self.rank(), minimum.rank()) {
            (Some(have), Some(need)) => have >= need,
            _ => false,
        }
    }

    /// Picks the better of two grades; ungraded marks lose to any letter.
    pub fn better(self, other: Grade) -> Grade {
        match (self.rank(), other.rank()) {
            (Some(a), Some(b)) if b > a => other,
            (None, Some(_)) => other,
            _ => self,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('\u{2212}', "-");
        match normalized.as_str() {
            "A" | "A+" => Ok(Grade::A),
            "A-" => Ok(Grade::AMinus),
            "B+" => Ok(Grade::BPlus),
            "B" => Ok(Grade::B),
            "B-" => Ok(Grade::BMinus),
            "C+" => Ok(Grade::CPlus),
            "C" => Ok(Grade::C),
            "C-" => Ok(Grade::CMinus),
            "D+" => Ok(Grade::DPlus),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            "S" => Ok(Grade::Satisfactory),
            "U" => Ok(Grade::Unsatisfactory),
            "W" => Ok(Grade::Withdrawn),
            "I" => Ok(Grade::Incomplete),
            _ => Err(ModelError::UnknownGrade(s.to_string())),
        }
    }
}

impl TryFrom<String> for Grade {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Grade> for String {
    fn from(value: Grade) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_comparison() {
        assert!(Grade::B.meets(Grade::B));
        assert!(Grade::AMinus.meets(Grade::B));
        assert!(!Grade::BMinus.meets(Grade::B));
        assert!(Grade::Satisfactory.meets(Grade::C));
        assert!(!Grade::Withdrawn.meets(Grade::F));
    }

    #[test]
    fn parses_unicode_minus() {
        assert_eq!("c\u{2212}".parse::<Grade>().unwrap(), Grade::CMinus);
        assert!("Q".parse::<Grade>().is_err());
    }

    #[test]
    fn better_prefers_letter_over_withdrawal() {
        assert_eq!(Grade::Withdrawn.better(Grade::D), Grade::D);
        assert_eq!(Grade::B.better(Grade::CPlus), Grade::B);
    }
}
