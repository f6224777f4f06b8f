//! How a course came to be cleared, and the per-course standing it yields.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Strength of a clearance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearanceKind {
    /// Placed out of the course without receiving credit.
    Placed,
    /// College credit was awarded for the course.
    CreditEarned,
}

impl ClearanceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClearanceKind::Placed => "placed",
            ClearanceKind::CreditEarned => "credit_earned",
        }
    }

    pub fn standing(&self) -> Standing {
        match self {
            ClearanceKind::Placed => Standing::Cleared,
            ClearanceKind::CreditEarned => Standing::CreditEarned,
        }
    }
}

impl fmt::Display for ClearanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClearanceKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "placed" | "placement" => Ok(ClearanceKind::Placed),
            "credit" | "credit_earned" => Ok(ClearanceKind::CreditEarned),
            _ => Err(ModelError::UnknownValue {
                kind: "clearance kind",
                value: s.to_string(),
            }),
        }
    }
}

/// Per-course standing, ordered from weakest to strongest.
///
/// Each level implies every level below it, so credit-earned implies cleared
/// and cleared implies eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    Ineligible,
    Eligible,
    Cleared,
    CreditEarned,
}

impl Standing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Standing::Ineligible => "ineligible",
            Standing::Eligible => "eligible",
            Standing::Cleared => "cleared",
            Standing::CreditEarned => "credit_earned",
        }
    }

    pub fn is_eligible(&self) -> bool {
        *self >= Standing::Eligible
    }

    pub fn is_cleared(&self) -> bool {
        *self >= Standing::Cleared
    }

    pub fn has_credit(&self) -> bool {
        *self == Standing::CreditEarned
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record type that produced a clearance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClearanceSource {
    Completed { grade: crate::Grade },
    Transfer { code: String },
    Placement,
    /// Cleared because an aggregate course covering it was cleared.
    Aggregate { via: crate::CourseId },
    /// Cleared because a later course in its prerequisite chain was cleared.
    Implied { via: crate::CourseId },
    /// Generic core transfer credit.
    GenericCore { code: String },
}

impl ClearanceSource {
    /// True when the source carries no grade and so meets any grade threshold.
    pub fn bypasses_grade(&self) -> bool {
        !matches!(self, ClearanceSource::Completed { .. })
    }

    pub fn label(&self) -> String {
        match self {
            ClearanceSource::Completed { grade } => format!("completed ({grade})"),
            ClearanceSource::Transfer { code } => format!("transfer {code}"),
            ClearanceSource::Placement => "placement".to_string(),
            ClearanceSource::Aggregate { via } => format!("via {via}"),
            ClearanceSource::Implied { via } => format!("implied by {via}"),
            ClearanceSource::GenericCore { code } => format!("core credit {code}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standing_order_encodes_implication() {
        assert!(Standing::CreditEarned.is_cleared());
        assert!(Standing::Cleared.is_eligible());
        assert!(!Standing::Eligible.is_cleared());
        assert!(!Standing::Ineligible.is_eligible());
        assert!(Standing::CreditEarned > Standing::Cleared);
    }

    #[test]
    fn kind_parses_aliases() {
        assert_eq!(
            "credit-earned".parse::<ClearanceKind>().unwrap(),
            ClearanceKind::CreditEarned
        );
        assert_eq!(
            "Placement".parse::<ClearanceKind>().unwrap(),
            ClearanceKind::Placed
        );
        assert!("audit".parse::<ClearanceKind>().is_err());
    }
}
