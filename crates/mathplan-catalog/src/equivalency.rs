//! External credit codes and the local courses they clear.

use std::collections::BTreeMap;

use mathplan_model::{ClearanceKind, CourseId, normalize_code};

use crate::error::{CatalogError, Result};

/// One row of the equivalency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equivalency {
    pub code: String,
    pub label: Option<String>,
    pub courses: Vec<CourseId>,
    /// Overrides the clearance kind carried by the transfer record.
    pub kind: Option<ClearanceKind>,
}

#[derive(Debug, Clone, Default)]
pub struct EquivalencyTable {
    by_code: BTreeMap<String, Equivalency>,
}

impl EquivalencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mut entry: Equivalency) -> Result<()> {
        entry.code = normalize_code(&entry.code);
        if self.by_code.contains_key(&entry.code) {
            return Err(CatalogError::Duplicate {
                kind: "equivalency",
                key: entry.code,
            });
        }
        self.by_code.insert(entry.code.clone(), entry);
        Ok(())
    }

    /// Case- and whitespace-insensitive lookup.
    pub fn get(&self, code: &str) -> Option<&Equivalency> {
        self.by_code.get(&normalize_code(code))
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Equivalency> {
        self.by_code.values()
    }
}

/// How an external code resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquivalencyMatch {
    Table {
        courses: Vec<CourseId>,
        kind: Option<ClearanceKind>,
    },
    /// Generic core credit: satisfies every AUCC course and nothing else.
    GenericCore { courses: Vec<CourseId> },
    /// The code is itself a catalog course id.
    Course(CourseId),
    Unrecognized,
}

impl EquivalencyMatch {
    pub fn courses(&self) -> &[CourseId] {
        match self {
            EquivalencyMatch::Table { courses, .. } | EquivalencyMatch::GenericCore { courses } => {
                courses
            }
            EquivalencyMatch::Course(course) => std::slice::from_ref(course),
            EquivalencyMatch::Unrecognized => &[],
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, EquivalencyMatch::Unrecognized)
    }
}

/// True when `code` carries the generic-credit suffix, e.g. `MATH1B` or `math 1b`.
pub fn has_generic_marker(code: &str, marker: &str) -> bool {
    if marker.is_empty() {
        return false;
    }
    let compact: String = code
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();
    compact.len() > marker.len() && compact.ends_with(&marker.to_uppercase())
}

/// Candidate catalog ids for a raw code: the code as written and, for codes
/// like `M120`, the spaced form `M 120`.
pub(crate) fn course_id_candidates(code: &str) -> Vec<String> {
    let normalized = normalize_code(code);
    let mut out = vec![normalized.clone()];
    if !normalized.contains(' ')
        && let Some(split) = normalized.find(|c: char| c.is_ascii_digit())
        && split > 0
        && normalized[..split].chars().all(|c| c.is_ascii_alphabetic())
    {
        out.push(format!("{} {}", &normalized[..split], &normalized[split..]));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generic_marker_ignores_case_and_spaces() {
        assert!(has_generic_marker("MATH1B", "1B"));
        assert!(has_generic_marker("math 1b", "1B"));
        assert!(!has_generic_marker("1B", "1B"));
        assert!(!has_generic_marker("MTH 111", "1B"));
    }

    #[test]
    fn spaced_candidate_for_compact_codes() {
        assert_eq!(course_id_candidates("m120"), vec!["M120", "M 120"]);
        assert_eq!(course_id_candidates("M 120"), vec!["M 120"]);
        assert_eq!(course_id_candidates("AP-CALC"), vec!["AP-CALC"]);
    }

    #[test]
    fn duplicate_codes_rejected() {
        let mut table = EquivalencyTable::new();
        let entry = Equivalency {
            code: "mth 111".to_string(),
            label: None,
            courses: vec![CourseId::new("M 117").unwrap()],
            kind: None,
        };
        table.insert(entry.clone()).unwrap();
        assert!(table.get("MTH  111").is_some());
        assert!(matches!(
            table.insert(entry),
            Err(CatalogError::Duplicate { .. })
        ));
    }
}
