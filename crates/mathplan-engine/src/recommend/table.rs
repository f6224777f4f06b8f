//! Lookup table from missing gate courses to a next step.

use std::collections::BTreeMap;

use mathplan_model::NextStepCode;

use crate::error::Result;
use crate::gates::{GateIndex, GateSet};

/// Gates below calculus; missing any of them alongside M 155 means the
/// student should place into calculus.
const PRECALCULUS: &[&str] = &["M 002", "M 117", "M 118", "M 124", "M 125"];
const CALCULUS: &str = "M 155";
const TRIGONOMETRY_II: &str = "M 126";

/// Explicit rows. M 002 missing on its own is deliberately absent.
const BUILTIN: &[(&[&str], NextStepCode)] = &[
    (&[], NextStepCode::AlreadyEligible),
    (&["M 117"], NextStepCode::PlaceOut117),
    (&["M 118"], NextStepCode::PlaceOut118),
    (&["M 117", "M 118"], NextStepCode::PlaceOut117_118),
    (&["M 125"], NextStepCode::PlaceOut125),
    (&["M 118", "M 125"], NextStepCode::PlaceOut118_125),
    (&["M 117", "M 118", "M 125"], NextStepCode::PlaceOut117_118_125),
    (&["M 126"], NextStepCode::PlaceOut126),
    (&["M 125", "M 126"], NextStepCode::PlaceOut125_126),
    (&["M 118", "M 125", "M 126"], NextStepCode::PlaceOut118_125_126),
    (
        &["M 117", "M 118", "M 125", "M 126"],
        NextStepCode::PlaceOut117_118_125_126,
    ),
    (&["M 124"], NextStepCode::PlaceOut124),
    (&["M 118", "M 124"], NextStepCode::PlaceOut118_124),
    (&["M 117", "M 118", "M 124"], NextStepCode::PlaceOut117_118_124),
    (&["M 124", "M 126"], NextStepCode::PlaceOut124_126),
    (&["M 124", "M 125", "M 126"], NextStepCode::PlaceOut124_125_126),
    (
        &["M 118", "M 124", "M 125", "M 126"],
        NextStepCode::PlaceOut118_124_125_126,
    ),
    (
        &["M 117", "M 118", "M 124", "M 125", "M 126"],
        NextStepCode::PlaceOut117_118_124_125_126,
    ),
    (&["M 118", "M 124", "M 125"], NextStepCode::PlaceOut118_124_125),
    (
        &["M 117", "M 118", "M 124", "M 125"],
        NextStepCode::PlaceOut117_118_124_125,
    ),
    (&["M 124", "M 125"], NextStepCode::PlaceOut124_125),
    // Entry-level readiness also missing.
    (&["M 002", "M 117"], NextStepCode::PlaceInto117),
    (&["M 002", "M 117", "M 118"], NextStepCode::PlaceInto118),
    (&["M 002", "M 117", "M 118", "M 125"], NextStepCode::PlaceInto125),
    (
        &["M 002", "M 117", "M 118", "M 124"],
        NextStepCode::PlaceOut117_118_124,
    ),
    (
        &["M 002", "M 117", "M 118", "M 124", "M 125"],
        NextStepCode::PlaceOut117_118_124_125,
    ),
    (
        &["M 002", "M 117", "M 118", "M 125", "M 126"],
        NextStepCode::PlaceOut117_118_125_126,
    ),
    (
        &["M 002", "M 117", "M 118", "M 124", "M 125", "M 126"],
        NextStepCode::PlaceOut117_118_124_125_126,
    ),
    // Calculus.
    (&["M 155"], NextStepCode::AlreadyEligible),
    (&["M 126", "M 155"], NextStepCode::PlaceOut126),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionTable {
    rows: BTreeMap<GateSet, NextStepCode>,
}

impl DecisionTable {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }

    /// Placement rows over the catalog's gates.
    pub fn builtin(gates: &GateIndex) -> Result<Self> {
        let mut table = Self::new();
        for &(courses, code) in BUILTIN {
            table.insert(gates.parse(courses)?, code);
        }

        // Missing calculus together with anything below it: place into calculus.
        let below = gates.parse(PRECALCULUS)?;
        let calculus = gates.parse(&[CALCULUS])?;
        let trig = gates.parse(&[TRIGONOMETRY_II])?;
        let bits: Vec<usize> = below.iter().collect();
        for mask in 1u32..(1 << bits.len()) {
            let chosen = bits
                .iter()
                .enumerate()
                .filter(|(pos, _)| mask & (1 << pos) != 0)
                .fold(calculus, |set, (_, &bit)| set.with(bit));
            table.insert(chosen, NextStepCode::PlaceInto155);
            table.insert(chosen.union(trig), NextStepCode::PlaceInto155);
        }
        Ok(table)
    }

    pub fn insert(&mut self, missing: GateSet, code: NextStepCode) -> Option<NextStepCode> {
        self.rows.insert(missing, code)
    }

    pub fn lookup(&self, missing: GateSet) -> Option<NextStepCode> {
        self.rows.get(&missing).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GateSet, NextStepCode)> + '_ {
        self.rows.iter().map(|(set, code)| (*set, *code))
    }
}

impl Default for DecisionTable {
    fn default() -> Self {
        Self::new()
    }
}
