//! Placement-gate courses and bitsets over them.

use std::fmt;

use mathplan_catalog::{CatalogError, CourseCatalog};
use mathplan_model::CourseId;

use crate::error::{EngineError, Result};

/// Set of gate courses, one bit per gate in catalog order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GateSet(u32);

impl GateSet {
    pub const EMPTY: GateSet = GateSet(0);

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn contains(&self, bit: usize) -> bool {
        bit < GateIndex::MAX_GATES && self.0 & (1 << bit) != 0
    }

    #[must_use]
    pub fn with(self, bit: usize) -> Self {
        debug_assert!(bit < GateIndex::MAX_GATES);
        GateSet(self.0 | (1 << bit))
    }

    #[must_use]
    pub fn union(self, other: GateSet) -> Self {
        GateSet(self.0 | other.0)
    }

    pub fn is_subset(&self, other: GateSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..GateIndex::MAX_GATES).filter(|&bit| self.contains(bit))
    }
}

impl fmt::Display for GateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}

/// Maps gate courses to bit positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateIndex {
    gates: Vec<CourseId>,
}

impl GateIndex {
    pub const MAX_GATES: usize = 32;

    pub fn new(catalog: &CourseCatalog) -> Result<Self> {
        let gates: Vec<CourseId> = catalog.gates().map(|course| course.id.clone()).collect();
        if gates.len() > Self::MAX_GATES {
            return Err(EngineError::TooManyGates {
                count: gates.len(),
                max: Self::MAX_GATES,
            });
        }
        Ok(Self { gates })
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn courses(&self) -> &[CourseId] {
        &self.gates
    }

    pub fn bit(&self, course: &CourseId) -> Option<usize> {
        self.gates.iter().position(|gate| gate == course)
    }

    pub fn is_gate(&self, course: &CourseId) -> bool {
        self.bit(course).is_some()
    }

    /// Gate subset of `courses`; non-gate courses are dropped.
    pub fn set_of<'c>(&self, courses: impl IntoIterator<Item = &'c CourseId>) -> GateSet {
        courses
            .into_iter()
            .filter_map(|course| self.bit(course))
            .fold(GateSet::EMPTY, GateSet::with)
    }

    /// Like [`set_of`](Self::set_of), but every course must be a gate.
    pub fn parse<S: AsRef<str>>(&self, codes: &[S]) -> Result<GateSet> {
        let mut set = GateSet::EMPTY;
        for code in codes {
            let course = CourseId::new(code.as_ref()).map_err(CatalogError::from)?;
            let bit = self.bit(&course).ok_or_else(|| CatalogError::MissingCatalogEntry {
                course,
                context: "placement gates".to_string(),
            })?;
            set = set.with(bit);
        }
        Ok(set)
    }

    pub fn courses_in(&self, set: GateSet) -> Vec<CourseId> {
        set.iter()
            .filter_map(|bit| self.gates.get(bit).cloned())
            .collect()
    }
}
