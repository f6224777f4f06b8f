//! On-disk layout of the policy TOML files.

use serde::{Deserialize, Serialize};

pub const CATALOG_SCHEMA: &str = "mathplan.catalog";
pub const MAJORS_SCHEMA: &str = "mathplan.majors";
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyHeader {
    pub schema: String,
    pub schema_version: u32,
    #[serde(default)]
    pub generic_marker: Option<String>,
    #[serde(default)]
    pub default_requirement: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub policy: PolicyHeader,
    #[serde(default)]
    pub courses: Vec<CourseEntry>,
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
    #[serde(default)]
    pub equivalencies: Vec<EquivalencyEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub credits: u8,
    /// Groups of alternatives written as `"M 124"` or `"M 124 >= B"`.
    #[serde(default)]
    pub prerequisites: Vec<Vec<String>>,
    #[serde(default)]
    pub aucc: bool,
    #[serde(default)]
    pub gate: bool,
    #[serde(default)]
    pub covers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupEntry {
    pub name: String,
    #[serde(default)]
    pub credits: Option<u8>,
    pub representative: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquivalencyEntry {
    pub code: String,
    #[serde(default)]
    pub label: Option<String>,
    pub courses: Vec<String>,
    #[serde(default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MajorsFile {
    pub policy: PolicyHeader,
    #[serde(default)]
    pub majors: Vec<MajorEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MajorEntry {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub concentration: Option<String>,
    #[serde(default)]
    pub questions: Vec<u32>,
    #[serde(default)]
    pub tracks: Vec<String>,
    #[serde(default = "default_true")]
    pub selectable: bool,
    #[serde(default)]
    pub semester1: Option<String>,
    #[serde(default)]
    pub semester2: Option<String>,
    #[serde(default)]
    pub semester3: Option<String>,
}

fn default_true() -> bool {
    true
}

impl MajorEntry {
    /// Semester number paired with its requirement list, skipping empty ones.
    pub fn semesters(&self) -> impl Iterator<Item = (u8, &str)> {
        [
            (1u8, self.semester1.as_deref()),
            (2, self.semester2.as_deref()),
            (3, self.semester3.as_deref()),
        ]
        .into_iter()
        .filter_map(|(semester, list)| list.map(|list| (semester, list)))
    }
}
