//! Reading the TOML policy files into a catalog and registry.

use std::path::{Path, PathBuf};

use mathplan_model::{
    ClearanceKind, Course, CourseGroup, CourseId, Major, MajorCode, PrerequisiteGroup, Requirement,
};

use crate::catalog::CourseCatalog;
use crate::equivalency::{Equivalency, EquivalencyTable};
use crate::error::{CatalogError, Result};
use crate::manifest::{
    CATALOG_SCHEMA, CatalogFile, CourseEntry, MAJORS_SCHEMA, MajorEntry, MajorsFile, PolicyHeader,
    SCHEMA_VERSION,
};
use crate::notation::{parse_prerequisite, parse_requirement_list};
use crate::paths;
use crate::registry::MajorRequirementRegistry;

const BUILTIN_CATALOG: &str = include_str!("../../../policy/catalog.toml");
const BUILTIN_MAJORS: &str = include_str!("../../../policy/majors.toml");

/// Catalog and registry loaded together.
#[derive(Debug, Clone)]
pub struct Policy {
    pub catalog: CourseCatalog,
    pub registry: MajorRequirementRegistry,
}

impl Policy {
    /// Loads `catalog.toml` and `majors.toml` from `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let catalog = load_catalog(&dir.join(paths::CATALOG_FILE))?;
        let registry = load_registry(&dir.join(paths::MAJORS_FILE), &catalog)?;
        Ok(Self { catalog, registry })
    }

    /// Loads from [`paths::policy_root`].
    pub fn load_default() -> Result<Self> {
        Self::load(&paths::policy_root())
    }

    /// Policy compiled into the binary.
    pub fn builtin() -> Result<Self> {
        let catalog = parse_catalog(BUILTIN_CATALOG, Path::new("<builtin>/catalog.toml"))?;
        let registry = parse_registry(
            BUILTIN_MAJORS,
            Path::new("<builtin>/majors.toml"),
            &catalog,
        )?;
        Ok(Self { catalog, registry })
    }
}

pub fn load_catalog(path: &Path) -> Result<CourseCatalog> {
    let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    parse_catalog(&contents, path)
}

pub fn parse_catalog(contents: &str, origin: &Path) -> Result<CourseCatalog> {
    let file: CatalogFile = toml::from_str(contents).map_err(|e| CatalogError::Toml {
        path: origin.to_path_buf(),
        source: e,
    })?;
    check_header(&file.policy, CATALOG_SCHEMA, origin)?;

    let courses = file
        .courses
        .iter()
        .map(course_from_entry)
        .collect::<Result<Vec<_>>>()?;

    let groups = file
        .groups
        .into_iter()
        .map(|entry| -> Result<CourseGroup> {
            Ok(CourseGroup {
                name: entry.name,
                credits: entry.credits,
                representative: CourseId::new(entry.representative)?,
                options: entry
                    .options
                    .into_iter()
                    .map(CourseId::new)
                    .collect::<std::result::Result<Vec<_>, _>>()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut equivalencies = EquivalencyTable::new();
    for entry in file.equivalencies {
        let kind = entry
            .kind
            .as_deref()
            .map(str::parse::<ClearanceKind>)
            .transpose()?;
        equivalencies.insert(Equivalency {
            code: entry.code,
            label: entry.label,
            courses: entry
                .courses
                .into_iter()
                .map(CourseId::new)
                .collect::<std::result::Result<Vec<_>, _>>()?,
            kind,
        })?;
    }

    let catalog = CourseCatalog::new(
        courses,
        groups,
        equivalencies,
        file.policy.generic_marker,
        file.policy.default_requirement,
    )?;
    tracing::info!(
        origin = %origin.display(),
        courses = catalog.len(),
        gates = catalog.gates().count(),
        equivalencies = catalog.equivalencies().len(),
        "loaded course catalog"
    );
    Ok(catalog)
}

fn course_from_entry(entry: &CourseEntry) -> Result<Course> {
    let prerequisites = entry
        .prerequisites
        .iter()
        .map(|alternatives| -> Result<PrerequisiteGroup> {
            if alternatives.is_empty() {
                return Err(CatalogError::InvalidNotation {
                    value: entry.id.clone(),
                    message: "empty prerequisite group".to_string(),
                });
            }
            Ok(PrerequisiteGroup {
                any_of: alternatives
                    .iter()
                    .map(|alt| parse_prerequisite(alt))
                    .collect::<Result<Vec<_>>>()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Course {
        id: CourseId::new(entry.id.as_str())?,
        title: entry.title.clone(),
        credits: entry.credits,
        prerequisites,
        aucc: entry.aucc,
        gate: entry.gate,
        covers: entry
            .covers
            .iter()
            .map(|code| CourseId::new(code.as_str()))
            .collect::<std::result::Result<Vec<_>, _>>()?,
    })
}

pub fn load_registry(path: &Path, catalog: &CourseCatalog) -> Result<MajorRequirementRegistry> {
    let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    parse_registry(&contents, path, catalog)
}

pub fn parse_registry(
    contents: &str,
    origin: &Path,
    catalog: &CourseCatalog,
) -> Result<MajorRequirementRegistry> {
    let file: MajorsFile = toml::from_str(contents).map_err(|e| CatalogError::Toml {
        path: origin.to_path_buf(),
        source: e,
    })?;
    check_header(&file.policy, MAJORS_SCHEMA, origin)?;

    let majors = file
        .majors
        .iter()
        .map(|entry| major_from_entry(entry, catalog))
        .collect::<Result<Vec<_>>>()?;
    let registry = MajorRequirementRegistry::new(majors, catalog)?;
    tracing::info!(
        origin = %origin.display(),
        majors = registry.len(),
        selectable = registry.selectable().count(),
        "loaded major requirements"
    );
    Ok(registry)
}

fn major_from_entry(entry: &MajorEntry, catalog: &CourseCatalog) -> Result<Major> {
    let code = MajorCode::new(entry.code.as_str())?;
    let context = format!("major {code}");
    let mut requirements = Vec::new();
    for (semester, list) in entry.semesters() {
        for token in parse_requirement_list(list)? {
            requirements.push(Requirement {
                semester,
                target: catalog.resolve_target(&token.name, &context)?,
                importance: token.importance,
            });
        }
    }
    Ok(Major {
        code,
        name: entry.name.clone(),
        concentration: entry.concentration.clone(),
        questions: entry.questions.clone(),
        tracks: entry.tracks.clone(),
        selectable: entry.selectable,
        requirements,
    })
}

fn check_header(header: &PolicyHeader, expected: &'static str, origin: &Path) -> Result<()> {
    if header.schema != expected || header.schema_version != SCHEMA_VERSION {
        return Err(CatalogError::UnsupportedSchema {
            path: PathBuf::from(origin),
            expected,
            version: SCHEMA_VERSION,
            found: format!("{} v{}", header.schema, header.schema_version),
        });
    }
    Ok(())
}
