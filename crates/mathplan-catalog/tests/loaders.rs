use std::fs;
use std::path::PathBuf;

use mathplan_catalog::paths::{CATALOG_FILE, MAJORS_FILE};
use mathplan_catalog::{CatalogError, Policy, parse_catalog, parse_registry};

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "mathplan-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

const SMALL_CATALOG: &str = r#"
[policy]
schema = "mathplan.catalog"
schema_version = 1

[[courses]]
id = "M 117"
title = "College Algebra I"
gate = true

[[courses]]
id = "M 118"
title = "College Algebra II"
gate = true
prerequisites = [["M 117"]]
"#;

#[test]
fn builtin_policy_loads() {
    let policy = Policy::builtin().expect("builtin policy");
    assert!(!policy.catalog.is_empty());
    assert!(!policy.registry.is_empty());
    assert_eq!(policy.catalog.gates().count(), 7);
}

#[test]
fn policy_directory_matches_builtin() {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../policy");
    let on_disk = Policy::load(&root).expect("load policy directory");
    let builtin = Policy::builtin().unwrap();
    assert_eq!(on_disk.catalog.len(), builtin.catalog.len());
    assert_eq!(on_disk.registry.len(), builtin.registry.len());
}

#[test]
fn loads_from_custom_directory() {
    let dir = unique_temp_dir("policy");
    fs::write(dir.join(CATALOG_FILE), SMALL_CATALOG).unwrap();
    fs::write(
        dir.join(MAJORS_FILE),
        r#"
[policy]
schema = "mathplan.majors"
schema_version = 1

[[majors]]
code = "alg-bs"
name = "Algebra"
semester1 = "M 117!,M 118"
"#,
    )
    .unwrap();
    let policy = Policy::load(&dir).expect("load custom policy");
    assert_eq!(policy.catalog.len(), 2);
    let only = policy.registry.iter().next().unwrap();
    assert_eq!(only.code.as_str(), "ALG-BS");
    assert_eq!(only.requirements.len(), 2);
    fs::remove_dir_all(dir).ok();
}

#[test]
fn missing_directory_reports_io_error() {
    let dir = unique_temp_dir("empty");
    let err = Policy::load(&dir).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
    fs::remove_dir_all(dir).ok();
}

#[test]
fn wrong_schema_is_rejected() {
    let text = SMALL_CATALOG.replace("mathplan.catalog", "mathplan.other");
    let err = parse_catalog(&text, "test.toml".as_ref()).unwrap_err();
    assert!(matches!(err, CatalogError::UnsupportedSchema { .. }));
}

#[test]
fn unknown_requirement_token_fails_loading() {
    let catalog = parse_catalog(SMALL_CATALOG, "catalog.toml".as_ref()).unwrap();
    let majors = r#"
[policy]
schema = "mathplan.majors"
schema_version = 1

[[majors]]
code = "X-BS"
name = "X"
semester1 = "M 117,M 999"
"#;
    let err = parse_registry(majors, "majors.toml".as_ref(), &catalog).unwrap_err();
    assert!(matches!(err, CatalogError::MissingCatalogEntry { .. }));
}

#[test]
fn bad_toml_reports_path() {
    let err = parse_catalog("[policy", "broken.toml".as_ref()).unwrap_err();
    match err {
        CatalogError::Toml { path, .. } => assert_eq!(path, PathBuf::from("broken.toml")),
        other => panic!("unexpected error {other}"),
    }
}
