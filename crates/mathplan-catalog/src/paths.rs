//! Policy directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the policy directory.
pub const POLICY_ENV_VAR: &str = "MATHPLAN_POLICY_DIR";

pub const CATALOG_FILE: &str = "catalog.toml";
pub const MAJORS_FILE: &str = "majors.toml";

/// Get the policy root directory.
///
/// Resolution order:
/// 1. `MATHPLAN_POLICY_DIR` environment variable
/// 2. `policy/` directory relative to workspace root
pub fn policy_root() -> PathBuf {
    if let Ok(root) = std::env::var(POLICY_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../policy")
}

pub fn catalog_path() -> PathBuf {
    policy_root().join(CATALOG_FILE)
}

pub fn majors_path() -> PathBuf {
    policy_root().join(MAJORS_FILE)
}
