#![deny(unsafe_code)]

pub mod catalog;
pub mod equivalency;
pub mod error;
pub mod loaders;
pub mod manifest;
pub mod notation;
pub mod paths;
pub mod registry;

pub use crate::catalog::CourseCatalog;
pub use crate::equivalency::{Equivalency, EquivalencyMatch, EquivalencyTable};
pub use crate::error::{CatalogError, Result};
pub use crate::loaders::{Policy, load_catalog, load_registry, parse_catalog, parse_registry};
pub use crate::registry::MajorRequirementRegistry;
