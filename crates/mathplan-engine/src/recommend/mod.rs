//! Next-step recommendation from missing placement gates.

mod coverage;
mod resolver;
mod table;

pub use coverage::{reachable_missing_sets, validate_table};
pub use resolver::{GroupCredits, Recommendation, RecommendationResolver, missing_courses};
pub use table::DecisionTable;
