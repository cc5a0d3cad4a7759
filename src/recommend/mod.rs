//! Constraint-based recommendations.
//!
//! Two independent paths:
//! - [`cascade`]: ordered heuristic rules producing a 3-4 id shortlist.
//! - [`query`]: constraints rendered as a search query over the index,
//!   used for narrative reasoning.

pub mod cascade;
pub mod constraints;
pub mod query;

pub use cascade::{BACKFILL_PRIORITY, DEFAULT_SHORTLIST, recommend_for_constraints};
pub use constraints::{
    Budget, Experience, ProjectConstraints, ProjectType, ScaleNeed, TeamSize, Timeline,
};
pub use query::{QueryRecommendation, constraint_query, recommend_by_query};
