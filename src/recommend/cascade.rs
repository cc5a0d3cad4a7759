//! Deterministic constraint-to-shortlist cascade.

use tracing::debug;

use super::constraints::{
    Budget, Experience, ProjectConstraints, ProjectType, ScaleNeed, Timeline,
};

/// Shortlist returned when no constraints are supplied.
pub const DEFAULT_SHORTLIST: [&str; 3] = ["react", "nodejs", "mongodb"];

/// Backfill order used to top up short lists.
pub const BACKFILL_PRIORITY: [&str; 7] = [
    "react",
    "nodejs",
    "mongodb",
    "express",
    "postgresql",
    "django",
    "firebase",
];

pub const MIN_SHORTLIST: usize = 3;
pub const MAX_SHORTLIST: usize = 4;

/// Ordered, duplicate-free accumulator.
#[derive(Debug, Default)]
struct Shortlist(Vec<&'static str>);

impl Shortlist {
    fn push(&mut self, id: &'static str) {
        if !self.0.contains(&id) {
            self.0.push(id);
        }
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

/// Map constraints to 3-4 technology ids.
///
/// Rules run in a fixed order (frontend, backend, database) and each may
/// append ids; lists shorter than three are then topped up from
/// [`BACKFILL_PRIORITY`]. The output is a pure function of the input.
pub fn recommend_for_constraints(constraints: Option<&ProjectConstraints>) -> Vec<String> {
    let Some(c) = constraints else {
        return DEFAULT_SHORTLIST.iter().map(|id| (*id).to_string()).collect();
    };

    let mut list = Shortlist::default();
    frontend_rule(c, &mut list);
    backend_rule(c, &mut list);
    database_rule(c, &mut list);

    for id in BACKFILL_PRIORITY {
        if list.len() >= MIN_SHORTLIST {
            break;
        }
        list.push(id);
    }

    list.0.truncate(MAX_SHORTLIST);
    debug!(target: "recommend", shortlist = ?list.0, "cascade complete");
    list.0.into_iter().map(str::to_string).collect()
}

fn frontend_rule(c: &ProjectConstraints, list: &mut Shortlist) {
    if matches!(
        c.project_type,
        Some(ProjectType::WebApp | ProjectType::FullStack | ProjectType::Mobile)
    ) {
        list.push("react");
    }
}

fn backend_rule(c: &ProjectConstraints, list: &mut Shortlist) {
    if !matches!(
        c.project_type,
        Some(ProjectType::Api | ProjectType::FullStack | ProjectType::Mobile)
    ) {
        return;
    }
    if c.knows_any(&["javascript", "typescript", "react"]) {
        list.push("nodejs");
        if c.scalability != Some(ScaleNeed::High) {
            list.push("express");
        }
    } else if c.knows("python") {
        list.push("django");
    } else if c.experience == Some(Experience::Beginner) {
        list.push("nodejs");
        list.push("express");
    } else {
        list.push("nodejs");
    }
}

fn database_rule(c: &ProjectConstraints, list: &mut Shortlist) {
    let id = if c.scalability == Some(ScaleNeed::High) && c.budget != Some(Budget::High) {
        "postgresql"
    } else if c.experience == Some(Experience::Beginner) || c.timeline == Some(Timeline::Short) {
        "firebase"
    } else if c.project_type == Some(ProjectType::Mobile) || c.scalability == Some(ScaleNeed::Medium)
    {
        "mongodb"
    } else {
        "postgresql"
    };
    list.push(id);
}
