//! Search-driven recommendations used for narrative reasoning.
//!
//! This path is independent of the cascade: it turns constraints into a
//! free-text query and lets the fuzzy index pick the top matches, so the
//! two lists can disagree.

use serde::Serialize;

use super::constraints::{Budget, Experience, ProjectConstraints, ScaleNeed, TeamSize, Timeline};
use crate::knowledge::TechnologyProfile;
use crate::search::SearchIndex;

pub const QUERY_RECOMMENDATION_LIMIT: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct QueryRecommendation {
    pub recommended: Vec<TechnologyProfile>,
    pub reasoning: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_recommendations: Option<String>,
}

/// Build the weighted search string and the matching reasoning lines.
pub fn constraint_query(constraints: &ProjectConstraints) -> (String, Vec<String>) {
    let mut query = String::new();
    let mut reasoning = Vec::new();

    if let Some(project_type) = constraints.project_type {
        query.push(' ');
        query.push_str(project_type.as_str());
        reasoning.push(format!("Considering {project_type} project requirements"));
    }
    if constraints.team_size == Some(TeamSize::Small) || constraints.timeline == Some(Timeline::Short)
    {
        query.push_str(" rapid development easy learning");
        reasoning.push("Prioritizing rapid development and ease of use".to_string());
    }
    if constraints.scalability == Some(ScaleNeed::High) {
        query.push_str(" scalable performance enterprise");
        reasoning.push("Focusing on high scalability requirements".to_string());
    }
    if constraints.experience == Some(Experience::Beginner) {
        query.push_str(" easy learning simple");
        reasoning.push("Selecting beginner-friendly technologies".to_string());
    }
    if constraints.budget == Some(Budget::Low) {
        reasoning.push("Considering cost-effective open-source solutions".to_string());
    }

    (query, reasoning)
}

/// Top matches for the constraint query, without AI narrative.
pub fn recommend_by_query(index: &SearchIndex, constraints: &ProjectConstraints) -> QueryRecommendation {
    let (query, reasoning) = constraint_query(constraints);
    let recommended = index
        .search(&query, QUERY_RECOMMENDATION_LIMIT)
        .into_iter()
        .cloned()
        .collect();
    QueryRecommendation {
        recommended,
        reasoning,
        ai_recommendations: None,
    }
}
