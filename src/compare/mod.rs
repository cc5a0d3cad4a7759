//! Side-by-side comparison of selected technologies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::knowledge::{CommunitySize, KnowledgeBase, LearningCurve, Maturity, Rating, TechnologyProfile};

pub mod metrics;

pub use metrics::{Metric, RiskLevel, StackMetrics, UNKNOWN_SCORE};

/// Which narrative set to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeMode {
    /// Deterministic output shown without AI insight; adds the maturity line.
    Static,
    /// Output that will carry an AI insight alongside it.
    Augmented,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ComparisonResult {
    /// Resolved profiles in request order.
    pub stacks: Vec<TechnologyProfile>,
    pub strengths: BTreeMap<String, Vec<String>>,
    pub weaknesses: BTreeMap<String, Vec<String>>,
    pub best_for: BTreeMap<String, Vec<String>>,
    pub metrics: BTreeMap<String, StackMetrics>,
    pub risk: BTreeMap<String, RiskLevel>,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<String>,
}

impl ComparisonResult {
    pub fn ids(&self) -> Vec<&str> {
        self.stacks.iter().map(|s| s.id.as_str()).collect()
    }
}

/// Compare `ids`; unknown ids are skipped and repeats collapse.
pub fn compare_technologies<S: AsRef<str>>(
    kb: &KnowledgeBase,
    ids: &[S],
    mode: NarrativeMode,
) -> ComparisonResult {
    let stacks = kb.resolve(ids);
    let mut result = ComparisonResult {
        recommendations: recommendation_sentences(&stacks, mode),
        ..Default::default()
    };
    for stack in stacks {
        result.strengths.insert(stack.id.clone(), stack.pros.clone());
        result.weaknesses.insert(stack.id.clone(), stack.cons.clone());
        result.best_for.insert(stack.id.clone(), stack.use_cases.clone());
        result.metrics.insert(stack.id.clone(), StackMetrics::of(stack));
        result.risk.insert(stack.id.clone(), RiskLevel::of(stack));
        result.stacks.push(stack.clone());
    }
    result
}

/// Narrative sentences, each emitted only when some stack qualifies.
pub fn recommendation_sentences(stacks: &[&TechnologyProfile], mode: NarrativeMode) -> Vec<String> {
    let mut sentences = Vec::new();

    if let Some(easiest) = stacks.iter().find(|s| s.learning_curve == LearningCurve::Easy) {
        sentences.push(format!(
            "For beginners, {} offers the gentlest learning curve.",
            easiest.name
        ));
    }

    let scalable = names_where(stacks, |s| s.scalability == Rating::High);
    if !scalable.is_empty() {
        sentences.push(format!(
            "For high-scale applications, consider {}.",
            scalable.join(" or ")
        ));
    }

    let supported = names_where(stacks, |s| s.community == CommunitySize::Large);
    if !supported.is_empty() {
        sentences.push(format!(
            "{} have the strongest community support.",
            supported.join(" and ")
        ));
    }

    if mode == NarrativeMode::Static {
        let mature = names_where(stacks, |s| s.maturity == Maturity::Mature);
        if !mature.is_empty() {
            sentences.push(format!(
                "For production-ready applications, {} are battle-tested choices.",
                mature.join(" and ")
            ));
        }
    }

    sentences
}

fn names_where<'a>(
    stacks: &[&'a TechnologyProfile],
    predicate: impl Fn(&TechnologyProfile) -> bool,
) -> Vec<&'a str> {
    stacks
        .iter()
        .filter(|s| predicate(s))
        .map(|s| s.name.as_str())
        .collect()
}
