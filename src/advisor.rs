//! Public facade tying the knowledge base, search, recommendation,
//! comparison, chat and optional AI layers together.
//!
//! Every narrative operation has a deterministic answer. When the AI layer
//! is configured its text is attached; when it is absent or a call fails
//! the failure is logged and the deterministic answer stands alone.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::ai::{AiService, NarrativeSource, Prompt};
use crate::chat::{self, ChatReply, ChatTurn};
use crate::compare::{self, ComparisonResult, Metric, NarrativeMode, RiskLevel};
use crate::error::{Result, StackError};
use crate::knowledge::{KnowledgeBase, Maturity, TechnologyProfile};
use crate::recommend::{self, ProjectConstraints, QueryRecommendation};
use crate::search::SearchIndex;

/// Pitfalls quoted per stack in a deterministic risk report.
pub const RISK_PITFALLS: usize = 2;

/// Standing advice attached to every deterministic risk report.
pub const TEAM_KNOWLEDGE_GAP: &str = "Team Knowledge Gap: choosing a stack your team doesn't know well means 3-6 months of reduced productivity. The \"best\" stack that nobody understands is worse than a \"good enough\" stack with existing expertise.";

#[derive(Debug, Clone, Serialize)]
pub struct RiskNote {
    pub id: String,
    pub name: String,
    pub level: RiskLevel,
    pub pitfalls: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskReport {
    pub stacks: Vec<String>,
    pub source: NarrativeSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<RiskNote>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub advice: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefereeReport {
    pub stacks: Vec<String>,
    pub source: NarrativeSource,
    pub verdict: String,
}

pub struct Advisor {
    kb: Arc<KnowledgeBase>,
    index: SearchIndex,
    ai: Option<AiService>,
}

impl Advisor {
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        let index = SearchIndex::build(Arc::clone(&kb));
        Self { kb, index, ai: None }
    }

    /// Advisor over the bundled knowledge base, without AI.
    pub fn builtin() -> Result<Self> {
        Ok(Self::new(Arc::new(KnowledgeBase::builtin()?)))
    }

    /// Rebuild the search index with a different match tolerance.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.index = SearchIndex::with_threshold(Arc::clone(&self.kb), threshold);
        self
    }

    #[must_use]
    pub fn with_ai(mut self, ai: AiService) -> Self {
        self.ai = Some(ai);
        self
    }

    pub const fn ai(&self) -> Option<&AiService> {
        self.ai.as_ref()
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub const fn index(&self) -> &SearchIndex {
        &self.index
    }

    // ---- lookup -------------------------------------------------------

    pub fn search_technologies(&self, query: &str, limit: usize) -> Vec<TechnologyProfile> {
        self.index.search(query, limit).into_iter().cloned().collect()
    }

    pub fn get_technology(&self, id: &str) -> Option<&TechnologyProfile> {
        self.kb.get(id)
    }

    pub fn list_technologies(&self) -> &[TechnologyProfile] {
        self.kb.all()
    }

    pub fn technologies_by_category(&self, category: &str) -> Vec<&TechnologyProfile> {
        self.kb.by_category(category)
    }

    // ---- recommendation -----------------------------------------------

    pub fn recommend_for_constraints(&self, constraints: Option<&ProjectConstraints>) -> Vec<String> {
        recommend::recommend_for_constraints(constraints)
    }

    /// Search-driven recommendation, with an AI narrative when available.
    pub fn recommend_by_query(&self, constraints: &ProjectConstraints) -> QueryRecommendation {
        let mut result = recommend::recommend_by_query(&self.index, constraints);
        if result.recommended.is_empty() || !self.is_ai_available() {
            return result;
        }
        let recommended: Vec<&TechnologyProfile> = result.recommended.iter().collect();
        match self.generate(&Prompt::ConstraintRecommendation {
            constraints,
            recommended: &recommended,
        }) {
            Ok(text) => result.ai_recommendations = Some(text),
            Err(err) => warn!(target: "advisor", error = %err, "AI recommendations unavailable"),
        }
        result
    }

    // ---- comparison ---------------------------------------------------

    pub fn compare_technologies<S: AsRef<str>>(&self, ids: &[S]) -> ComparisonResult {
        compare::compare_technologies(&self.kb, ids, NarrativeMode::Static)
    }

    /// Comparison with an AI insight attached when one can be produced.
    pub fn compare_with_insights<S: AsRef<str>>(&self, ids: &[S]) -> ComparisonResult {
        let stacks = self.kb.resolve(ids);
        if stacks.is_empty() || !self.is_ai_available() {
            return self.compare_technologies(ids);
        }
        match self.generate(&Prompt::StackInsights { stacks: &stacks }) {
            Ok(text) => {
                let mut result = compare::compare_technologies(&self.kb, ids, NarrativeMode::Augmented);
                result.ai_insights = Some(text);
                result
            }
            Err(err) => {
                warn!(target: "advisor", error = %err, "AI insights unavailable; static comparison");
                self.compare_technologies(ids)
            }
        }
    }

    // ---- AI -----------------------------------------------------------

    pub fn configure_ai(&self, credential: &str) -> bool {
        match &self.ai {
            Some(ai) => ai.configure(credential),
            None => {
                warn!(target: "advisor", "AI augmentation is disabled; not configuring");
                false
            }
        }
    }

    pub fn reset_ai(&self) {
        if let Some(ai) = &self.ai {
            ai.reset();
        }
    }

    pub fn is_ai_available(&self) -> bool {
        self.ai.as_ref().is_some_and(AiService::is_available)
    }

    pub fn generate_chat_reply(
        &self,
        message: &str,
        constraints: Option<&ProjectConstraints>,
        history: &[ChatTurn],
    ) -> ChatReply {
        chat::generate_reply(&self.index, self.ai.as_ref(), message, constraints, history)
    }

    pub fn generate_risk_analysis<S: AsRef<str>>(
        &self,
        ids: &[S],
        constraints: Option<&ProjectConstraints>,
    ) -> Result<String> {
        self.ensure_ai()?;
        let stacks = self.require_stacks(ids)?;
        self.generate(&Prompt::RiskAnalysis {
            stacks: &stacks,
            constraints,
        })
    }

    pub fn generate_referee_insight<S: AsRef<str>>(
        &self,
        ids: &[S],
        constraints: Option<&ProjectConstraints>,
    ) -> Result<String> {
        self.ensure_ai()?;
        let stacks = self.require_stacks(ids)?;
        self.generate(&Prompt::RefereeInsight {
            stacks: &stacks,
            constraints,
        })
    }

    pub fn generate_ai_insights<S: AsRef<str>>(&self, ids: &[S]) -> Result<String> {
        self.ensure_ai()?;
        let stacks = self.require_stacks(ids)?;
        self.generate(&Prompt::StackInsights { stacks: &stacks })
    }

    pub fn generate_ai_recommendations<S: AsRef<str>>(
        &self,
        constraints: &ProjectConstraints,
        recommended: &[S],
    ) -> Result<String> {
        self.ensure_ai()?;
        let stacks = self.require_stacks(recommended)?;
        self.generate(&Prompt::ConstraintRecommendation {
            constraints,
            recommended: &stacks,
        })
    }

    // ---- composed narratives ------------------------------------------

    /// AI risk analysis, or per-stack risk notes when AI is unavailable.
    pub fn assess_risks<S: AsRef<str>>(
        &self,
        ids: &[S],
        constraints: Option<&ProjectConstraints>,
    ) -> Result<RiskReport> {
        let stacks = self.require_stacks(ids)?;
        let stack_ids = stacks.iter().map(|s| s.id.clone()).collect();

        if self.is_ai_available() {
            match self.generate(&Prompt::RiskAnalysis {
                stacks: &stacks,
                constraints,
            }) {
                Ok(text) => {
                    return Ok(RiskReport {
                        stacks: stack_ids,
                        source: NarrativeSource::Ai,
                        analysis: Some(text),
                        notes: Vec::new(),
                        advice: Vec::new(),
                    });
                }
                Err(err) => warn!(target: "advisor", error = %err, "AI risk analysis failed; static risks"),
            }
        }

        Ok(RiskReport {
            stacks: stack_ids,
            source: NarrativeSource::Rules,
            analysis: None,
            notes: stacks.iter().map(|s| risk_note(s)).collect(),
            advice: vec![TEAM_KNOWLEDGE_GAP.to_string()],
        })
    }

    /// AI referee insight, or a neutral deterministic verdict.
    pub fn referee<S: AsRef<str>>(
        &self,
        ids: &[S],
        constraints: Option<&ProjectConstraints>,
    ) -> Result<RefereeReport> {
        let stacks = self.require_stacks(ids)?;
        let stack_ids = stacks.iter().map(|s| s.id.clone()).collect();

        if self.is_ai_available() {
            match self.generate(&Prompt::RefereeInsight {
                stacks: &stacks,
                constraints,
            }) {
                Ok(text) => {
                    return Ok(RefereeReport {
                        stacks: stack_ids,
                        source: NarrativeSource::Ai,
                        verdict: text,
                    });
                }
                Err(err) => warn!(target: "advisor", error = %err, "AI referee insight failed; static verdict"),
            }
        }

        Ok(RefereeReport {
            stacks: stack_ids,
            source: NarrativeSource::Rules,
            verdict: neutral_verdict(&stacks, constraints),
        })
    }

    fn ensure_ai(&self) -> Result<()> {
        if self.is_ai_available() {
            Ok(())
        } else {
            Err(StackError::AiUnavailable(
                "AI augmentation is not configured".to_string(),
            ))
        }
    }

    fn generate(&self, prompt: &Prompt<'_>) -> Result<String> {
        let ai = self.ai.as_ref().ok_or_else(|| {
            StackError::AiUnavailable("AI augmentation is disabled".to_string())
        })?;
        ai.generate(prompt)
    }

    fn require_stacks<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<&TechnologyProfile>> {
        let stacks = self.kb.resolve(ids);
        if stacks.is_empty() {
            let requested: Vec<&str> = ids.iter().map(AsRef::as_ref).collect();
            return Err(StackError::NotFound(if requested.is_empty() {
                "no technologies selected".to_string()
            } else {
                requested.join(", ")
            }));
        }
        debug!(target: "advisor", selected = stacks.len(), "resolved selection");
        Ok(stacks)
    }
}

fn risk_note(stack: &TechnologyProfile) -> RiskNote {
    RiskNote {
        id: stack.id.clone(),
        name: stack.name.clone(),
        level: RiskLevel::of(stack),
        pitfalls: stack
            .common_pitfalls
            .iter()
            .take(RISK_PITFALLS)
            .cloned()
            .collect(),
    }
}

/// Names of the stacks sharing the best `metric` score.
fn leaders<'a>(stacks: &[&'a TechnologyProfile], metric: Metric) -> Vec<&'a str> {
    let Some(best) = stacks.iter().map(|s| metric.score(s)).max() else {
        return Vec::new();
    };
    stacks
        .iter()
        .filter(|s| metric.score(s) == best)
        .map(|s| s.name.as_str())
        .collect()
}

fn neutral_verdict(stacks: &[&TechnologyProfile], constraints: Option<&ProjectConstraints>) -> String {
    let mut paragraphs = vec![
        "It depends on your priorities: each stack excels in different scenarios, and the best choice depends on what you value most."
            .to_string(),
    ];

    let approachable = leaders(stacks, Metric::LearningCurve);
    if !approachable.is_empty() {
        paragraphs.push(format!(
            "If speed-to-market is your priority: {} offers the most approachable learning curve here.",
            approachable.join(" or ")
        ));
    }

    let scalable = leaders(stacks, Metric::Scalability);
    if !scalable.is_empty() {
        paragraphs.push(format!(
            "If you need predictable scaling: {} rates highest on scalability.",
            scalable.join(" or ")
        ));
    }

    let mature: Vec<&str> = stacks
        .iter()
        .filter(|s| s.maturity == Maturity::Mature)
        .map(|s| s.name.as_str())
        .collect();
    if !mature.is_empty() {
        paragraphs.push(format!(
            "If stability and structure matter most: {} {} the most battle-tested.",
            mature.join(" and "),
            if mature.len() == 1 { "is" } else { "are" }
        ));
    }

    if let Some(constraints) = constraints {
        let familiar: Vec<&str> = stacks
            .iter()
            .filter(|s| {
                constraints.knows(&s.id)
                    || constraints.knows(&s.name)
                    || s.tags.iter().any(|t| constraints.knows(t))
            })
            .map(|s| s.name.as_str())
            .collect();
        if !familiar.is_empty() {
            paragraphs.push(format!(
                "Your team already knows {}; existing expertise often outweighs small technical advantages.",
                familiar.join(" and ")
            ));
        }
    }

    paragraphs.join("\n\n")
}
