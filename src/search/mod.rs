//! Weighted fuzzy search over the knowledge base.
//!
//! Each profile is tokenized once at build time. A query scores every
//! record as the weighted sum of per-field match qualities; list fields
//! use their best-matching element.

use std::sync::Arc;

use tracing::debug;

use crate::knowledge::{KnowledgeBase, TechnologyProfile};

pub mod fuzzy;

pub use fuzzy::DEFAULT_THRESHOLD;

/// Indexed fields and their relevance weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Description,
    UseCases,
    Tags,
    Pros,
    Cons,
}

impl Field {
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Description,
        Self::UseCases,
        Self::Tags,
        Self::Pros,
        Self::Cons,
    ];

    pub const fn weight(self) -> f64 {
        match self {
            Self::Name => 0.30,
            Self::Description => 0.20,
            Self::UseCases | Self::Tags => 0.15,
            Self::Pros | Self::Cons => 0.10,
        }
    }

    fn entries(self, profile: &TechnologyProfile) -> Vec<&str> {
        match self {
            Self::Name => vec![profile.name.as_str()],
            Self::Description => vec![profile.description.as_str()],
            Self::UseCases => profile.use_cases.iter().map(String::as_str).collect(),
            Self::Tags => profile.tags.iter().map(String::as_str).collect(),
            Self::Pros => profile.pros.iter().map(String::as_str).collect(),
            Self::Cons => profile.cons.iter().map(String::as_str).collect(),
        }
    }
}

/// A search result with its relevance score (higher is better).
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch<'a> {
    pub profile: &'a TechnologyProfile,
    pub score: f64,
}

struct IndexedField {
    field: Field,
    /// One tokenized word list per entry.
    entries: Vec<Vec<String>>,
}

struct IndexedRecord {
    position: usize,
    fields: Vec<IndexedField>,
}

/// Immutable search index built from the knowledge base.
pub struct SearchIndex {
    kb: Arc<KnowledgeBase>,
    records: Vec<IndexedRecord>,
    threshold: f64,
}

impl SearchIndex {
    pub fn build(kb: Arc<KnowledgeBase>) -> Self {
        Self::with_threshold(kb, DEFAULT_THRESHOLD)
    }

    /// Build with a custom tolerance, clamped to `[0, 1]`.
    pub fn with_threshold(kb: Arc<KnowledgeBase>, threshold: f64) -> Self {
        let records = kb
            .all()
            .iter()
            .enumerate()
            .map(|(position, profile)| IndexedRecord {
                position,
                fields: Field::ALL
                    .iter()
                    .map(|&field| IndexedField {
                        field,
                        entries: field.entries(profile).into_iter().map(fuzzy::tokenize).collect(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            kb,
            records,
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Top `limit` profiles for `query`, best first.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&TechnologyProfile> {
        self.search_scored(query, limit)
            .into_iter()
            .map(|m| m.profile)
            .collect()
    }

    /// Like [`search`](Self::search) but keeps relevance scores.
    ///
    /// Ties keep knowledge base order. Blank queries match nothing.
    pub fn search_scored(&self, query: &str, limit: usize) -> Vec<ScoredMatch<'_>> {
        let tokens = fuzzy::query_tokens(query);
        if tokens.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f64)> = self
            .records
            .iter()
            .filter_map(|record| {
                let score = self.score_record(record, &tokens);
                (score > 0.0).then_some((record.position, score))
            })
            .collect();
        // Stable sort keeps insertion order among equal scores.
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(limit);

        debug!(target: "search", query, hits = scored.len(), "fuzzy search");

        let profiles = self.kb.all();
        scored
            .into_iter()
            .map(|(position, score)| ScoredMatch {
                profile: &profiles[position],
                score,
            })
            .collect()
    }

    fn score_record(&self, record: &IndexedRecord, tokens: &[String]) -> f64 {
        record
            .fields
            .iter()
            .map(|indexed| {
                let best = indexed
                    .entries
                    .iter()
                    .map(|words| fuzzy::entry_quality(tokens, words, self.threshold))
                    .fold(0.0, f64::max);
                indexed.field.weight() * best
            })
            .sum()
    }
}
