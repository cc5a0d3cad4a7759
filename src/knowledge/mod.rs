//! The fixed technology knowledge base.
//!
//! Records ship as an embedded JSON document and are validated once, at
//! construction. After that the collection is read-only for the life of
//! the process.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{Result, StackError};

pub mod types;

pub use types::{CommunitySize, LearningCurve, Maturity, Rating, TechnologyProfile};

const BUILTIN_KNOWLEDGE_BASE: &str = include_str!("knowledge_base.json");

/// Immutable, insertion-ordered collection of technology profiles.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    profiles: Vec<TechnologyProfile>,
}

impl KnowledgeBase {
    /// Load the curated knowledge base bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_KNOWLEDGE_BASE)
    }

    /// Parse and validate a knowledge base document.
    ///
    /// Unknown rating labels, missing fields and duplicate or blank ids are
    /// rejected here so that no read site has to re-check them.
    pub fn from_json(raw: &str) -> Result<Self> {
        let profiles: Vec<TechnologyProfile> = serde_json::from_str(raw)
            .map_err(|err| StackError::KnowledgeBase(format!("parse: {err}")))?;
        Self::from_profiles(profiles)
    }

    pub fn from_profiles(profiles: Vec<TechnologyProfile>) -> Result<Self> {
        let mut seen = HashSet::new();
        for profile in &profiles {
            if profile.id.trim().is_empty() {
                return Err(StackError::KnowledgeBase(format!(
                    "profile {:?} has an empty id",
                    profile.name
                )));
            }
            if !seen.insert(profile.id.as_str()) {
                return Err(StackError::KnowledgeBase(format!(
                    "duplicate id {}",
                    profile.id
                )));
            }
        }
        debug!(target: "knowledge", count = profiles.len(), "knowledge base loaded");
        Ok(Self { profiles })
    }

    pub fn get(&self, id: &str) -> Option<&TechnologyProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn all(&self) -> &[TechnologyProfile] {
        &self.profiles
    }

    /// Profiles whose category contains `category`, case-insensitively.
    pub fn by_category(&self, category: &str) -> Vec<&TechnologyProfile> {
        let needle = category.to_lowercase();
        self.profiles
            .iter()
            .filter(|p| p.category.to_lowercase().contains(&needle))
            .collect()
    }

    /// Resolve ids in order, skipping unknown ids and repeats.
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&TechnologyProfile> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for id in ids {
            let id: &str = id.as_ref();
            if !seen.insert(id) {
                continue;
            }
            if let Some(profile) = self.get(id) {
                out.push(profile);
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
