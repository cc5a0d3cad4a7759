//! Technology profile records and their closed rating scales.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How hard a technology is to pick up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningCurve {
    Easy,
    Medium,
    Hard,
}

/// Three-step rating used for scalability and performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunitySize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Maturity {
    New,
    Stable,
    Mature,
}

impl LearningCurve {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl Rating {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl CommunitySize {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl Maturity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Stable => "stable",
            Self::Mature => "mature",
        }
    }
}

macro_rules! display_via_as_str {
    ($($ty:ty),+) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })+
    };
}

display_via_as_str!(LearningCurve, Rating, CommunitySize, Maturity);

/// One supported technology in the knowledge base.
///
/// List fields keep their authored order; presentation code truncates
/// them to "top N" entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TechnologyProfile {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub use_cases: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub learning_curve: LearningCurve,
    pub scalability: Rating,
    pub community: CommunitySize,
    pub maturity: Maturity,
    pub performance: Rating,
    pub ecosystem: Vec<String>,
    pub alternatives: Vec<String>,
    pub best_practices: Vec<String>,
    pub common_pitfalls: Vec<String>,
    pub real_world_examples: Vec<String>,
    pub tags: Vec<String>,
}
