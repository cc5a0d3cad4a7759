//! Display scores and risk badges derived from profile ratings.

use serde::Serialize;

use crate::knowledge::{CommunitySize, Maturity, TechnologyProfile};

/// Score used for labels outside the lookup tables.
pub const UNKNOWN_SCORE: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    LearningCurve,
    Scalability,
    Community,
    Performance,
}

impl Metric {
    /// Percentage for a raw rating label; unknown labels score 50.
    pub fn score_label(self, label: &str) -> u8 {
        match (self, label) {
            (Self::LearningCurve, "easy") => 90,
            (Self::LearningCurve, "medium") => 70,
            (Self::LearningCurve, "hard") => 40,
            (Self::Scalability | Self::Performance, "low") => 40,
            (Self::Scalability | Self::Performance, "medium") => 70,
            (Self::Scalability | Self::Performance, "high") => 90,
            (Self::Community, "small") => 40,
            (Self::Community, "medium") => 70,
            (Self::Community, "large") => 90,
            _ => UNKNOWN_SCORE,
        }
    }

    pub fn score(self, profile: &TechnologyProfile) -> u8 {
        let label = match self {
            Self::LearningCurve => profile.learning_curve.as_str(),
            Self::Scalability => profile.scalability.as_str(),
            Self::Community => profile.community.as_str(),
            Self::Performance => profile.performance.as_str(),
        };
        self.score_label(label)
    }
}

/// Percentage projection of a profile's ratings, for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StackMetrics {
    pub learning_curve: u8,
    pub scalability: u8,
    pub community: u8,
    pub performance: u8,
}

impl StackMetrics {
    pub fn of(profile: &TechnologyProfile) -> Self {
        Self {
            learning_curve: Metric::LearningCurve.score(profile),
            scalability: Metric::Scalability.score(profile),
            community: Metric::Community.score(profile),
            performance: Metric::Performance.score(profile),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn of(profile: &TechnologyProfile) -> Self {
        if profile.maturity == Maturity::Mature && profile.community == CommunitySize::Large {
            Self::Low
        } else if profile.maturity == Maturity::New || profile.community == CommunitySize::Small {
            Self::High
        } else {
            Self::Medium
        }
    }

    pub const fn badge(self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
        }
    }
}
