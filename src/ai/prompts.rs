//! Prompt templates for the generative API.
//!
//! Every prompt names the stacks, states a word budget and lists the
//! numbered sections the answer should cover.

use std::fmt::Write as _;

use crate::chat::ChatTurn;
use crate::knowledge::TechnologyProfile;
use crate::recommend::ProjectConstraints;

/// Recent chat turns folded into a chat prompt.
pub const CHAT_HISTORY_TURNS: usize = 6;
/// Related stacks described in a chat prompt.
pub const CHAT_CONTEXT_STACKS: usize = 2;
const CHAT_DESCRIPTION_CHARS: usize = 80;
const CHAT_CONTEXT_PROS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    RiskAnalysis,
    RefereeInsight,
    StackInsights,
    ChatReply,
    ConstraintRecommendation,
}

impl PromptKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RiskAnalysis => "risk_analysis",
            Self::RefereeInsight => "referee_insight",
            Self::StackInsights => "stack_insights",
            Self::ChatReply => "chat_reply",
            Self::ConstraintRecommendation => "constraint_recommendation",
        }
    }

    pub const fn word_budget(self) -> &'static str {
        match self {
            Self::RiskAnalysis | Self::StackInsights => "120",
            Self::RefereeInsight | Self::ConstraintRecommendation => "140",
            Self::ChatReply => "80-100",
        }
    }

    /// Numbered answer outline as `(heading, hint)` pairs.
    pub const fn sections(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::RiskAnalysis => &[
                ("Critical Issues", "Major blockers or failures"),
                ("Moderate Concerns", "Common challenges"),
                ("Mitigation Strategies", "How to address risks"),
                ("Project-Specific Risks", "Context-based considerations"),
            ],
            Self::RefereeInsight => &[
                ("Reality Check", "Current market position and adoption"),
                ("When Each Wins", "Specific scenarios favoring each"),
                ("Key Trade-offs", "What you gain vs lose"),
                ("Decision Advice", "Neutral guidance for choosing"),
            ],
            Self::StackInsights => &[
                ("Integration Approach", "How they work together"),
                ("Key Differences", "What sets each apart"),
                ("Best Use Cases", "Ideal scenarios for each"),
                ("Implementation Tips", "Practical advice for developers"),
            ],
            Self::ChatReply => &[],
            Self::ConstraintRecommendation => &[
                ("Why Suitable", "Specific reasons for this project"),
                ("Architecture Fit", "How it matches requirements"),
                ("Scaling Approach", "Growth strategy"),
                ("Cost Factors", "Budget considerations"),
                ("Risk Mitigation", "How to minimize issues"),
            ],
        }
    }
}

/// A prompt ready to be rendered and sent.
#[derive(Debug, Clone, Copy)]
pub enum Prompt<'a> {
    RiskAnalysis {
        stacks: &'a [&'a TechnologyProfile],
        constraints: Option<&'a ProjectConstraints>,
    },
    RefereeInsight {
        stacks: &'a [&'a TechnologyProfile],
        constraints: Option<&'a ProjectConstraints>,
    },
    StackInsights {
        stacks: &'a [&'a TechnologyProfile],
    },
    ChatReply {
        message: &'a str,
        related: &'a [&'a TechnologyProfile],
        constraints: Option<&'a ProjectConstraints>,
        history: &'a [ChatTurn],
    },
    ConstraintRecommendation {
        constraints: &'a ProjectConstraints,
        recommended: &'a [&'a TechnologyProfile],
    },
}

impl Prompt<'_> {
    pub const fn kind(&self) -> PromptKind {
        match self {
            Self::RiskAnalysis { .. } => PromptKind::RiskAnalysis,
            Self::RefereeInsight { .. } => PromptKind::RefereeInsight,
            Self::StackInsights { .. } => PromptKind::StackInsights,
            Self::ChatReply { .. } => PromptKind::ChatReply,
            Self::ConstraintRecommendation { .. } => PromptKind::ConstraintRecommendation,
        }
    }

    pub fn render(&self) -> String {
        let kind = self.kind();
        let budget = kind.word_budget();
        let mut out = match *self {
            Self::RiskAnalysis { stacks, .. } => {
                format!("Analyze {} technical risks in {budget} words:", names(stacks, ", "))
            }
            Self::RefereeInsight { stacks, .. } => {
                format!("Compare {} in {budget} words:", names(stacks, " vs "))
            }
            Self::StackInsights { stacks } => format!(
                "Provide detailed analysis of {} in {budget} words:",
                names(stacks, ", ")
            ),
            Self::ChatReply {
                message,
                related,
                constraints,
                history,
            } => return render_chat(message, related, constraints, history),
            Self::ConstraintRecommendation {
                constraints,
                recommended,
            } => format!(
                "Recommend {} for {}{} in {budget} words covering:",
                names(recommended, ", "),
                constraints
                    .project_type
                    .map_or("project", |project_type| project_type.as_str()),
                recommendation_context(constraints),
            ),
        };

        for (number, (heading, hint)) in kind.sections().iter().enumerate() {
            let _ = write!(out, "\n{}. {heading}: {hint}", number + 1);
        }

        match *self {
            Self::RiskAnalysis {
                constraints: Some(constraints),
                ..
            }
            | Self::RefereeInsight {
                constraints: Some(constraints),
                ..
            } if !constraints.is_empty() => {
                let _ = write!(out, "\n\nProject context: {}", constraints.summary());
            }
            _ => {}
        }
        out
    }
}

fn names(stacks: &[&TechnologyProfile], separator: &str) -> String {
    stacks
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

fn recommendation_context(constraints: &ProjectConstraints) -> String {
    let mut context = String::new();
    if let Some(team) = constraints.team_size {
        let _ = write!(context, ", team size: {team}");
    }
    if let Some(timeline) = constraints.timeline {
        let _ = write!(context, ", timeline: {timeline}");
    }
    context
}

/// First `max` characters of `text`, on a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn render_chat(
    message: &str,
    related: &[&TechnologyProfile],
    constraints: Option<&ProjectConstraints>,
    history: &[ChatTurn],
) -> String {
    let context = related
        .iter()
        .take(CHAT_CONTEXT_STACKS)
        .map(|stack| {
            let pros: Vec<&str> = stack
                .pros
                .iter()
                .take(CHAT_CONTEXT_PROS)
                .map(String::as_str)
                .collect();
            format!(
                "{}: {}. Pros: {}",
                stack.name,
                truncate_chars(&stack.description, CHAT_DESCRIPTION_CHARS),
                pros.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut out = String::from("Context:\n");
    if context.is_empty() {
        out.push_str("General tech stack knowledge");
    } else {
        out.push_str(&context);
    }

    if let Some(constraints) = constraints.filter(|c| !c.is_empty()) {
        let _ = write!(out, "\n\nProject constraints: {}", constraints.summary());
    }

    let recent = &history[history.len().saturating_sub(CHAT_HISTORY_TURNS)..];
    if !recent.is_empty() {
        out.push_str("\n\nRecent conversation:");
        for turn in recent {
            let _ = write!(out, "\n{}: {}", turn.role.label(), turn.content.trim());
        }
    }

    let _ = write!(
        out,
        "\n\nQuestion: {message}\n\nProvide a helpful answer in {} words with specific details and actionable insights:",
        PromptKind::ChatReply.word_budget()
    );
    out
}
