//! Conversational replies grounded in the knowledge base.
//!
//! A reply always starts from a fuzzy search over the message. When the AI
//! layer is ready the related stacks become prompt context; otherwise, or
//! when the call fails, a keyword rule picks a canned answer.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ai::{AiService, NarrativeSource, Prompt};
use crate::knowledge::TechnologyProfile;
use crate::recommend::ProjectConstraints;
use crate::search::SearchIndex;

pub mod rules;

pub use rules::{MAX_SUGGESTIONS, follow_up_suggestions, rule_based_reply};

/// Related stacks looked up for each message.
pub const RELATED_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

/// One prior message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub content: String,
    pub related_stacks: Vec<TechnologyProfile>,
    pub suggestions: Vec<String>,
    pub source: NarrativeSource,
}

/// Compose a reply to `message`.
pub fn generate_reply(
    index: &SearchIndex,
    ai: Option<&AiService>,
    message: &str,
    constraints: Option<&ProjectConstraints>,
    history: &[ChatTurn],
) -> ChatReply {
    let related = index.search(message, RELATED_LIMIT);
    debug!(target: "chat", related = related.len(), "chat lookup");

    if let Some(ai) = ai.filter(|ai| ai.is_available()) {
        let prompt = Prompt::ChatReply {
            message,
            related: &related,
            constraints,
            history,
        };
        match ai.generate(&prompt) {
            Ok(content) => {
                return ChatReply {
                    content,
                    suggestions: follow_up_suggestions(message, &related),
                    related_stacks: related.into_iter().cloned().collect(),
                    source: NarrativeSource::Ai,
                };
            }
            Err(err) => {
                warn!(target: "chat", error = %err, "AI chat reply failed; using rule-based reply");
            }
        }
    }

    rule_based_reply(message, &related)
}
