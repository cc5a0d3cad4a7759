//! Keyword rules used when no AI reply is available.

use crate::ai::NarrativeSource;
use crate::knowledge::TechnologyProfile;

use super::ChatReply;

pub const MAX_SUGGESTIONS: usize = 4;

const COMPARE_SUGGESTIONS: [&str; 3] = [
    "Compare learning curves",
    "Which has better performance?",
    "Show me use case differences",
];

const GENERIC_SUGGESTIONS: [&str; 3] = [
    "What's the best stack for my project?",
    "Compare React vs Vue",
    "Help me choose a database",
];

const GENERIC_REPLY: &str = "I'd be happy to help you with tech stack decisions! You can ask me about specific technologies, comparisons, or get recommendations based on your project needs.";

/// Follow-up questions derived from the message and its related stacks.
pub fn follow_up_suggestions(message: &str, related: &[&TechnologyProfile]) -> Vec<String> {
    let lower = message.to_lowercase();
    let mut suggestions = Vec::new();

    if let [first, second, ..] = related {
        suggestions.push(format!("Compare {} vs {}", first.name, second.name));
    }
    if let Some(first) = related.first() {
        suggestions.push(format!("What are the best practices for {}?", first.name));
        suggestions.push(format!("Show me real-world examples using {}", first.name));
    }
    if lower.contains("beginner") {
        suggestions.push("What should I learn first as a beginner?".to_string());
    }
    if lower.contains("scale") {
        suggestions.push("How do these technologies handle high traffic?".to_string());
    }
    suggestions.push("What are the current trends in web development?".to_string());

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

pub fn rule_based_reply(message: &str, related: &[&TechnologyProfile]) -> ChatReply {
    let lower = message.to_lowercase();
    let related_stacks: Vec<TechnologyProfile> = related.iter().map(|&s| s.clone()).collect();

    if lower.contains("compare") || lower.contains("vs") {
        let names: Vec<&str> = related.iter().map(|s| s.name.as_str()).collect();
        return ChatReply {
            content: format!(
                "I can help you compare these technologies. {} each have different strengths. Would you like me to dive deeper into specific aspects like performance, learning curve, or use cases?",
                names.join(", ")
            ),
            related_stacks,
            suggestions: to_strings(&COMPARE_SUGGESTIONS),
            source: NarrativeSource::Rules,
        };
    }

    if !related.is_empty() {
        let listing: Vec<String> = related
            .iter()
            .map(|s| format!("**{}** - {}", s.name, s.description))
            .collect();
        return ChatReply {
            content: format!(
                "I found some relevant technologies for your question: {}",
                listing.join("\n\n")
            ),
            related_stacks,
            suggestions: follow_up_suggestions(message, related),
            source: NarrativeSource::Rules,
        };
    }

    ChatReply {
        content: GENERIC_REPLY.to_string(),
        related_stacks,
        suggestions: to_strings(&GENERIC_SUGGESTIONS),
        source: NarrativeSource::Rules,
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;

    #[test]
    fn test_follow_ups_order_and_cap() {
        let kb = KnowledgeBase::builtin().unwrap();
        let related = kb.resolve(&["react", "nodejs"]);
        let suggestions = follow_up_suggestions("How do I scale as a beginner?", &related);
        assert_eq!(
            suggestions,
            vec![
                "Compare React vs Node.js",
                "What are the best practices for React?",
                "Show me real-world examples using React",
                "What should I learn first as a beginner?",
            ]
        );
    }

    #[test]
    fn test_follow_ups_without_related() {
        let suggestions = follow_up_suggestions("anything", &[]);
        assert_eq!(suggestions, vec!["What are the current trends in web development?"]);
    }

    #[test]
    fn test_compare_branch() {
        let kb = KnowledgeBase::builtin().unwrap();
        let related = kb.resolve(&["react", "django"]);
        let reply = rule_based_reply("React VS Django?", &related);
        assert!(reply.content.contains("React, Django each have different strengths."));
        assert_eq!(reply.suggestions, to_strings(&COMPARE_SUGGESTIONS));
        assert_eq!(reply.related_stacks.len(), 2);
    }

    #[test]
    fn test_found_branch_lists_descriptions() {
        let kb = KnowledgeBase::builtin().unwrap();
        let related = kb.resolve(&["firebase"]);
        let reply = rule_based_reply("realtime backend", &related);
        let firebase = kb.get("firebase").unwrap();
        assert_eq!(
            reply.content,
            format!(
                "I found some relevant technologies for your question: **Firebase** - {}",
                firebase.description
            )
        );
        assert_eq!(reply.suggestions[0], "What are the best practices for Firebase?");
    }

    #[test]
    fn test_generic_branch() {
        let reply = rule_based_reply("hmm", &[]);
        assert_eq!(reply.content, GENERIC_REPLY);
        assert!(reply.related_stacks.is_empty());
        assert_eq!(reply.suggestions.len(), 3);
    }
}
