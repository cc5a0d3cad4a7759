//! Typo-tolerant token matching.
//!
//! Distances are normalized to `[0, 1]`; `0` is an exact or prefix match.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Default normalized edit-distance tolerance.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Tokens shorter than this only match exactly or as a prefix.
const MIN_FUZZY_LEN: usize = 3;

/// Filler words that carry no signal when the query has other tokens.
const STOPWORDS: &[&str] = &[
    "a", "about", "an", "and", "are", "best", "can", "do", "for", "how", "i", "in", "is", "it",
    "me", "my", "of", "on", "or", "should", "tell", "the", "to", "use", "vs", "what", "which",
    "with",
];

/// Lowercase and strip diacritics.
pub fn normalize(text: &str) -> String {
    text.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Split normalized text into alphanumeric words.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokenize a query, dropping filler words unless nothing else remains.
pub fn query_tokens(query: &str) -> Vec<String> {
    let tokens = tokenize(query);
    let meaningful: Vec<String> = tokens
        .iter()
        .filter(|t| !STOPWORDS.contains(&t.as_str()))
        .cloned()
        .collect();
    if meaningful.is_empty() { tokens } else { meaningful }
}

/// Normalized distance between a query token and one indexed word.
pub fn token_distance(token: &str, word: &str) -> f64 {
    if word.starts_with(token) {
        return 0.0;
    }
    let token_len = token.chars().count();
    if token_len < MIN_FUZZY_LEN {
        return 1.0;
    }
    if word.contains(token) {
        return 0.1;
    }
    let word_len = word.chars().count();
    let full = strsim::levenshtein(token, word) as f64 / token_len.max(word_len) as f64;
    if word_len > token_len && token_len > MIN_FUZZY_LEN {
        // Partial token with a typo: compare against the word's head.
        let head: String = word.chars().take(token_len).collect();
        let partial = strsim::levenshtein(token, &head) as f64 / token_len as f64;
        return full.min(partial);
    }
    full
}

/// Match quality of `tokens` against one tokenized text entry.
///
/// Each token contributes `1 - distance` when its best word is within
/// `threshold`; the sum is divided by the token count so that entries
/// matching more of the query score higher. Returns `0.0` on no match.
pub fn entry_quality(tokens: &[String], words: &[String], threshold: f64) -> f64 {
    if tokens.is_empty() || words.is_empty() {
        return 0.0;
    }
    let matched: f64 = tokens
        .iter()
        .filter_map(|token| {
            let best = words
                .iter()
                .map(|word| token_distance(token, word))
                .fold(f64::INFINITY, f64::min);
            (best <= threshold).then_some(1.0 - best)
        })
        .sum();
    matched / tokens.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        tokenize(text)
    }

    #[test]
    fn test_normalize_strips_accents_and_case() {
        assert_eq!(normalize("Café NODE"), "cafe node");
    }

    #[test]
    fn test_tokenize_splits_punctuation() {
        assert_eq!(tokenize("Node.js, full-stack!"), vec!["node", "js", "full", "stack"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_query_tokens_drop_stopwords() {
        assert_eq!(query_tokens("Tell me about React"), vec!["react"]);
        assert_eq!(query_tokens("what is"), vec!["what", "is"]);
    }

    #[test]
    fn test_prefix_is_exact() {
        assert_eq!(token_distance("reac", "react"), 0.0);
        assert_eq!(token_distance("react", "react"), 0.0);
    }

    #[test]
    fn test_single_typo_within_tolerance() {
        let d = token_distance("djngo", "django");
        assert!(d <= DEFAULT_THRESHOLD, "distance {d}");
        assert!(token_distance("postgrse", "postgresql") <= DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_unrelated_words_rejected() {
        assert!(token_distance("kubernetes", "react") > DEFAULT_THRESHOLD);
        assert_eq!(token_distance("go", "mongo"), 1.0);
    }

    #[test]
    fn test_entry_quality_partial_query() {
        let tokens = query_tokens("django kubernetes");
        let q = entry_quality(&tokens, &words("Django"), DEFAULT_THRESHOLD);
        assert!((q - 0.5).abs() < f64::EPSILON);
        assert_eq!(entry_quality(&tokens, &words("Express.js"), DEFAULT_THRESHOLD), 0.0);
    }
}
