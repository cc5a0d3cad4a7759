use std::sync::Arc;

use proptest::prelude::*;

use stackref::compare::{NarrativeMode, compare_technologies};
use stackref::knowledge::KnowledgeBase;
use stackref::search::SearchIndex;

const IDS: [&str; 8] = [
    "react", "nodejs", "mongodb", "express", "django", "firebase", "postgresql", "rails",
];

proptest! {
    #[test]
    fn test_search_is_deterministic(query in "[a-zA-Z ]{0,24}", limit in 0usize..8usize) {
        let index = SearchIndex::build(Arc::new(KnowledgeBase::builtin().unwrap()));
        let first: Vec<String> = index.search(&query, limit).iter().map(|p| p.id.clone()).collect();
        let second: Vec<String> = index.search(&query, limit).iter().map(|p| p.id.clone()).collect();
        prop_assert!(first.len() <= limit);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_whitespace_queries_match_nothing(query in "[ \t\n]{0,8}") {
        let index = SearchIndex::build(Arc::new(KnowledgeBase::builtin().unwrap()));
        prop_assert!(index.search(&query, 5).is_empty());
    }

    #[test]
    fn test_scores_are_sorted(query in "[a-z]{3,10}( [a-z]{3,10})?") {
        let index = SearchIndex::build(Arc::new(KnowledgeBase::builtin().unwrap()));
        let scored = index.search_scored(&query, 7);
        for pair in scored.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_comparison_covers_each_known_id(
        picks in proptest::collection::vec(proptest::sample::select(IDS.to_vec()), 0..6)
    ) {
        let kb = KnowledgeBase::builtin().unwrap();
        let result = compare_technologies(&kb, &picks, NarrativeMode::Static);
        for id in &picks {
            prop_assert_eq!(result.strengths.contains_key(*id), kb.contains(id));
            prop_assert_eq!(result.metrics.contains_key(*id), kb.contains(id));
        }
        prop_assert_eq!(result.stacks.len(), result.risk.len());
    }
}
