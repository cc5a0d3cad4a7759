use std::collections::HashSet;

use proptest::prelude::*;

use stackref::knowledge::KnowledgeBase;
use stackref::recommend::{
    Budget, Experience, ProjectConstraints, ProjectType, ScaleNeed, TeamSize, Timeline,
    recommend_for_constraints,
};

fn pick<T: Copy + std::fmt::Debug + 'static>(all: &'static [T]) -> impl Strategy<Value = Option<T>> {
    proptest::option::of(proptest::sample::select(all))
}

fn constraints() -> impl Strategy<Value = ProjectConstraints> {
    let known = proptest::collection::vec(
        proptest::sample::select(vec![
            "javascript", "TypeScript", "react", "python", "go", "rust", "java",
        ]),
        0..4,
    );
    (
        pick(ProjectType::ALL),
        pick(TeamSize::ALL),
        pick(Timeline::ALL),
        pick(ScaleNeed::ALL),
        pick(Budget::ALL),
        pick(Experience::ALL),
        known,
    )
        .prop_map(
            |(project_type, team_size, timeline, scalability, budget, experience, known)| {
                ProjectConstraints {
                    project_type,
                    team_size,
                    timeline,
                    scalability,
                    budget,
                    experience,
                    technologies: known.into_iter().map(str::to_string).collect(),
                }
            },
        )
}

proptest! {
    #[test]
    fn test_shortlist_has_three_or_four_unique_known_ids(c in constraints()) {
        let kb = KnowledgeBase::builtin().unwrap();
        let shortlist = recommend_for_constraints(Some(&c));
        prop_assert!((3..=4).contains(&shortlist.len()), "{:?}", shortlist);
        let unique: HashSet<&String> = shortlist.iter().collect();
        prop_assert_eq!(unique.len(), shortlist.len());
        for id in &shortlist {
            prop_assert!(kb.contains(id), "unknown id {}", id);
        }
    }

    #[test]
    fn test_shortlist_is_deterministic(c in constraints()) {
        prop_assert_eq!(
            recommend_for_constraints(Some(&c)),
            recommend_for_constraints(Some(&c))
        );
    }

    #[test]
    fn test_frontend_rule_puts_react_first(c in constraints()) {
        let shortlist = recommend_for_constraints(Some(&c));
        if matches!(
            c.project_type,
            Some(ProjectType::WebApp | ProjectType::FullStack | ProjectType::Mobile)
        ) {
            prop_assert_eq!(shortlist[0].as_str(), "react");
        }
    }
}
