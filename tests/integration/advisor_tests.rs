use std::sync::Arc;

use stackref::StackError;
use stackref::advisor::Advisor;
use stackref::ai::{AiService, AiState, CredentialStore, MemoryCredentialStore, NarrativeSource};
use stackref::chat::ChatTurn;
use stackref::recommend::{Experience, ProjectConstraints, ProjectType, ScaleNeed};
use stackref::test_utils::ScriptedClient;

fn advisor(client: &Arc<ScriptedClient>) -> (Advisor, Arc<MemoryCredentialStore>) {
    let store = Arc::new(MemoryCredentialStore::new());
    let ai = AiService::new(client.clone(), store.clone());
    (Advisor::builtin().unwrap().with_ai(ai), store)
}

#[test]
fn test_configure_valid_then_reset_twice() {
    let client = Arc::new(ScriptedClient::new());
    let (advisor, store) = advisor(&client);

    assert!(advisor.configure_ai("valid"));
    assert!(advisor.is_ai_available());
    assert_eq!(store.get().unwrap().as_deref(), Some("valid"));

    advisor.reset_ai();
    advisor.reset_ai();
    assert!(!advisor.is_ai_available());
    assert_eq!(store.get().unwrap(), None);
    assert_eq!(advisor.ai().unwrap().state(), AiState::Uninitialized);
}

#[test]
fn test_configure_invalid_leaves_ai_unavailable() {
    let client = Arc::new(ScriptedClient::new().reject_all());
    let (advisor, store) = advisor(&client);

    assert!(!advisor.configure_ai("invalid"));
    assert!(!advisor.is_ai_available());
    assert_eq!(store.get().unwrap(), None);
}

#[test]
fn test_reconfigure_replaces_previous_credential() {
    let client = Arc::new(ScriptedClient::new());
    let (advisor, store) = advisor(&client);
    assert!(advisor.configure_ai("first"));
    assert!(advisor.configure_ai("second"));
    assert_eq!(store.get().unwrap().as_deref(), Some("second"));
}

#[test]
fn test_generation_while_unavailable_makes_no_call() {
    let client = Arc::new(ScriptedClient::new());
    let (advisor, _) = advisor(&client);

    let err = advisor.generate_risk_analysis(&["react"], None).unwrap_err();
    assert!(matches!(err, StackError::AiUnavailable(_)));
    let err = advisor.generate_referee_insight(&["react"], None).unwrap_err();
    assert!(matches!(err, StackError::AiUnavailable(_)));
    let err = advisor
        .generate_ai_recommendations(&ProjectConstraints::default(), &["react"])
        .unwrap_err();
    assert!(matches!(err, StackError::AiUnavailable(_)));
    assert_eq!(client.calls(), 0);
}

#[test]
fn test_narratives_fall_back_when_generation_fails() {
    let client = Arc::new(ScriptedClient::new().fail_generation());
    let (advisor, _) = advisor(&client);
    assert!(advisor.configure_ai("key"));

    let comparison = advisor.compare_with_insights(&["django", "postgresql"]);
    assert!(comparison.ai_insights.is_none());
    assert!(!comparison.recommendations.is_empty());

    let risks = advisor.assess_risks(&["django"], None).unwrap();
    assert_eq!(risks.source, NarrativeSource::Rules);

    let verdict = advisor.referee(&["django", "firebase"], None).unwrap();
    assert_eq!(verdict.source, NarrativeSource::Rules);

    let reply = advisor.generate_chat_reply("tell me about django", None, &[]);
    assert_eq!(reply.source, NarrativeSource::Rules);

    let constraints = ProjectConstraints {
        scalability: Some(ScaleNeed::High),
        ..Default::default()
    };
    assert!(advisor.recommend_by_query(&constraints).ai_recommendations.is_none());
}

#[test]
fn test_ai_narratives_when_ready() {
    let client = Arc::new(ScriptedClient::new().respond_with("AI says hi"));
    let (advisor, _) = advisor(&client);
    assert!(advisor.configure_ai("key"));

    let constraints = ProjectConstraints {
        project_type: Some(ProjectType::Mobile),
        experience: Some(Experience::Beginner),
        ..Default::default()
    };
    let risks = advisor.assess_risks(&["firebase"], Some(&constraints)).unwrap();
    assert_eq!(risks.analysis.as_deref(), Some("AI says hi"));
    assert!(client.last_prompt().unwrap().contains("project type: mobile"));

    let history = vec![ChatTurn::user("we are beginners")];
    let reply = advisor.generate_chat_reply("what backend scales?", Some(&constraints), &history);
    assert_eq!(reply.source, NarrativeSource::Ai);
    let prompt = client.last_prompt().unwrap();
    assert!(prompt.contains("Project constraints: project type: mobile"));
    assert!(prompt.contains("User: we are beginners"));
}

#[test]
fn test_cascade_and_query_paths_are_independent() {
    let advisor = Advisor::builtin().unwrap();
    let constraints = ProjectConstraints {
        project_type: Some(ProjectType::FullStack),
        technologies: vec!["python".to_string()],
        scalability: Some(ScaleNeed::Medium),
        ..Default::default()
    };
    assert_eq!(
        advisor.recommend_for_constraints(Some(&constraints)),
        vec!["react", "django", "mongodb"]
    );
    let by_query = advisor.recommend_by_query(&constraints);
    assert!(by_query.recommended.len() <= 3);
    assert_eq!(by_query.reasoning[0], "Considering full-stack project requirements");
}

#[test]
fn test_compare_empty_selection_never_fails() {
    let advisor = Advisor::builtin().unwrap();
    let empty: Vec<String> = Vec::new();
    let result = advisor.compare_with_insights(&empty);
    assert!(result.stacks.is_empty());
    assert!(result.recommendations.is_empty());
}
