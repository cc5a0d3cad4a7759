use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

/// Binary isolated to `root`, with AI pointed at a closed local port.
fn stackref(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stackref").unwrap();
    cmd.env("STACKREF_ROOT", root)
        .env("STACKREF_CONFIG", root.join("config.toml"))
        .env("STACKREF_AI_ENDPOINT", "http://127.0.0.1:9/v1beta")
        .env("STACKREF_AI_TIMEOUT_SECS", "2")
        .env_remove("GOOGLE_AI_API_KEY")
        .env_remove("STACKREF_AI_API_KEY")
        .env_remove("STACKREF_ROBOT")
        .env_remove("RUST_LOG");
    cmd
}

fn robot_json(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("stackref").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("stackref").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_search_tolerates_typos() {
    let dir = tempdir().unwrap();
    let json = robot_json(stackref(dir.path()).args(["--robot", "search", "Djngo"]));
    assert_eq!(json["status"], "ok");
    assert_eq!(json["data"]["results"][0]["id"], "django");
}

#[test]
fn test_search_blank_query_is_empty() {
    let dir = tempdir().unwrap();
    let json = robot_json(stackref(dir.path()).args(["--robot", "search", "   "]));
    assert_eq!(json["data"]["results"].as_array().unwrap().len(), 0);
}

#[test]
fn test_show_human() {
    let dir = tempdir().unwrap();
    stackref(dir.path())
        .args(["show", "PostgreSQL"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PostgreSQL"))
        .stdout(predicate::str::contains("Low Risk"));
}

#[test]
fn test_show_unknown_fails() {
    let dir = tempdir().unwrap();
    stackref(dir.path())
        .args(["show", "rails"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: technology not found: rails"));
}

#[test]
fn test_show_unknown_robot_error() {
    let dir = tempdir().unwrap();
    let output = stackref(dir.path())
        .args(["--robot", "show", "rails"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"]["error"]["code"], "not_found");
}

#[test]
fn test_list_by_category() {
    let dir = tempdir().unwrap();
    let json = robot_json(stackref(dir.path()).args(["--robot", "list", "--category", "DATABASE"]));
    assert_eq!(json["data"]["count"], 2);
    let ids: Vec<&str> = json["data"]["technologies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["mongodb", "postgresql"]);
}

#[test]
fn test_recommend_without_constraints() {
    let dir = tempdir().unwrap();
    let json = robot_json(stackref(dir.path()).args(["--robot", "recommend", "--offline"]));
    assert_eq!(
        json["data"]["shortlist"],
        serde_json::json!(["react", "nodejs", "mongodb"])
    );
    assert!(json["data"]["search"]["recommended"].as_array().unwrap().is_empty());
}

#[test]
fn test_recommend_api_javascript() {
    let dir = tempdir().unwrap();
    let json = robot_json(stackref(dir.path()).args([
        "--robot",
        "recommend",
        "--offline",
        "--type",
        "api",
        "--knows",
        "javascript",
        "--scale",
        "high",
        "--budget",
        "low",
    ]));
    assert_eq!(
        json["data"]["shortlist"],
        serde_json::json!(["nodejs", "postgresql", "react"])
    );
    let reasoning = json["data"]["search"]["reasoning"].as_array().unwrap();
    assert!(reasoning.iter().any(|r| r == "Considering cost-effective open-source solutions"));
}

#[test]
fn test_recommend_rejects_unknown_type() {
    let dir = tempdir().unwrap();
    stackref(dir.path())
        .args(["recommend", "--type", "desktop"])
        .assert()
        .failure();
}

#[test]
fn test_compare_static_narrative() {
    let dir = tempdir().unwrap();
    let json = robot_json(stackref(dir.path()).args([
        "--robot", "compare", "react", "firebase", "express",
    ]));
    let data = &json["data"];
    assert_eq!(data["recommendations"].as_array().unwrap().len(), 4);
    assert_eq!(data["risk"]["firebase"], "medium");
    assert_eq!(data["metrics"]["firebase"]["learning_curve"], 90);
    assert!(data.get("ai_insights").is_none());
}

#[test]
fn test_compare_warns_on_unknown() {
    let dir = tempdir().unwrap();
    let json = robot_json(stackref(dir.path()).args(["--robot", "compare", "react", "rails"]));
    assert_eq!(json["data"]["stacks"].as_array().unwrap().len(), 1);
    assert_eq!(json["warnings"][0], "unknown technology: rails");
}

#[test]
fn test_risks_fallback_report() {
    let dir = tempdir().unwrap();
    let json = robot_json(stackref(dir.path()).args(["--robot", "risks", "firebase", "mongodb"]));
    let data = &json["data"];
    assert_eq!(data["source"], "rules");
    assert_eq!(data["notes"].as_array().unwrap().len(), 2);
    assert!(data["advice"][0].as_str().unwrap().starts_with("Team Knowledge Gap"));
}

#[test]
fn test_referee_fallback_verdict() {
    let dir = tempdir().unwrap();
    stackref(dir.path())
        .args(["referee", "django", "firebase", "--knows", "python"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Referee: Django vs Firebase"))
        .stdout(predicate::str::contains("Your team already knows Django"));
}

#[test]
fn test_chat_rule_based() {
    let dir = tempdir().unwrap();
    let json = robot_json(stackref(dir.path()).args([
        "--robot",
        "chat",
        "--offline",
        "compare",
        "react",
        "vs",
        "django",
    ]));
    let data = &json["data"];
    assert_eq!(data["source"], "rules");
    assert!(data["content"]
        .as_str()
        .unwrap()
        .starts_with("I can help you compare these technologies."));
    assert_eq!(data["suggestions"][0], "Compare learning curves");
}

#[test]
fn test_chat_history_file() {
    let dir = tempdir().unwrap();
    let history = dir.path().join("history.json");
    std::fs::write(
        &history,
        r#"[{"role": "user", "content": "hi"}, {"role": "assistant", "content": "hello"}]"#,
    )
    .unwrap();
    stackref(dir.path())
        .arg("chat")
        .arg("--history")
        .arg(&history)
        .args(["realtime", "database"])
        .assert()
        .success()
        .stdout(predicate::str::contains("I found some relevant technologies"));
}

#[test]
fn test_ai_status_without_credential() {
    let dir = tempdir().unwrap();
    let json = robot_json(stackref(dir.path()).args(["--robot", "ai", "status"]));
    assert_eq!(json["data"]["enabled"], true);
    assert_eq!(json["data"]["available"], false);
    assert_eq!(json["data"]["state"]["state"], "uninitialized");
}

#[test]
fn test_ai_disabled_by_env() {
    let dir = tempdir().unwrap();
    let json = robot_json(
        stackref(dir.path())
            .env("STACKREF_AI_ENABLED", "0")
            .args(["--robot", "ai", "status"]),
    );
    assert_eq!(json["data"]["enabled"], false);
}

#[test]
fn test_ai_configure_unreachable_fails() {
    let dir = tempdir().unwrap();
    stackref(dir.path())
        .args(["ai", "configure", "not-a-real-key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("try again"));
    assert!(!dir.path().join("credentials.json").exists());
}

#[test]
fn test_unreachable_api_keeps_stored_credential() {
    let dir = tempdir().unwrap();
    let credentials = dir.path().join("credentials.json");
    std::fs::write(&credentials, r#"{"google_ai_api_key": "good-saved-key"}"#).unwrap();

    let json = robot_json(stackref(dir.path()).args(["--robot", "ai", "status"]));
    assert_eq!(json["data"]["available"], false);
    let json = robot_json(
        stackref(dir.path())
            .env("GOOGLE_AI_API_KEY", "typo-env-key")
            .args(["--robot", "risks", "django"]),
    );
    assert_eq!(json["status"], "ok");

    let raw = std::fs::read_to_string(&credentials).unwrap();
    assert!(raw.contains("good-saved-key"));
}

#[test]
fn test_ai_reset_clears_stored_credential() {
    let dir = tempdir().unwrap();
    let credentials = dir.path().join("credentials.json");
    std::fs::write(&credentials, r#"{"google_ai_api_key": "stale"}"#).unwrap();

    stackref(dir.path())
        .args(["ai", "reset"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AI credential cleared."));
    let raw = std::fs::read_to_string(&credentials).unwrap();
    assert!(!raw.contains("stale"));
}

#[test]
fn test_invalid_threshold_env_is_config_error() {
    let dir = tempdir().unwrap();
    stackref(dir.path())
        .env("STACKREF_SEARCH_THRESHOLD", "3")
        .args(["search", "react"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("search.threshold"));
}

#[test]
fn test_project_config_file_is_read() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[search]\ndefault_limit = 1\n\n[ai]\nenabled = false\n",
    )
    .unwrap();
    let json = robot_json(stackref(dir.path()).args(["--robot", "search", "framework"]));
    assert_eq!(json["data"]["results"].as_array().unwrap().len(), 1);
}
