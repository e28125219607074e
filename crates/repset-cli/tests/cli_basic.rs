//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. All runs
//! use REPSET_ENV=dev so they never touch production data.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "repset-cli", "--"])
        .args(args)
        .env("REPSET_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_workout_list_includes_builtins() {
    let (stdout, _, code) = run_cli(&["workout", "list"]);
    assert_eq!(code, 0, "workout list failed");
    assert!(stdout.contains("starter-hiit"));
    assert!(stdout.contains("full-body-pack"));
}

#[test]
fn test_workout_show_emits_json() {
    let (stdout, _, code) = run_cli(&["workout", "show", "starter-hiit"]);
    assert_eq!(code, 0, "workout show failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("invalid JSON");
    assert_eq!(parsed["title"], "Starter HIIT");
}

#[test]
fn test_workout_show_unknown_id_fails() {
    let (_, stderr, code) = run_cli(&["workout", "show", "no-such-workout"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no-such-workout"));
}

#[test]
fn test_workout_image_lookup_never_fails() {
    let (known, _, code) = run_cli(&["workout", "image", "Plank"]);
    assert_eq!(code, 0);
    assert!(known.starts_with("https://"));

    let (unknown, _, code) = run_cli(&["workout", "image", "Underwater Basket Weaving"]);
    assert_eq!(code, 0);
    assert!(unknown.starts_with("https://"));
}

#[test]
fn test_session_lifecycle() {
    // A leftover session from an earlier run would block start.
    let _ = run_cli(&["session", "cancel"]);

    let (stdout, stderr, code) = run_cli(&["session", "start", "--builtin", "morning-yoga"]);
    assert_eq!(code, 0, "session start failed: {stderr}");
    assert!(stdout.contains("StateSnapshot"));
    assert!(stdout.contains("paused"));

    let (stdout, _, code) = run_cli(&["session", "resume"]);
    assert_eq!(code, 0, "session resume failed");
    assert!(stdout.contains("SessionStarted"));

    let (stdout, _, code) = run_cli(&["session", "pause"]);
    assert_eq!(code, 0, "session pause failed");
    assert!(stdout.contains("SessionPaused"));

    let (stdout, _, code) = run_cli(&["session", "complete"]);
    assert_eq!(code, 0, "session complete failed");
    assert!(stdout.contains("ExerciseCompleted"));

    let (stdout, _, code) = run_cli(&["session", "status"]);
    assert_eq!(code, 0, "session status failed");
    assert!(stdout.contains("StateSnapshot"));

    let (stdout, _, code) = run_cli(&["session", "cancel"]);
    assert_eq!(code, 0, "session cancel failed");
    assert!(stdout.contains("SessionCancelled"));

    // Nothing left to drive afterwards.
    let (_, stderr, code) = run_cli(&["session", "status"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no session in progress"));
}

#[test]
fn test_stats_today() {
    let (stdout, _, code) = run_cli(&["stats", "today"]);
    assert_eq!(code, 0, "stats today failed");
    assert!(stdout.contains("total_workouts"));
}

#[test]
fn test_stats_all() {
    let (stdout, _, code) = run_cli(&["stats", "all"]);
    assert_eq!(code, 0, "stats all failed");
    assert!(stdout.contains("total_calories"));
}

#[test]
fn test_config_get() {
    let (stdout, _, code) = run_cli(&["config", "get", "defaults.calorie_budget"]);
    assert_eq!(code, 0, "config get failed");
    assert!(!stdout.trim().is_empty());
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, _, code) = run_cli(&["config", "get", "no.such.key"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_list() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("invalid JSON");
    assert!(parsed["defaults"]["planned_duration_min"].is_number());
}

#[test]
fn test_chat_classify() {
    let (stdout, _, code) = run_cli(&["chat", "classify", "best chest workout?"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "workout");

    let (stdout, _, code) = run_cli(&["chat", "classify", "an easy dinner recipe"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "nutrition");

    let (stdout, _, code) = run_cli(&["chat", "classify", "hello there"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "general");
}

#[test]
fn test_chat_recipe_extraction() {
    let text = "Overnight Oats\nIngredients:\n- rolled oats\n- oat milk\nInstructions:\n1. Mix everything.\n2. Refrigerate overnight.";
    let (stdout, _, code) = run_cli(&["chat", "recipe", text]);
    assert_eq!(code, 0, "chat recipe failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("invalid JSON");
    assert_eq!(parsed["title"], "Overnight Oats");
}

#[test]
fn test_chat_plan_marker() {
    let text = "Sure!\nWORKOUT_PLAN: Leg Day|strength|intermediate|Lower body|Air Squats 3x15";
    let (stdout, _, code) = run_cli(&["chat", "plan", text]);
    assert_eq!(code, 0, "chat plan failed");
    assert!(stdout.contains("Leg Day"));
}

#[test]
fn test_chat_plan_without_marker_fails() {
    let (_, stderr, code) = run_cli(&["chat", "plan", "just drink water"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no plan marker"));
}
