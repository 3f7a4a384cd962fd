use licenprep::faculty::Bucket;
use licenprep::model::{SettingsUpdate, Textbook, TextbookStatus, Theme};
use licenprep::state::AppState;
use licenprep::store::fs_backend::FsBackend;
use licenprep::store::DEFAULT_STORAGE_KEY;
use std::fs;

fn load(dir: &std::path::Path) -> AppState<FsBackend> {
    AppState::load(FsBackend::new(dir.to_path_buf()), DEFAULT_STORAGE_KEY).unwrap()
}

#[test]
fn state_survives_restart() {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut state = load(temp_dir.path());
    state.add_textbook(Textbook::new("tb2", "Pathoma", "application/pdf"));
    state.update_textbook_status("tb2", TextbookStatus::Processed);
    state.update_settings(SettingsUpdate {
        theme: Some(Theme::Dark),
        token_budget: Some(250_000),
        ..Default::default()
    });
    let before = state.snapshot();
    drop(state);

    let reloaded = load(temp_dir.path());
    assert_eq!(reloaded.snapshot(), before);
    assert_eq!(reloaded.textbooks()[1].title, "Pathoma");
    assert_eq!(reloaded.settings().theme, Theme::Dark);
}

#[test]
fn blob_uses_versioned_envelope() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut state = load(temp_dir.path());
    state.next_question();

    let raw = fs::read_to_string(temp_dir.path().join("licenprep-storage.json")).unwrap();
    let blob: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(blob["version"], 0);

    let persisted = blob["state"].as_object().unwrap();
    let mut keys: Vec<&str> = persisted.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["mcqs", "settings", "streak", "systemProgress", "textbooks", "userStats"]
    );
}

#[test]
fn partial_blob_keeps_seed_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join("licenprep-storage.json"),
        r#"{"state":{"streak":12,"settings":{"modelTier":"gemini-pro","tokenBudget":300000,"theme":"light"}},"version":0}"#,
    )
    .unwrap();

    let state = load(temp_dir.path());
    assert_eq!(state.streak(), 12);
    assert_eq!(state.settings().model_tier, "gemini-pro");
    assert_eq!(state.mcqs().len(), 3);
    assert_eq!(state.textbooks()[0].id, "tb1");
}

#[test]
fn corrupt_blob_fails_startup() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(temp_dir.path().join("licenprep-storage.json"), "{not json").unwrap();
    let result = AppState::load(
        FsBackend::new(temp_dir.path().to_path_buf()),
        DEFAULT_STORAGE_KEY,
    );
    assert!(result.is_err());
}

#[test]
fn board_and_session_reset_on_restart() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut state = load(temp_dir.path());
    state.select_answer("b");
    state.approve_all_pending();
    drop(state);

    let reloaded = load(temp_dir.path());
    assert!(!reloaded.practice().is_answered());
    assert_eq!(reloaded.faculty().ids(Bucket::Pending), vec!["q1"]);
}

#[test]
fn out_of_range_persisted_numbers_are_bounded() {
    let temp_dir = tempfile::tempdir().unwrap();
    fs::write(
        temp_dir.path().join("licenprep-storage.json"),
        r#"{"state":{"systemProgress":[{"system":"Renal","progress":250}],"userStats":{"questionsAnswered":1,"correctAnswers":9,"timeSpent":5,"lastActive":"2024-03-01T12:00:00Z"}},"version":0}"#,
    )
    .unwrap();

    let state = load(temp_dir.path());
    assert_eq!(state.system_progress()[0].progress, 100);
    assert_eq!(state.user_stats().accuracy(), Some(100.0));
}
