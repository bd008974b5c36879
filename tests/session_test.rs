// Integration tests for batch runs and persisted session state

use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use termfolio::cli::{run_commands, Services};
use termfolio::config::Config;
use termfolio::services::{AuthGate, Profile, RecordingNavigator, StateStore, ThemeRegistry};

fn build(store: Arc<StateStore>, profile: Profile) -> (Services, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::new());
    let services = Services {
        profile: Arc::new(profile),
        themes: Arc::new(ThemeRegistry::new(store.clone(), "matrix")),
        auth: Arc::new(AuthGate::new(store, Duration::ZERO)),
        navigator: navigator.clone(),
    };
    (services, navigator)
}

fn commands(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_batch_run_ignores_configured_delays() {
    let (services, _) = build(Arc::new(StateStore::in_memory()), Profile::embedded().unwrap());

    // default config types slowly; batch runs must not
    let rows = run_commands(
        &Config::default(),
        services,
        &commands(&["whoami", "echo hi"]),
    )
    .await;

    assert_eq!(
        rows,
        vec!["> whoami", "Alex Morgan", "", "> echo hi", "hi", ""]
    );
}

#[tokio::test]
async fn test_batch_run_navigates() {
    let (services, navigator) =
        build(Arc::new(StateStore::in_memory()), Profile::embedded().unwrap());

    run_commands(&Config::default(), services, &commands(&["open 2", "code 2"])).await;

    assert_eq!(
        navigator.opened(),
        vec![
            "https://pixel-runner.example.dev/index.html",
            "https://github.com/example/pixel-runner",
        ]
    );
}

#[tokio::test]
async fn test_custom_profile() {
    let profile = Profile::parse(
        r#"
name = "Sam Doe"
title = "Systems Engineer"
location = "Oslo"
bio = "Writes schedulers."

[[projects]]
name = "Tiny Kernel"
description = "A toy kernel."
tech = ["Rust"]

[contact]
email = "sam@example.org"
github = "https://github.com/sam"
linkedin = "www.linkedin.com/in/sam"
"#,
    )
    .unwrap();
    let (services, navigator) = build(Arc::new(StateStore::in_memory()), profile);

    let rows = run_commands(
        &Config::default(),
        services,
        &commands(&["whoami", "open tiny kernel", "code 1", "showcase 1"]),
    )
    .await;

    assert!(rows.contains(&"Sam Doe".to_string()));
    assert!(rows.contains(&"Live demo for \"Tiny Kernel\" not found.".to_string()));
    assert!(rows.contains(&"Source code for \"Tiny Kernel\" not found.".to_string()));
    assert!(navigator.opened().is_empty());

    // both links missing: one row each, then the dispatcher's blank
    assert_eq!(
        rows[rows.len() - 3..],
        [
            "Live demo for \"Tiny Kernel\" not found.".to_string(),
            "Source code for \"Tiny Kernel\" not found.".to_string(),
            String::new(),
        ]
    );
}

#[test]
fn test_profile_file_errors_are_reported() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.toml");
    assert!(Profile::load(Some(missing.as_path())).is_err());

    let broken = dir.path().join("broken.toml");
    std::fs::write(&broken, "name = ").unwrap();
    assert!(Profile::load(Some(broken.as_path())).is_err());
}

#[tokio::test]
async fn test_theme_and_login_survive_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.toml");

    {
        let store = Arc::new(StateStore::open(path.clone()));
        let (services, _) = build(store, Profile::embedded().unwrap());
        services.auth.complete_authentication();
        run_commands(&Config::default(), services, &commands(&["theme hacker"])).await;
    }

    let store = Arc::new(StateStore::open(path));
    let (services, _) = build(store, Profile::embedded().unwrap());
    assert!(services.auth.is_authenticated());
    assert_eq!(services.themes.current_theme().name, "hacker");
}

#[test]
fn test_corrupt_state_file_starts_fresh() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.toml");
    std::fs::write(&path, "authenticated = [[[").unwrap();

    let store = StateStore::open(path);
    assert!(!store.snapshot().authenticated);
    assert_eq!(store.snapshot().theme, None);
}
