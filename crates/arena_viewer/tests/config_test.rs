//! Tests for loading viewer configuration.

use std::io::Write;
use std::time::Duration;

use arena_replay::ReplayStrategy;
use arena_viewer::ViewerConfig;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write config");
    file
}

#[test]
fn test_full_config_file() {
    let file = write_config(
        r#"
server_url = "http://arena.local:3000"
request_timeout_secs = 3
replay_strategy = "cached"
log_filter = "arena_viewer=debug"
log_file = "/tmp/viewer.log"
"#,
    );

    let config = ViewerConfig::from_file(file.path()).expect("Valid config");
    assert_eq!(config.server_url(), "http://arena.local:3000");
    assert_eq!(config.request_timeout(), Duration::from_secs(3));
    assert_eq!(*config.replay_strategy(), ReplayStrategy::Cached);
    assert_eq!(config.log_filter(), "arena_viewer=debug");
    assert_eq!(config.log_file().to_str(), Some("/tmp/viewer.log"));
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = ViewerConfig::load_or_default(dir.path().join("absent.toml")).expect("Defaults");
    assert_eq!(config, ViewerConfig::default());
}

#[test]
fn test_malformed_file_is_an_error() {
    let file = write_config("replay_strategy = \"sometimes\"");
    let err = ViewerConfig::load_or_default(file.path()).unwrap_err();
    assert!(err.message.starts_with("Failed to parse config"));
}

#[test]
fn test_flags_override_file() {
    let file = write_config("server_url = \"http://from-file\"");
    let config = ViewerConfig::from_file(file.path())
        .unwrap()
        .with_env_override(Some("http://from-env".to_string()))
        .with_server_url("http://from-flag")
        .with_replay_strategy(ReplayStrategy::Cached);

    assert_eq!(config.server_url(), "http://from-flag");
    assert_eq!(*config.replay_strategy(), ReplayStrategy::Cached);
}
