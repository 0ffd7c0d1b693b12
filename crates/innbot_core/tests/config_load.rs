use innbot_core::{BotConfig, ConfigError};
use std::io::Write;

#[test]
fn load_reads_file_and_applies_token_override() {
    let mut file = tempfile::NamedTempFile::new().expect("temp config");
    writeln!(
        file,
        r#"
[telegram]
token = "file-token"
poll_timeout_secs = 50

[registry]
base_url = "https://registry.example"

[logging]
level = "warn"
dir = "/var/log/innbot"
"#
    )
    .expect("write config");

    let from_file = BotConfig::load_with_token_override(Some(file.path()), None)
        .expect("config should load");
    assert_eq!(from_file.require_token().unwrap(), "file-token");
    assert_eq!(from_file.poll_timeout().as_secs(), 50);
    assert_eq!(from_file.registry.base_url, "https://registry.example");
    assert_eq!(from_file.registry_timeout().as_secs(), 30);
    assert_eq!(from_file.logging.dir.as_deref(), Some("/var/log/innbot"));

    let overridden =
        BotConfig::load_with_token_override(Some(file.path()), Some("env-token".to_string()))
            .expect("config should load");
    assert_eq!(overridden.require_token().unwrap(), "env-token");
}

#[test]
fn blank_override_keeps_file_token() {
    let mut file = tempfile::NamedTempFile::new().expect("temp config");
    writeln!(file, "[telegram]\ntoken = \"file-token\"").expect("write config");

    let config = BotConfig::load_with_token_override(Some(file.path()), Some("  ".to_string()))
        .expect("config should load");
    assert_eq!(config.require_token().unwrap(), "file-token");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");

    let err = BotConfig::load_with_token_override(Some(&path), None)
        .expect_err("missing file must fail");
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp config");
    writeln!(file, "[registry\ntimeout_secs = ").expect("write config");

    let err = BotConfig::load_with_token_override(Some(file.path()), None)
        .expect_err("invalid toml must fail");
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn zero_registry_timeout_fails_validation() {
    let mut file = tempfile::NamedTempFile::new().expect("temp config");
    writeln!(file, "[registry]\ntimeout_secs = 0").expect("write config");

    let err = BotConfig::load_with_token_override(Some(file.path()), None)
        .expect_err("zero timeout must fail");
    assert!(matches!(err, ConfigError::ZeroTimeout("registry.timeout_secs")));
}
