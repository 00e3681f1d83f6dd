use super::*;
use crate::domain::{Language, Theme};

#[test]
fn test_empty_file_uses_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.server.port, 9621);
    assert!(config.server.engineering_catalog);
    assert_eq!(config.panel.server_url, "http://127.0.0.1:9621");
    assert_eq!(config.panel.theme, Theme::System);
}

#[test]
fn test_partial_sections_parse() {
    let config: Config = toml::from_str(
        r#"
[server]
port = 8080
use_engineering_prompts = true

[panel]
language = "zh_TW"
theme = "dark"
"#,
    )
    .unwrap();

    assert_eq!(config.server.port, 8080);
    assert!(config.server.use_engineering_prompts);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.panel.language, Language::ZhTw);
    assert_eq!(config.panel.theme, Theme::Dark);
}

#[test]
fn test_env_override_flips_startup_mode() {
    let mut config = Config::default();
    config.apply_env_overrides_from(|key| {
        (key == ENGINEERING_PROMPTS_ENV).then(|| "Yes".to_string())
    });
    assert!(config.server.use_engineering_prompts);
    assert_eq!(config.server.env_override.as_deref(), Some("Yes"));

    config.apply_env_overrides_from(|_| Some("off".to_string()));
    assert!(!config.server.use_engineering_prompts);
}

#[test]
fn test_missing_env_keeps_configured_mode() {
    let mut config = Config::default();
    config.server.use_engineering_prompts = true;
    config.apply_env_overrides_from(|_| None);
    assert!(config.server.use_engineering_prompts);
    assert_eq!(config.server.env_override, None);
}

#[test]
fn test_blank_tokens_are_disabled() {
    let mut config = Config::default();
    config.server.token = "   ".to_string();
    assert_eq!(config.server.token(), None);
    config.panel.token = "s3cret".to_string();
    assert_eq!(config.panel.token(), Some("s3cret"));
}

#[test]
fn test_save_then_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.server.port = 9999;
    config.panel.language = Language::Fr;
    config.save_to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.server.port, 9999);
    assert_eq!(loaded.panel.language, Language::Fr);
    assert!(!path.with_extension("toml.tmp").exists());
}

#[test]
fn test_from_file_reports_parse_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[server]\nport = \"not a number\"\n").unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}
