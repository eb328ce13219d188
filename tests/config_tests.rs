//! 配置功能测试

use signaid::infrastructure::config::{
    get_database_path, load_config_from, write_config_sample, Config,
};
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.theme, "temp");
    assert!(config.enable_emoji);
    assert!(config.http_proxy.is_none());
    assert_eq!(config.backend.base_url, "http://localhost:5001");
    assert_eq!(config.backend.timeout(), Duration::from_secs(30));
    assert_eq!(config.backend.connect_timeout(), Duration::from_secs(10));
    assert!(!config.storage.in_memory);
    assert_eq!(config.speech.language, "en-US");
}

#[test]
fn test_logging_defaults() {
    let config = Config::default();

    assert!(config.logging.enable);
    assert!(config.logging.path.is_none());
    assert_eq!(config.logging.level, "WARN");
}

#[test]
fn test_config_toml_format() {
    let toml_content = r#"
theme = "wudao"
enable_emoji = false

[backend]
base_url = "http://10.0.0.2:5001"
timeout_secs = 5

[storage]
in_memory = true

[logging]
enable = true
path = "/tmp/test.log"
level = "DEBUG"
"#;

    let config: Config = toml::from_str(toml_content).expect("parse");
    assert_eq!(config.theme, "wudao");
    assert!(!config.enable_emoji);
    assert_eq!(config.backend.base_url, "http://10.0.0.2:5001");
    assert_eq!(config.backend.timeout_secs, 5);
    // 未填写的字段取默认值
    assert_eq!(config.backend.connect_timeout_secs, 10);
    assert!(config.storage.in_memory);
    assert_eq!(config.speech.language, "en-US");
    assert_eq!(config.logging.path.as_deref(), Some("/tmp/test.log"));
    assert_eq!(config.logging.level, "DEBUG");
}

#[test]
fn test_empty_toml_is_default() {
    let config: Config = toml::from_str("").expect("parse");
    assert_eq!(config.theme, "temp");
    assert_eq!(config.backend.timeout_secs, 30);
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = load_config_from(&dir.path().join("nope.toml")).expect("load");
    assert_eq!(config.backend.base_url, "http://localhost:5001");
}

#[test]
fn test_load_invalid_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "theme = [not valid").expect("write");

    let config = load_config_from(&path).expect("load");
    assert_eq!(config.theme, "temp");
}

#[test]
fn test_sample_round_trips_through_loader() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("config.toml");

    write_config_sample(&path).expect("write sample");
    let content = std::fs::read_to_string(&path).expect("read");
    assert!(content.contains("[backend]"));
    assert!(content.contains("base_url = \"http://localhost:5001\""));

    let config = load_config_from(&path).expect("load");
    assert_eq!(config.backend.timeout_secs, 30);
    assert_eq!(config.logging.level, "WARN");
}

#[test]
fn test_database_path_override() {
    let mut config = Config::default();
    config.storage.path = Some("/var/lib/signaid/records.db".to_string());
    assert_eq!(
        get_database_path(&config),
        PathBuf::from("/var/lib/signaid/records.db")
    );

    config.storage.path = Some(String::new());
    assert!(get_database_path(&config).ends_with("signaid/signaid.db"));
}
