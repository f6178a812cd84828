//! Tests for loading the TOML configuration tier from disk
//!
//! Covers:
//! - Full and partial TOML files
//! - Unknown keys and malformed files
//! - Explicit paths that do not exist

use lingo_common::config::{load_toml_config, ConfigOverrides, ServerConfig, TomlConfig};
use lingo_common::Error;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn write_toml(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

#[test]
fn test_full_toml_file() {
    let file = write_toml(
        r#"
host = "0.0.0.0"
port = 8080
frontend_origin = "https://lingo.example.com"
corpus_path = "/srv/lingo/sentences.json"
similar_threshold = 85

[logging]
level = "warn"

[llm]
api_key = "secret"
model = "gemini-1.5-flash"
base_url = "http://127.0.0.1:9999/v1beta"
"#,
    );

    let toml = load_toml_config(Some(file.path())).unwrap();
    let config = ServerConfig::resolve(ConfigOverrides::default(), toml).unwrap();

    assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    assert_eq!(config.frontend_origin, "https://lingo.example.com");
    assert_eq!(
        config.corpus_path,
        Some(PathBuf::from("/srv/lingo/sentences.json"))
    );
    assert_eq!(config.policy.similar_threshold, 85);
    assert_eq!(config.log_level, "warn");
    assert_eq!(config.llm.api_key.as_deref(), Some("secret"));
    assert_eq!(config.llm.model, "gemini-1.5-flash");
    assert_eq!(config.llm.base_url, "http://127.0.0.1:9999/v1beta");
}

#[test]
fn test_partial_toml_uses_defaults() {
    let file = write_toml("port = 4001\n");

    let toml = load_toml_config(Some(file.path())).unwrap();
    assert_eq!(toml.port, Some(4001));
    assert_eq!(toml.llm, Default::default());

    let config = ServerConfig::resolve(ConfigOverrides::default(), toml).unwrap();
    assert_eq!(config.port, 4001);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.policy.similar_threshold, 90);
}

#[test]
fn test_empty_toml_is_default() {
    let file = write_toml("");
    let toml = load_toml_config(Some(file.path())).unwrap();
    assert_eq!(toml, TomlConfig::default());
}

#[test]
fn test_unknown_keys_ignored() {
    let file = write_toml("port = 3001\nfuture_setting = true\n");
    let toml = load_toml_config(Some(file.path())).unwrap();
    assert_eq!(toml.port, Some(3001));
}

#[test]
fn test_malformed_toml_is_config_error() {
    let file = write_toml("port = \"not a number\"\n");
    let err = load_toml_config(Some(file.path())).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn test_missing_explicit_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let err = load_toml_config(Some(&missing)).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("absent.toml"));
}
