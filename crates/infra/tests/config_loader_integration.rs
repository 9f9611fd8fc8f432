//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;

use altolink_domain::{AltoEnvironment, AltoLinkError};
use altolink_infra::config;
use tempfile::NamedTempFile;

fn write_config(contents: &str, extension: &str) -> std::path::PathBuf {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    path
}

#[test]
fn test_load_config_from_json_file() {
    let path = write_config(
        r#"{
            "database": { "path": "/tmp/integration_test.db", "pool_size": 10 },
            "alto": {
                "environment": "production",
                "client_id": "json-client",
                "client_secret": "json-secret",
                "production_api_base": "https://partner.example/v2/"
            },
            "server": { "bind_addr": "0.0.0.0:9090" }
        }"#,
        "json",
    );

    let config = config::load_from_file(Some(path.clone())).expect("JSON config should load");

    assert_eq!(config.database.path, "/tmp/integration_test.db");
    assert_eq!(config.database.pool_size, 10);
    assert_eq!(config.alto.environment, AltoEnvironment::Production);
    assert_eq!(config.alto.client_id, "json-client");
    assert_eq!(config.alto.api_base_url(AltoEnvironment::Production), "https://partner.example/v2");
    assert_eq!(config.alto.scope, "api");
    assert_eq!(config.server.bind_addr, "0.0.0.0:9090");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_toml_file() {
    let path = write_config(
        r#"
[database]
path = "/tmp/integration_test_toml.db"

[alto]
client_id = "toml-client"
client_secret = "toml-secret"
scope = "listings"
timeout_secs = 5
"#,
        "toml",
    );

    let config = config::load_from_file(Some(path.clone())).expect("TOML config should load");

    assert_eq!(config.database.path, "/tmp/integration_test_toml.db");
    assert_eq!(config.database.pool_size, 4);
    assert_eq!(config.alto.environment, AltoEnvironment::Sandbox);
    assert_eq!(config.alto.scope, "listings");
    assert_eq!(config.alto.timeout_secs, 5);
    assert_eq!(config.server.bind_addr, "127.0.0.1:8080");

    std::fs::remove_file(path).ok();
}

#[test]
fn test_debug_output_redacts_client_secret() {
    let path = write_config(
        r#"{
            "database": { "path": "redact.db" },
            "alto": { "client_id": "visible-id", "client_secret": "super-secret-value" }
        }"#,
        "json",
    );

    let config = config::load_from_file(Some(path.clone())).expect("config should load");
    let rendered = format!("{config:?}");

    assert!(rendered.contains("visible-id"));
    assert!(!rendered.contains("super-secret-value"));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_without_alto_section() {
    let path = write_config(r#"{ "database": { "path": "minimal.db" } }"#, "json");

    let result = config::load_from_file(Some(path.clone()));
    assert!(matches!(result, Err(AltoLinkError::Config(msg)) if msg.contains("Invalid JSON")));

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_from_nonexistent_file() {
    let result = config::load_from_file(Some("/nonexistent/path/config.json".into()));

    match result {
        Err(AltoLinkError::Config(msg)) => {
            assert!(msg.contains("not found"), "Error message should mention 'not found'");
        }
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_load_config_with_invalid_format() {
    let path = write_config(r#"{ "this is": "not valid" "#, "json");

    match config::load_from_file(Some(path.clone())) {
        Err(AltoLinkError::Config(msg)) => {
            assert!(msg.contains("Invalid JSON"), "Error message should mention invalid JSON");
        }
        _ => panic!("Expected Config error"),
    }

    std::fs::remove_file(path).ok();
}

#[test]
fn test_load_config_with_unsupported_extension() {
    let path = write_config("database:\n  path: x.db\n", "yaml");

    let result = config::load_from_file(Some(path.clone()));
    assert!(matches!(result, Err(AltoLinkError::Config(msg)) if msg.contains("Unsupported")));

    std::fs::remove_file(path).ok();
}
