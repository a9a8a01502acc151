//! Unit tests for configuration management
//!
//! These tests verify configuration parsing, overrides, validation and defaults
//! without touching the process environment.

use std::collections::HashMap;

use assessment_init::config::{
    Config, CONSUMER_KEY_ENV, CONSUMER_SECRET_ENV, DOMAIN_ENV,
};
use assessment_init::crypto::Secret;

#[path = "mod.rs"]
mod test_helpers;
use test_helpers::{build_test_config, DUMMY_DOMAIN, DUMMY_PUBLIC_KEY};

const FULL_TOML: &str = r#"
[security]
consumer_key = "file-key"
consumer_secret = "file-secret"
domain = "demo.example.com"

[api]
host = "0.0.0.0"
port = 8080
cors_origins = ["*"]

[demo]
default_activity_id = "my_activity"
reports_dataset_id = "dataset-1"

[demo.author]
id = "author-1"
firstname = "Ada"
lastname = "Lovelace"
email = "ada@example.com"
"#;

/// Test that default configuration creates valid structure
/// Why: Verify default config is valid and doesn't panic
#[test]
fn test_default_config_creation() {
    let config = Config::default();

    assert_eq!(config.security.domain, "localhost");
    assert_eq!(config.api.port, 3000);
    assert_eq!(config.demo.default_activity_id, "places_to_visit");
    assert_eq!(config.demo.author.id, "demos-site");
    assert!(config.validate().is_ok());
}

/// What is tested: Full TOML file parses into every section
/// Why: All demo values must be configurable
#[test]
fn test_parse_full_config() {
    let config = Config::from_toml_str(FULL_TOML).expect("Should parse full config");

    assert_eq!(config.security.consumer_key, "file-key");
    assert_eq!(config.security.consumer_secret, Secret::new("file-secret"));
    assert_eq!(config.security.domain, "demo.example.com");
    assert_eq!(config.api.host, "0.0.0.0");
    assert_eq!(config.api.cors_origins, vec!["*".to_string()]);
    assert_eq!(config.demo.default_activity_id, "my_activity");
    assert_eq!(config.demo.reports_dataset_id, "dataset-1");
    assert_eq!(config.demo.author.firstname, "Ada");
    assert!(config.validate().is_ok());
}

/// What is tested: [demo] section is optional
/// Why: A minimal config only needs credentials and the API address
#[test]
fn test_demo_section_defaults() {
    let toml = r#"
[security]
consumer_key = "k"
consumer_secret = "s"
domain = "localhost"

[api]
host = "127.0.0.1"
port = 3000
"#;
    let config = Config::from_toml_str(toml).unwrap();
    assert_eq!(config.demo.default_activity_id, "places_to_visit");
    assert!(config.api.cors_origins.is_empty());
}

/// What is tested: Missing secret fails to parse
/// Why: The service cannot sign anything without it
#[test]
fn test_missing_secret_fails_to_parse() {
    let toml = r#"
[security]
consumer_key = "k"
domain = "localhost"

[api]
host = "127.0.0.1"
port = 3000
"#;
    assert!(Config::from_toml_str(toml).is_err());
}

/// What is tested: Debug output of the config hides the secret
/// Why: Configs get logged; the secret must not
#[test]
fn test_debug_output_redacts_secret() {
    let config = Config::from_toml_str(FULL_TOML).unwrap();
    let debug = format!("{:?}", config);
    assert!(!debug.contains("file-secret"));
    assert!(debug.contains("file-key"));
}

/// What is tested: Overrides replace credentials, empty overrides are ignored
/// Why: Secrets are usually injected through the environment
#[test]
fn test_apply_overrides() {
    let mut config = Config::from_toml_str(FULL_TOML).unwrap();
    let env: HashMap<&str, &str> = HashMap::from([
        (CONSUMER_KEY_ENV, "env-key"),
        (CONSUMER_SECRET_ENV, "env-secret"),
        (DOMAIN_ENV, "  "),
    ]);

    config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

    assert_eq!(config.security.consumer_key, "env-key");
    assert_eq!(config.security.consumer_secret, Secret::new("env-secret"));
    assert_eq!(config.security.domain, "demo.example.com");
}

/// What is tested: validate() rejects empty credentials
/// Why: Empty credentials produce requests the platform will refuse
#[test]
fn test_validate_rejects_empty_credentials() {
    let mut config = build_test_config();
    config.security.consumer_key = String::new();
    assert!(config.validate().is_err());

    let mut config = build_test_config();
    config.security.consumer_secret = Secret::new(" ");
    assert!(config.validate().is_err());

    let mut config = build_test_config();
    config.security.domain = String::new();
    assert!(config.validate().is_err());
}

/// What is tested: validate() rejects an unparsable bind address
/// Why: Fail at startup rather than when the server binds
#[test]
fn test_validate_rejects_bad_host() {
    let mut config = build_test_config();
    config.api.host = "not a host".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("invalid API address"));
}

/// What is tested: security_context() carries key and domain but no timestamp
/// Why: Each request must be stamped with the current time
#[test]
fn test_security_context_from_config() {
    let config = build_test_config();
    let security = config.security_context();
    assert_eq!(security.public_key, DUMMY_PUBLIC_KEY);
    assert_eq!(security.domain, DUMMY_DOMAIN);
    assert!(security.timestamp.is_none());
}

/// What is tested: Shipped template parses and validates
/// Why: The template is the starting point for every deployment
#[test]
fn test_template_config_is_valid() {
    let content = include_str!("../config/service.template.toml");
    let config = Config::from_toml_str(content).expect("template should parse");
    assert!(config.validate().is_ok());
}
