//! Configuration Management Module
//!
//! This module handles loading and managing configuration for the service.
//! Configuration includes the platform credentials, API server settings, and the
//! fixed values used by the demo pages.

use serde::Deserialize;

use crate::crypto::Secret;
use crate::init::{AuthorUser, SecurityContext};

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config/service.toml";

/// Environment variable that overrides the configuration file path.
pub const CONFIG_PATH_ENV: &str = "SERVICE_CONFIG_PATH";

/// Environment variables that override the credentials from the file.
pub const CONSUMER_KEY_ENV: &str = "SERVICE_CONSUMER_KEY";
pub const CONSUMER_SECRET_ENV: &str = "SERVICE_CONSUMER_SECRET";
pub const DOMAIN_ENV: &str = "SERVICE_DOMAIN";

// ============================================================================
// CONFIGURATION STRUCTURES
// ============================================================================

/// Main configuration structure containing all service settings.
///
/// This structure holds configuration for:
/// - Platform credentials (consumer key, consumer secret, domain)
/// - API server configuration
/// - Demo page values (author user, default activity, report dataset)
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Platform credentials
    pub security: SecurityConfig,
    /// API server configuration (host, port, CORS settings)
    pub api: ApiConfig,
    /// Values used to build the demo page payloads
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Platform credentials.
///
/// The consumer secret is only used for signing and is never serialized.
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// Public consumer key
    pub consumer_key: String,
    /// Private consumer secret
    pub consumer_secret: Secret,
    /// Domain the signed requests are restricted to
    pub domain: String,
}

/// API server configuration for external communication.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Host address to bind the API server to
    pub host: String,
    /// Port number to bind the API server to
    pub port: u16,
    /// Allowed CORS origins for cross-origin requests
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Fixed values for the demo pages.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// Activity loaded by `/assess` when no id is given
    #[serde(default = "default_activity_id")]
    pub default_activity_id: String,
    /// Dataset backing the reports page
    #[serde(default = "default_reports_dataset_id")]
    pub reports_dataset_id: String,
    /// User shown in the authoring pages
    #[serde(default = "default_author_user")]
    pub author: AuthorUser,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            default_activity_id: default_activity_id(),
            reports_dataset_id: default_reports_dataset_id(),
            author: default_author_user(),
        }
    }
}

fn default_activity_id() -> String {
    "places_to_visit".to_string()
}

fn default_reports_dataset_id() -> String {
    "33285a4b-0e6e-47e4-bade-78999ada14db".to_string()
}

fn default_author_user() -> AuthorUser {
    AuthorUser {
        id: "demos-site".to_string(),
        firstname: "Demos".to_string(),
        lastname: "User".to_string(),
        email: "demos@example.com".to_string(),
    }
}

// ============================================================================
// CONFIGURATION LOADING AND MANAGEMENT
// ============================================================================

impl Config {
    /// Loads configuration from the TOML file and applies environment overrides.
    ///
    /// This function:
    /// 1. Resolves the path (`SERVICE_CONFIG_PATH` or `config/service.toml`)
    /// 2. Parses the file
    /// 3. Applies `SERVICE_CONSUMER_KEY`, `SERVICE_CONSUMER_SECRET`, `SERVICE_DOMAIN`
    /// 4. Validates the result
    ///
    /// # Returns
    ///
    /// - `Ok(Config)` - Successfully loaded and validated configuration
    /// - `Err(anyhow::Error)` - File missing, unparsable, or invalid
    pub fn load() -> anyhow::Result<Self> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        if std::path::Path::new(&config_path).exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let mut config = Config::from_toml_str(&content)?;
            config.apply_overrides(|name| std::env::var(name).ok());
            config.validate()?;
            Ok(config)
        } else {
            Err(anyhow::anyhow!(
                "Configuration file '{}' not found. Please copy the template:\n\
                cp config/service.template.toml config/service.toml\n\
                Then edit config/service.toml with your actual values.",
                config_path
            ))
        }
    }

    /// Parses configuration from TOML text without validating it.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Replaces credentials with values from `lookup`, when present and non-empty.
    ///
    /// # Arguments
    ///
    /// * `lookup` - Resolves an override name to its value (normally the process environment)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = non_empty(CONSUMER_KEY_ENV) {
            self.security.consumer_key = key;
        }
        if let Some(secret) = non_empty(CONSUMER_SECRET_ENV) {
            self.security.consumer_secret = Secret::new(secret);
        }
        if let Some(domain) = non_empty(DOMAIN_ENV) {
            self.security.domain = domain;
        }
    }

    /// Validates credentials and the API bind address.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Configuration is valid
    /// - `Err(anyhow::Error)` - Empty credential or unusable address
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.security.consumer_key.trim().is_empty() {
            anyhow::bail!("Configuration error: security.consumer_key must not be empty");
        }
        if self.security.consumer_secret.is_blank() {
            anyhow::bail!("Configuration error: security.consumer_secret must not be empty");
        }
        if self.security.domain.trim().is_empty() {
            anyhow::bail!("Configuration error: security.domain must not be empty");
        }
        self.socket_addr()?;
        Ok(())
    }

    /// Address the API server binds to.
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.api.host, self.api.port)
            .parse::<std::net::SocketAddr>()
            .map_err(|e| {
                anyhow::anyhow!(
                    "Configuration error: invalid API address {}:{}: {}",
                    self.api.host,
                    self.api.port,
                    e
                )
            })
    }

    /// Fresh security context for one request. No timestamp is set, so the
    /// initializer stamps the current time.
    pub fn security_context(&self) -> SecurityContext {
        SecurityContext::new(
            self.security.consumer_key.clone(),
            self.security.domain.clone(),
        )
    }

    /// Creates a default configuration with placeholder values.
    ///
    /// This configuration is suitable for local development and testing.
    /// The placeholder credentials must be replaced before signed requests
    /// will be accepted by the platform.
    #[allow(dead_code)]
    pub fn default() -> Self {
        Self {
            security: SecurityConfig {
                consumer_key: "REPLACE_WITH_CONSUMER_KEY".to_string(),
                consumer_secret: Secret::new("REPLACE_WITH_CONSUMER_SECRET"),
                domain: "localhost".to_string(),
            },
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                cors_origins: vec!["http://localhost:3000".to_string()],
            },
            demo: DemoConfig::default(),
        }
    }
}
