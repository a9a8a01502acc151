//! Shared test helpers for unit tests
//!
//! This module provides helper functions used by unit tests.
//!
//! The module is organized into several categories:
//! - **Constants**: Dummy credentials and identifiers
//! - **Configuration Builders**: Functions to create test configurations and security contexts

use assessment_init::config::{ApiConfig, Config, DemoConfig, SecurityConfig};
use assessment_init::crypto::Secret;
use assessment_init::init::SecurityContext;

// ============================================================================
// CONSTANTS
// ============================================================================

// ----------------------------- CREDENTIALS ------------------------------

/// Dummy public consumer key
pub const DUMMY_PUBLIC_KEY: &str = "test-consumer-key";

/// Dummy consumer secret (must never show up in any output)
pub const DUMMY_SECRET: &str = "test-consumer-secret-0123456789abcdef";

/// Dummy domain
pub const DUMMY_DOMAIN: &str = "localhost";

/// Fixed timestamp so signatures are reproducible
pub const DUMMY_TIMESTAMP: &str = "20240101-1200";

// --------------------------------- IDs ----------------------------------

/// Dummy learner id
#[allow(dead_code)]
pub const DUMMY_USER_ID: &str = "00000000-0000-4000-8000-000000000001";

/// Dummy session id
#[allow(dead_code)]
pub const DUMMY_SESSION_ID: &str = "00000000-0000-4000-8000-000000000002";

/// Dummy activity id
#[allow(dead_code)]
pub const DUMMY_ACTIVITY_ID: &str = "places_to_visit";

// ============================================================================
// CONFIGURATION BUILDERS
// ============================================================================

/// Secret matching `DUMMY_SECRET`.
#[allow(dead_code)]
pub fn test_secret() -> Secret {
    Secret::new(DUMMY_SECRET)
}

/// Security context with the dummy key and domain and a pinned timestamp.
#[allow(dead_code)]
pub fn build_test_security_context() -> SecurityContext {
    SecurityContext::new(DUMMY_PUBLIC_KEY, DUMMY_DOMAIN).with_timestamp(DUMMY_TIMESTAMP)
}

/// Complete configuration with the dummy credentials.
#[allow(dead_code)]
pub fn build_test_config() -> Config {
    Config {
        security: SecurityConfig {
            consumer_key: DUMMY_PUBLIC_KEY.to_string(),
            consumer_secret: test_secret(),
            domain: DUMMY_DOMAIN.to_string(),
        },
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            cors_origins: vec!["http://localhost:3000".to_string()],
        },
        demo: DemoConfig::default(),
    }
}
