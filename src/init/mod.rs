//! Request Initializer Module
//!
//! Turns a service selector, security context and payload into a signed request
//! that is safe to embed in a client-side page. The initializer is stateless:
//! every call builds a fresh signature, and nothing is cached between calls.
//!
//! ## Security Requirements
//!
//! ⚠️ **CRITICAL**: The secret is only used to compute the signature. It never
//! appears in a [`SignedRequest`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::crypto::{self, Secret, SignatureVersion};

mod payload;
mod service;

pub use payload::{
    AuthorMode, AuthorRequest, AuthorUser, ItemsRequest, RenderingType, ReportDefinition,
    ReportsRequest, ServiceRequest, SessionState, SessionType,
};
pub use service::{DataAction, Service};

// ============================================================================
// ERRORS
// ============================================================================

/// Errors produced while initializing a request.
///
/// Both kinds are configuration problems: retrying the same call cannot succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InitError {
    /// Required security fields are missing or empty, or the payload is unusable
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The API selector is not one of the known services
    #[error("unsupported service '{0}'")]
    UnsupportedService(String),
}

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Public half of the credentials plus the domain a request is valid for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityContext {
    pub public_key: String,
    pub domain: String,
    /// Explicit timestamp; current time is used when absent
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl SecurityContext {
    pub fn new(public_key: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            domain: domain.into(),
            timestamp: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// Security block of a signed request, as sent to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Security {
    #[serde(rename = "consumer_key")]
    pub public_key: String,
    pub domain: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub signature: String,
}

/// A payload together with its time-bound signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedRequest {
    pub security: Security,
    /// The original, unsigned payload
    pub request: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<DataAction>,
    /// Unsigned client-side options handed to the player alongside the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

impl SignedRequest {
    pub fn with_config(mut self, config: Value) -> Self {
        self.config = Some(config);
        self
    }
}

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Signs an untyped payload for the named service.
///
/// # Arguments
///
/// * `service` - Wire name of the service (e.g. `"author"`, `"items"`)
/// * `security` - Public key, domain and optional timestamp
/// * `secret` - Consumer secret used as the signing key
/// * `payload` - Service-specific JSON object
///
/// # Returns
///
/// * `Ok(SignedRequest)` - Signed request ready for the client
/// * `Err(InitError)` - Unknown service or incomplete security configuration
pub fn initialize(
    service: &str,
    security: &SecurityContext,
    secret: &Secret,
    payload: &Value,
) -> Result<SignedRequest, InitError> {
    let service: Service = service.parse()?;
    sign_payload(service, security, secret, payload.clone(), None)
}

/// Signs a typed payload. The service is taken from the request variant.
pub fn initialize_request(
    security: &SecurityContext,
    secret: &Secret,
    request: &ServiceRequest,
) -> Result<SignedRequest, InitError> {
    let payload = request.to_payload().map_err(|e| {
        InitError::InvalidConfiguration(format!("request payload is not serializable: {}", e))
    })?;
    sign_payload(request.service(), security, secret, payload, request.action())
}

/// Signs a payload for a data API call with an explicit action.
pub fn initialize_data_api(
    security: &SecurityContext,
    secret: &Secret,
    payload: &Value,
    action: DataAction,
) -> Result<SignedRequest, InitError> {
    sign_payload(Service::DataApi, security, secret, payload.clone(), Some(action))
}

/// Checks a signed request against the secret.
///
/// Returns `false` when any signed field (key, domain, timestamp, user id,
/// payload, action) has been altered or the signature has an unknown version.
///
/// The signed fields are joined with an unescaped `_`, as the platform's `$02$`
/// format requires. A key or domain that contains `_` is therefore ambiguous:
/// key `k_x` with domain `localhost` signs the same string as key `k` with
/// domain `x_localhost`, and moving the `_` across that boundary still
/// verifies. Callers that need to tell such requests apart must check the key
/// and domain against their own records.
pub fn verify(signed: &SignedRequest, secret: &Secret) -> bool {
    let Some(version) = SignatureVersion::detect(&signed.security.signature) else {
        return false;
    };
    let request_json = canonical_json(&signed.request);
    let fields = signing_fields(&signed.security, &request_json, signed.action);
    version.verify(secret, &fields, &signed.security.signature)
}

fn sign_payload(
    service: Service,
    security: &SecurityContext,
    secret: &Secret,
    payload: Value,
    action: Option<DataAction>,
) -> Result<SignedRequest, InitError> {
    validate_security(security, secret)?;

    if !payload.is_object() {
        return Err(InitError::InvalidConfiguration(
            "request payload must be a JSON object".to_string(),
        ));
    }

    let timestamp = security
        .timestamp
        .clone()
        .unwrap_or_else(crypto::current_timestamp);

    let user_id = if service.binds_user_id() {
        payload
            .get("user_id")
            .and_then(Value::as_str)
            .map(str::to_string)
    } else {
        None
    };

    let mut block = Security {
        public_key: security.public_key.clone(),
        domain: security.domain.clone(),
        timestamp,
        user_id,
        signature: String::new(),
    };

    let request_json = canonical_json(&payload);
    let fields = signing_fields(&block, &request_json, action);
    let signature = SignatureVersion::CURRENT.sign(secret, &fields).map_err(|_| {
        InitError::InvalidConfiguration("secret cannot be used as a signing key".to_string())
    })?;
    block.signature = signature;

    debug!(
        "Signed {} request for domain {} at {}",
        service, block.domain, block.timestamp
    );

    Ok(SignedRequest {
        security: block,
        request: payload,
        action,
        config: None,
    })
}

fn validate_security(security: &SecurityContext, secret: &Secret) -> Result<(), InitError> {
    if security.public_key.trim().is_empty() {
        return Err(InitError::InvalidConfiguration(
            "public key must not be empty".to_string(),
        ));
    }
    if security.domain.trim().is_empty() {
        return Err(InitError::InvalidConfiguration(
            "domain must not be empty".to_string(),
        ));
    }
    if secret.is_blank() {
        return Err(InitError::InvalidConfiguration(
            "secret must not be empty".to_string(),
        ));
    }
    if let Some(timestamp) = &security.timestamp {
        if timestamp.trim().is_empty() {
            return Err(InitError::InvalidConfiguration(
                "timestamp, when supplied, must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

/// Fields covered by the signature, in order.
fn signing_fields<'a>(
    security: &'a Security,
    request_json: &'a str,
    action: Option<DataAction>,
) -> Vec<&'a str> {
    let mut fields = vec![
        security.public_key.as_str(),
        security.domain.as_str(),
        security.timestamp.as_str(),
    ];
    if let Some(user_id) = &security.user_id {
        fields.push(user_id.as_str());
    }
    fields.push(request_json);
    if let Some(action) = action {
        fields.push(action.as_str());
    }
    fields
}

/// Compact JSON with object keys sorted at every depth.
fn canonical_json(value: &Value) -> String {
    canonicalize(value).to_string()
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}
