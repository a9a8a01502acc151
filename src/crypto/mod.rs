//! Cryptographic Operations Module
//!
//! This module handles the request signature used by the assessment platform's
//! client-side APIs. Signatures are versioned: the version prefix is part of the
//! signature string so the platform knows which algorithm produced it.
//!
//! ## Security Requirements
//!
//! ⚠️ **CRITICAL**: The consumer secret is only ever used as an HMAC key. It must
//! never be serialized, logged, or embedded in a page.

use std::fmt;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Timestamp format expected by the platform (UTC, minute resolution).
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M";

/// Separator placed between signed fields.
const FIELD_SEPARATOR: &str = "_";

// ============================================================================
// SECRET HANDLING
// ============================================================================

/// Private consumer secret.
///
/// Deserializable from configuration, but deliberately not `Serialize`, and its
/// `Debug` output is redacted.
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// True when the secret is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

// ============================================================================
// SIGNATURE VERSIONS
// ============================================================================

/// Supported signature algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureVersion {
    /// HMAC-SHA256 keyed with the secret, lowercase hex, prefixed `$02$`.
    V02,
}

impl SignatureVersion {
    pub const CURRENT: SignatureVersion = SignatureVersion::V02;

    pub fn prefix(&self) -> &'static str {
        match self {
            SignatureVersion::V02 => "$02$",
        }
    }

    /// Detects the version from a signature string.
    pub fn detect(signature: &str) -> Option<Self> {
        if signature.starts_with(SignatureVersion::V02.prefix()) {
            Some(SignatureVersion::V02)
        } else {
            None
        }
    }

    /// Signs the given fields, joined with `_`.
    ///
    /// # Arguments
    ///
    /// * `secret` - Consumer secret used as the HMAC key
    /// * `fields` - Ordered fields to sign
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Versioned signature string
    /// * `Err(hmac::digest::InvalidLength)` - Secret cannot be used as a key
    pub fn sign(
        &self,
        secret: &Secret,
        fields: &[&str],
    ) -> Result<String, hmac::digest::InvalidLength> {
        match self {
            SignatureVersion::V02 => {
                let mut mac = HmacSha256::new_from_slice(secret.as_bytes())?;
                mac.update(fields.join(FIELD_SEPARATOR).as_bytes());
                let digest = mac.finalize().into_bytes();
                Ok(format!("{}{}", self.prefix(), hex::encode(digest)))
            }
        }
    }

    /// Verifies a signature over the given fields in constant time.
    ///
    /// Returns `false` for malformed signatures or a version mismatch.
    pub fn verify(&self, secret: &Secret, fields: &[&str], signature: &str) -> bool {
        let Some(encoded) = signature.strip_prefix(self.prefix()) else {
            return false;
        };
        let Ok(expected) = hex::decode(encoded) else {
            return false;
        };

        match self {
            SignatureVersion::V02 => {
                let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
                    return false;
                };
                mac.update(fields.join(FIELD_SEPARATOR).as_bytes());
                mac.verify_slice(&expected).is_ok()
            }
        }
    }
}

// ============================================================================
// TIMESTAMPS
// ============================================================================

/// Formats a point in time the way the platform expects it.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Current UTC time in platform format.
pub fn current_timestamp() -> String {
    format_timestamp(Utc::now())
}
