//! Unit tests for the signature scheme
//!
//! These tests verify the versioned HMAC signature independent of request shapes.

use assessment_init::crypto::{format_timestamp, Secret, SignatureVersion};
use chrono::{TimeZone, Utc};

#[path = "mod.rs"]
mod test_helpers;
use test_helpers::test_secret;

/// What is tested: V02 signature against a known HMAC-SHA256 vector
/// Why: The algorithm is an external contract and must not drift
#[test]
fn test_v02_known_vector() {
    // RFC 4231 test case 2: key "Jefe", data "what do ya want for nothing?"
    let secret = Secret::new("Jefe");
    let signature = SignatureVersion::V02
        .sign(&secret, &["what do ya want for nothing?"])
        .unwrap();
    assert_eq!(
        signature,
        "$02$5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
    );
}

/// What is tested: Fields are joined with underscores before signing
/// Why: Signing ["a", "b"] must equal signing "a_b"
#[test]
fn test_fields_joined_with_underscore() {
    let secret = test_secret();
    let split = SignatureVersion::V02.sign(&secret, &["key", "domain", "ts"]).unwrap();
    let joined = SignatureVersion::V02.sign(&secret, &["key_domain_ts"]).unwrap();
    assert_eq!(split, joined);
}

/// What is tested: verify() accepts valid and rejects altered signatures
/// Why: Verification is how a signed request is checked after the fact
#[test]
fn test_verify_round_trip_and_rejections() {
    let secret = test_secret();
    let fields = ["key", "localhost", "20240101-1200", "{}"];
    let signature = SignatureVersion::V02.sign(&secret, &fields).unwrap();

    assert!(SignatureVersion::V02.verify(&secret, &fields, &signature));
    assert!(!SignatureVersion::V02.verify(&Secret::new("other"), &fields, &signature));
    let later = ["key", "localhost", "20240101-1201", "{}"];
    assert!(!SignatureVersion::V02.verify(&secret, &later, &signature));
    assert!(!SignatureVersion::V02.verify(&secret, &fields, signature.trim_start_matches("$02$")));
    assert!(!SignatureVersion::V02.verify(&secret, &fields, "$02$not-hex"));
}

/// What is tested: Timestamps use UTC minute resolution
/// Why: The platform parses the timestamp in this exact format
#[test]
fn test_timestamp_format() {
    let at = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 1).unwrap();
    assert_eq!(format_timestamp(at), "20231231-2359");
}
