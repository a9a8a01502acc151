//! Test module organization
//!
//! This module re-exports test helpers for use in test files.

mod helpers;

#[allow(unused_imports)]
pub use helpers::{
    build_test_config, build_test_security_context, test_secret, DUMMY_ACTIVITY_ID, DUMMY_DOMAIN,
    DUMMY_PUBLIC_KEY, DUMMY_SECRET, DUMMY_SESSION_ID, DUMMY_TIMESTAMP, DUMMY_USER_ID,
};
