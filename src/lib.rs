//! Assessment Init Service Library
//!
//! This crate signs initialization requests for an assessment platform's
//! client-side APIs (authoring, items, reports) and serves demo pages that
//! embed those signed requests. The consumer secret never leaves the process.

pub mod api;
pub mod config;
pub mod crypto;
pub mod init;
pub mod pages;
pub mod render;

// Re-export commonly used types
pub use config::{ApiConfig, Config, DemoConfig, SecurityConfig};
pub use crypto::{Secret, SignatureVersion};
pub use init::{
    initialize, initialize_data_api, initialize_request, verify, InitError, SecurityContext,
    Service, ServiceRequest, SignedRequest,
};
