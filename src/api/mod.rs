//! HTTP Server Module
//!
//! This module provides the warp server for the service: the demo pages that
//! embed signed init requests, and a JSON health endpoint.
//!
//! ## Security Model
//!
//! Pages only ever embed the signed request. The consumer secret stays in the
//! server process.

// Generic shared code (response envelope, rejections, CORS, server)
mod generic;

// Page handlers (sign + render)
mod pages;

// Re-export ApiServer for convenience
pub use generic::ApiServer;
// Re-export ApiResponse for testing
#[allow(unused_imports)]
pub use generic::ApiResponse;
