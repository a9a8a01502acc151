//! Generic API structures and handlers
//!
//! This module contains the shared response envelope, custom rejections, the
//! CORS filter and the server itself. Page handlers live in `pages`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use warp::{
    http::{Method, StatusCode},
    Filter, Rejection, Reply,
};

use super::pages::{self, with_context, PageContext};
use crate::config::Config;
use crate::init::InitError;
use crate::pages::Learner;

// ============================================================================
// SHARED RESPONSE STRUCTURES
// ============================================================================

/// Standardized response structure for JSON endpoints and errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    pub data: Option<T>,
    /// Error message (if failed)
    pub error: Option<String>,
}

// ============================================================================
// CUSTOM REJECTION TYPES
// ============================================================================

/// Request could not be initialized (bad credentials or unknown service).
#[derive(Debug)]
pub struct InitRejection(pub InitError);

impl warp::reject::Reject for InitRejection {}

/// Page could not be rendered.
#[derive(Debug)]
pub struct RenderRejection(pub String);

impl warp::reject::Reject for RenderRejection {}

/// Request path could not be interpreted.
#[derive(Debug)]
pub struct BadRequestRejection(pub String);

impl warp::reject::Reject for BadRequestRejection {}

// ============================================================================
// CORS CONFIGURATION
// ============================================================================

/// Creates a CORS filter based on the configured allowed origins.
fn create_cors_filter(allowed_origins: &[String]) -> warp::cors::Builder {
    let methods = vec![Method::GET, Method::OPTIONS];

    if allowed_origins.iter().any(|origin| origin == "*") {
        warp::cors()
            .allow_any_origin()
            .allow_methods(methods)
            .allow_headers(vec!["content-type"])
    } else {
        let origins: Vec<&str> = allowed_origins.iter().map(|s| s.as_str()).collect();
        warp::cors()
            .allow_origins(origins)
            .allow_methods(methods)
            .allow_headers(vec!["content-type"])
    }
}

// ============================================================================
// REJECTION HANDLER
// ============================================================================

/// Global rejection handler for all routes.
///
/// Malformed path parameters map to 400. Initialization and rendering
/// failures are configuration problems and map to 500; they are not worth
/// retrying.
///
/// # Arguments
///
/// * `rej` - The warp rejection to handle
///
/// # Returns
///
/// A warp reply with an error response
pub async fn handle_rejection(rej: Rejection) -> Result<impl Reply, std::convert::Infallible> {
    let (status, message) = if let Some(err) = rej.find::<BadRequestRejection>() {
        (StatusCode::BAD_REQUEST, err.0.clone())
    } else if let Some(err) = rej.find::<InitRejection>() {
        (StatusCode::INTERNAL_SERVER_ERROR, err.0.to_string())
    } else if let Some(err) = rej.find::<RenderRejection>() {
        (StatusCode::INTERNAL_SERVER_ERROR, err.0.clone())
    } else if rej.is_not_found() {
        (StatusCode::NOT_FOUND, "Endpoint not found".to_string())
    } else if rej.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else {
        error!("Unhandled rejection: {:?}", rej);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(message),
        }),
        status,
    ))
}

// ============================================================================
// API SERVER IMPLEMENTATION
// ============================================================================

/// HTTP server for the demo pages.
pub struct ApiServer {
    /// Configuration and learner identity shared (read-only) by all handlers
    context: Arc<PageContext>,
}

impl ApiServer {
    /// Creates a new server.
    ///
    /// # Arguments
    ///
    /// * `config` - Service configuration
    /// * `learner` - Learner identity used by the assessment page
    ///
    /// # Returns
    ///
    /// A new API server instance
    pub fn new(config: Config, learner: Learner) -> Self {
        Self {
            context: Arc::new(PageContext { config, learner }),
        }
    }

    /// Starts the server and handles HTTP requests until shutdown.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Server stopped
    /// * `Err(anyhow::Error)` - Invalid bind address
    pub async fn run(&self) -> Result<()> {
        let addr = self.context.config.socket_addr()?;
        info!("Starting API server on {}", addr);

        let routes = self.create_routes();
        warp::serve(routes).run(addr).await;

        Ok(())
    }

    /// Creates all routes for the server.
    ///
    /// # Returns
    ///
    /// A warp filter containing all routes
    pub(crate) fn create_routes(
        &self,
    ) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
        let context = self.context.clone();

        // Health check endpoint - returns service status
        let health = warp::path("health").and(warp::path::end()).and(warp::get()).map(|| {
            warp::reply::json(&ApiResponse::<String> {
                success: true,
                data: Some("Assessment init service is running".to_string()),
                error: None,
            })
        });

        // GET / - links to the demos
        let home = warp::path::end()
            .and(warp::get())
            .and_then(pages::home_handler);

        // GET /author - item list
        let author = warp::path("author")
            .and(warp::path::end())
            .and(warp::get())
            .and(with_context(context.clone()))
            .and_then(pages::author_handler);

        // GET /activity - activity list
        let activity = warp::path("activity")
            .and(warp::path::end())
            .and(warp::get())
            .and(with_context(context.clone()))
            .and_then(pages::activity_handler);

        // GET /assess/:activity_id - standalone assessment for the given activity
        let assess_activity = warp::path("assess")
            .and(warp::path::param::<String>())
            .and(warp::path::end())
            .and(warp::get())
            .and_then(pages::decode_activity_id)
            .and(with_context(context.clone()))
            .and_then(pages::assess_handler);

        // GET /assess - standalone assessment for the default activity
        let assess_default = warp::path("assess")
            .and(warp::path::end())
            .and(warp::get())
            .map(|| None::<String>)
            .and(with_context(context.clone()))
            .and_then(pages::assess_handler);

        // GET /reports - activity summary report
        let reports = warp::path("reports")
            .and(warp::path::end())
            .and(warp::get())
            .and(with_context(context))
            .and_then(pages::reports_handler);

        health
            .or(home)
            .or(author)
            .or(activity)
            .or(assess_activity)
            .or(assess_default)
            .or(reports)
            .with(create_cors_filter(&self.context.config.api.cors_origins))
            .recover(handle_rejection)
    }

    /// Public method for testing - exposes routes for integration tests
    #[allow(dead_code)] // Used by tests
    pub fn test_routes(
        &self,
    ) -> impl Filter<Extract = impl warp::Reply, Error = std::convert::Infallible> + Clone {
        self.create_routes()
    }
}
