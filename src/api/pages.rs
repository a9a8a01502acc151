//! Page handlers
//!
//! Each handler builds its page payload, signs it with a fresh security context
//! and renders the page. Nothing is shared between requests except the
//! immutable [`PageContext`].

use std::sync::Arc;

use tracing::{error, info};
use warp::Filter;

use super::generic::{BadRequestRejection, InitRejection, RenderRejection};
use crate::config::Config;
use crate::init::{self, ServiceRequest};
use crate::pages::{self, Learner};
use crate::render::{self, Page};

/// Immutable state handed to every page handler.
#[derive(Debug)]
pub struct PageContext {
    pub config: Config,
    pub learner: Learner,
}

/// Injects the page context into handlers.
pub fn with_context(
    context: Arc<PageContext>,
) -> impl Filter<Extract = (Arc<PageContext>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || context.clone())
}

/// Handler for `GET /`.
pub async fn home_handler() -> Result<impl warp::Reply, warp::Rejection> {
    let html = render::render_page(Page::Home, None).map_err(|e| {
        error!("Failed to render home page: {}", e);
        warp::reject::custom(RenderRejection(e.to_string()))
    })?;
    Ok(warp::reply::html(html))
}

/// Handler for `GET /author` (item list).
pub async fn author_handler(
    context: Arc<PageContext>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let request = pages::author_item_list(&context.config.demo.author);
    signed_page(&context, Page::Author, &request)
}

/// Handler for `GET /activity` (activity list).
pub async fn activity_handler(
    context: Arc<PageContext>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let request = pages::author_activity_list(&context.config.demo.author);
    signed_page(&context, Page::Activity, &request)
}

/// Percent-decodes the `:activity_id` path segment.
///
/// `/assess/my%20quiz` yields `my quiz`. A segment that does not decode to
/// UTF-8 is rejected with 400.
pub async fn decode_activity_id(raw: String) -> Result<Option<String>, warp::Rejection> {
    match urlencoding::decode(&raw) {
        Ok(decoded) => Ok(Some(decoded.into_owned())),
        Err(e) => {
            error!("Activity id '{}' is not valid UTF-8: {}", raw, e);
            Err(warp::reject::custom(BadRequestRejection(format!(
                "activity id is not valid UTF-8: {}",
                raw
            ))))
        }
    }
}

/// Handler for `GET /assess/:activity_id` and `GET /assess`.
///
/// # Arguments
///
/// * `activity_id` - Activity from the path; the configured default when absent
/// * `context` - Page context
pub async fn assess_handler(
    activity_id: Option<String>,
    context: Arc<PageContext>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let activity_id = activity_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| context.config.demo.default_activity_id.clone());
    info!("Serving assessment for activity {}", activity_id);

    let request = pages::standalone_assessment(&context.learner, &activity_id);
    signed_page(&context, Page::Assess, &request)
}

/// Handler for `GET /reports`.
pub async fn reports_handler(
    context: Arc<PageContext>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let request = pages::activity_summary_report(&context.config.demo.reports_dataset_id);
    signed_page(&context, Page::Reports, &request)
}

fn signed_page(
    context: &PageContext,
    page: Page,
    request: &ServiceRequest,
) -> Result<warp::reply::Html<String>, warp::Rejection> {
    let security = context.config.security_context();
    let secret = &context.config.security.consumer_secret;
    let signed = init::initialize_request(&security, secret, request).map_err(|e| {
        error!("Failed to initialize {} request: {}", request.service(), e);
        warp::reject::custom(InitRejection(e))
    })?;

    let html = render::render_page(page, Some(&signed)).map_err(|e| {
        error!("Failed to render {} page: {}", page.name(), e);
        warp::reject::custom(RenderRejection(e.to_string()))
    })?;
    Ok(warp::reply::html(html))
}
