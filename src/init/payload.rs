//! Typed request payloads, one shape per service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::service::{DataAction, Service};

// ============================================================================
// AUTHOR API
// ============================================================================

/// Author API view mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorMode {
    ItemList,
    ItemEdit,
    ActivityList,
    ActivityEdit,
}

/// User shown as the author in the authoring UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorUser {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

/// Author API request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRequest {
    pub mode: AuthorMode,
    /// Item or activity reference, for the edit modes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Authoring UI configuration, passed through as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthorUser>,
}

// ============================================================================
// ITEMS API
// ============================================================================

/// How the assessment player is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderingType {
    /// Complete standalone player with navigation
    Assess,
    /// Items embedded into the host page
    Inline,
}

/// Where learner responses are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    SubmitPractice,
    LocalPractice,
    NoSave,
}

/// Initial state of an assessment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Initial,
    Resume,
    Review,
}

/// Items API request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsRequest {
    pub user_id: String,
    /// Activity to load from the item bank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_template_id: Option<String>,
    pub session_id: String,
    /// Groups sessions for reporting
    pub activity_id: String,
    pub rendering_type: RenderingType,
    #[serde(rename = "type")]
    pub session_type: SessionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<SessionState>,
}

// ============================================================================
// REPORTS API
// ============================================================================

/// A single report on a reports page.
///
/// Only `id` and `type` are common to every report type; everything else is
/// report specific and kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDefinition {
    pub id: String,
    #[serde(rename = "type")]
    pub report_type: String,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

/// Reports API request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportsRequest {
    pub reports: Vec<ReportDefinition>,
}

// ============================================================================
// TAGGED UNION
// ============================================================================

/// A request payload keyed by the service it is meant for.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceRequest {
    Author(AuthorRequest),
    Items(ItemsRequest),
    ItemsV2(ItemsRequest),
    Reports(ReportsRequest),
    Questions(Map<String, Value>),
    DataApi {
        action: Option<DataAction>,
        request: Map<String, Value>,
    },
}

impl ServiceRequest {
    pub fn service(&self) -> Service {
        match self {
            ServiceRequest::Author(_) => Service::Author,
            ServiceRequest::Items(_) => Service::Items,
            ServiceRequest::ItemsV2(_) => Service::ItemsV2,
            ServiceRequest::Reports(_) => Service::Reports,
            ServiceRequest::Questions(_) => Service::Questions,
            ServiceRequest::DataApi { .. } => Service::DataApi,
        }
    }

    pub fn action(&self) -> Option<DataAction> {
        match self {
            ServiceRequest::DataApi { action, .. } => *action,
            _ => None,
        }
    }

    /// Serializes the payload to the JSON value that gets signed.
    pub fn to_payload(&self) -> Result<Value, serde_json::Error> {
        match self {
            ServiceRequest::Author(request) => serde_json::to_value(request),
            ServiceRequest::Items(request) | ServiceRequest::ItemsV2(request) => {
                serde_json::to_value(request)
            }
            ServiceRequest::Reports(request) => serde_json::to_value(request),
            ServiceRequest::Questions(request) => Ok(Value::Object(request.clone())),
            ServiceRequest::DataApi { request, .. } => Ok(Value::Object(request.clone())),
        }
    }
}
