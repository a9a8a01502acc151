//! Demo page payloads
//!
//! Each function builds the literal request for one demo page. These are pure
//! data builders: signing happens in [`crate::init`], rendering in [`crate::render`].

use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::init::{
    AuthorMode, AuthorRequest, AuthorUser, ItemsRequest, RenderingType, ReportDefinition,
    ReportsRequest, ServiceRequest, SessionState, SessionType,
};

/// Display name shown in reporting for assessment sessions.
pub const ASSESSMENT_NAME: &str = "Items API Quickstart";

/// Learner identity used by the assessment page.
///
/// Generated once when the server starts and handed to the page builders
/// explicitly, so the same learner can resume the same session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Learner {
    pub user_id: String,
    pub session_id: String,
}

impl Learner {
    /// New learner with random v4 user and session ids.
    pub fn generate() -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            session_id: Uuid::new_v4().to_string(),
        }
    }
}

/// Author API item list with item editing enabled.
pub fn author_item_list(user: &AuthorUser) -> ServiceRequest {
    ServiceRequest::Author(AuthorRequest {
        mode: AuthorMode::ItemList,
        reference: None,
        config: Some(json!({
            "item_edit": {
                "item": {
                    "reference": {
                        "show": true,
                        "edit": true
                    },
                    "dynamic_content": true,
                    "shared_passage": true,
                    "enable_audio_recording": true
                }
            }
        })),
        user: Some(user.clone()),
    })
}

/// Author API activity list.
pub fn author_activity_list(user: &AuthorUser) -> ServiceRequest {
    ServiceRequest::Author(AuthorRequest {
        mode: AuthorMode::ActivityList,
        reference: None,
        config: None,
        user: Some(user.clone()),
    })
}

/// Items API standalone assessment for `activity_id`.
///
/// The activity id doubles as the template to load from the item bank.
pub fn standalone_assessment(learner: &Learner, activity_id: &str) -> ServiceRequest {
    ServiceRequest::Items(ItemsRequest {
        user_id: learner.user_id.clone(),
        activity_template_id: Some(activity_id.to_string()),
        session_id: learner.session_id.clone(),
        activity_id: activity_id.to_string(),
        rendering_type: RenderingType::Assess,
        session_type: SessionType::SubmitPractice,
        name: Some(ASSESSMENT_NAME.to_string()),
        state: Some(SessionState::Initial),
    })
}

/// Reports API activity summary grouped by district.
pub fn activity_summary_report(dataset_id: &str) -> ServiceRequest {
    let options = json!({
        "dataset_id": dataset_id,
        "group_path": [],
        "always_show_group_ancestors": true,
        "columns": [
            { "type": "group_name", "label": "District" },
            { "type": "numeric", "field": "population", "label": "# of Students" },
            {
                "type": "1d_plot",
                "label": "Results",
                "elements": [
                    ancestor_shading(),
                    median_line(),
                    {
                        "type": "whisker_plot",
                        "source": "row",
                        "min": "lowest_percent",
                        "max": "highest_percent",
                        "labels": true
                    },
                    {
                        "type": "box_plot",
                        "source": "row",
                        "min": "p25_percent",
                        "middle": "median_percent",
                        "max": "p75_percent",
                        "labels": true
                    }
                ]
            }
        ],
        "user_columns": [
            { "type": "user_id" },
            { "type": "numeric", "field": "score" },
            {
                "type": "1d_plot",
                "label": "Results",
                "elements": [
                    ancestor_shading(),
                    median_line(),
                    {
                        "type": "score_plot",
                        "shape": "circle",
                        "source": "row",
                        "percent": ["score", "max_score"]
                    }
                ]
            }
        ]
    });

    ServiceRequest::Reports(ReportsRequest {
        reports: vec![ReportDefinition {
            id: "activity-summary-by-group-report".to_string(),
            report_type: "activity-summary-by-group".to_string(),
            options: into_map(options),
        }],
    })
}

fn ancestor_shading() -> Value {
    json!({
        "type": "shading_plot",
        "source": "ancestor_1",
        "min": "p25_percent",
        "max": "p75_percent"
    })
}

fn median_line() -> Value {
    json!({
        "type": "line_plot",
        "source": "row",
        "score": 50,
        "label": false
    })
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
