//! Unit tests for the demo page payloads
//!
//! These tests check the literal payloads each page sends for signing.

use assessment_init::config::DemoConfig;
use assessment_init::init::{Service, ServiceRequest};
use assessment_init::pages::{self, Learner, ASSESSMENT_NAME};

#[path = "mod.rs"]
mod test_helpers;
use test_helpers::{DUMMY_ACTIVITY_ID, DUMMY_SESSION_ID, DUMMY_USER_ID};

fn dummy_learner() -> Learner {
    Learner {
        user_id: DUMMY_USER_ID.to_string(),
        session_id: DUMMY_SESSION_ID.to_string(),
    }
}

/// What is tested: Author item list payload
/// Why: The authoring page must open in item_list mode with editing enabled
#[test]
fn test_author_item_list_payload() {
    let demo = DemoConfig::default();
    let request = pages::author_item_list(&demo.author);
    assert_eq!(request.service(), Service::Author);

    let payload = request.to_payload().unwrap();
    assert_eq!(payload["mode"], "item_list");
    assert_eq!(payload["user"]["id"], "demos-site");
    assert_eq!(payload["config"]["item_edit"]["item"]["reference"]["edit"], true);
    assert_eq!(payload["config"]["item_edit"]["item"]["enable_audio_recording"], true);
}

/// What is tested: Author item editor enables shared passages under the correctly spelled key
/// Why: The player ignores unknown keys, so a misspelling would silently disable the option
#[test]
fn test_author_item_list_enables_shared_passage() {
    let demo = DemoConfig::default();
    let payload = pages::author_item_list(&demo.author).to_payload().unwrap();
    let item = &payload["config"]["item_edit"]["item"];

    assert_eq!(item["shared_passage"], true);
    assert!(item.get("shareed_passage").is_none());
}

/// What is tested: Author activity list payload
/// Why: The activity page uses the same user but a different mode and no config
#[test]
fn test_author_activity_list_payload() {
    let demo = DemoConfig::default();
    let payload = pages::author_activity_list(&demo.author).to_payload().unwrap();
    assert_eq!(payload["mode"], "activity_list");
    assert_eq!(payload["user"]["email"], demo.author.email);
    assert!(payload.get("config").is_none());
}

/// What is tested: Standalone assessment payload
/// Why: Session, learner and activity must line up for save/resume and reporting
#[test]
fn test_standalone_assessment_payload() {
    let request = pages::standalone_assessment(&dummy_learner(), DUMMY_ACTIVITY_ID);
    assert!(matches!(request, ServiceRequest::Items(_)));

    let payload = request.to_payload().unwrap();
    assert_eq!(payload["user_id"], DUMMY_USER_ID);
    assert_eq!(payload["session_id"], DUMMY_SESSION_ID);
    assert_eq!(payload["activity_id"], DUMMY_ACTIVITY_ID);
    assert_eq!(payload["activity_template_id"], DUMMY_ACTIVITY_ID);
    assert_eq!(payload["rendering_type"], "assess");
    assert_eq!(payload["type"], "submit_practice");
    assert_eq!(payload["name"], ASSESSMENT_NAME);
    assert_eq!(payload["state"], "initial");
}

/// What is tested: Reports payload
/// Why: The report id must match the page's container element
#[test]
fn test_activity_summary_report_payload() {
    let payload = pages::activity_summary_report("dataset-1").to_payload().unwrap();
    let report = &payload["reports"][0];

    assert_eq!(report["id"], "activity-summary-by-group-report");
    assert_eq!(report["type"], "activity-summary-by-group");
    assert_eq!(report["dataset_id"], "dataset-1");
    assert_eq!(report["always_show_group_ancestors"], true);
    assert_eq!(report["columns"].as_array().unwrap().len(), 3);
    assert_eq!(report["user_columns"][2]["elements"][2]["type"], "score_plot");
}

/// What is tested: Generated learners are unique
/// Why: Each server instance gets its own learner and session
#[test]
fn test_generated_learners_differ() {
    let a = Learner::generate();
    let b = Learner::generate();
    assert_ne!(a.user_id, b.user_id);
    assert_ne!(a.session_id, b.session_id);
    assert_ne!(a.user_id, a.session_id);
}
