//! Page rendering
//!
//! Templates are compiled into the binary. A signed request is embedded as a
//! JavaScript object literal, so its JSON is escaped to keep payload strings
//! from closing the surrounding `<script>` element.

use thiserror::Error;

use crate::init::{Service, SignedRequest};

const HOME_TEMPLATE: &str = include_str!("../../templates/home.html");
const AUTHOR_TEMPLATE: &str = include_str!("../../templates/author.html");
const ASSESS_TEMPLATE: &str = include_str!("../../templates/assess.html");
const REPORTS_TEMPLATE: &str = include_str!("../../templates/reports.html");

/// Errors produced while rendering a page.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("page '{0}' needs a signed request")]
    MissingRequest(&'static str),
    #[error("failed to serialize signed request: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Pages served by the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Author,
    Activity,
    Assess,
    Reports,
}

impl Page {
    pub fn name(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Author => "author",
            Page::Activity => "activity",
            Page::Assess => "assess",
            Page::Reports => "reports",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            Page::Home => "Assessment Init Demos",
            Page::Author => "Author API: Item List",
            Page::Activity => "Author API: Activity List",
            Page::Assess => "Items API: Standalone Assessment",
            Page::Reports => "Reports API: Activity Summary by Group",
        }
    }

    fn template(&self) -> &'static str {
        match self {
            Page::Home => HOME_TEMPLATE,
            Page::Author | Page::Activity => AUTHOR_TEMPLATE,
            Page::Assess => ASSESS_TEMPLATE,
            Page::Reports => REPORTS_TEMPLATE,
        }
    }

    /// Service whose signed request the page embeds, if any.
    pub fn service(&self) -> Option<Service> {
        match self {
            Page::Home => None,
            Page::Author | Page::Activity => Some(Service::Author),
            Page::Assess => Some(Service::Items),
            Page::Reports => Some(Service::Reports),
        }
    }
}

/// Client-side player script for a service.
pub fn player_script(service: Service) -> &'static str {
    match service {
        Service::Author => "https://authorapi.learnosity.com/?v2024.2.LTS",
        Service::Items | Service::ItemsV2 => "https://items.learnosity.com/?v2024.2.LTS",
        Service::Reports => "https://reports.learnosity.com/?v2024.2.LTS",
        Service::Questions => "https://questions.learnosity.com/?v2024.2.LTS",
        Service::DataApi => "https://data.learnosity.com/",
    }
}

/// Renders `page`, embedding `signed` when the page has a player.
///
/// # Returns
///
/// * `Ok(String)` - Complete HTML document
/// * `Err(RenderError)` - Request missing for a player page, or not serializable
pub fn render_page(page: Page, signed: Option<&SignedRequest>) -> Result<String, RenderError> {
    let Some(service) = page.service() else {
        return Ok(page.template().to_string());
    };
    let signed = signed.ok_or(RenderError::MissingRequest(page.name()))?;
    let request = script_safe_json(&serde_json::to_string(signed)?);

    Ok(page
        .template()
        .replace("{{ title }}", page.title())
        .replace("{{ script_src }}", player_script(service))
        .replace("{{ request }}", &request))
}

/// Escapes characters that could end a `<script>` element or break a JS literal.
fn script_safe_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            other => out.push(other),
        }
    }
    out
}
