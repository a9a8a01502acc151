//! Assessment Init Service
//!
//! Serves demo pages for an assessment platform's client-side APIs. Each page
//! request builds its payload, signs it with the configured consumer key and
//! secret, and embeds the signed request in the rendered HTML.
//!
//! ## Overview
//!
//! - `/author` and `/activity` load the authoring API (item list, activity list)
//! - `/assess/:activity_id` loads a standalone assessment
//! - `/reports` loads an activity summary report
//!
//! ## Security Model
//!
//! Only the signature derived from the consumer secret is sent to the browser.

use anyhow::Result;
use tracing::info;

use assessment_init::api::ApiServer;
use assessment_init::config::{Config, CONFIG_PATH_ENV};
use assessment_init::pages::Learner;

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

/// Main application entry point.
///
/// This function:
/// 1. Initializes logging and tracing
/// 2. Loads configuration from TOML file (plus environment overrides)
/// 3. Generates the learner identity used by the assessment page
/// 4. Starts the HTTP server and runs until shutdown
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured logging for debugging and monitoring
    tracing_subscriber::fmt::init();

    info!("Starting Assessment Init Service");

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("Assessment Init Service");
        println!();
        println!("Usage: assessment-init [OPTIONS]");
        println!();
        println!("Options:");
        println!("  --config <path>   Use custom config file path");
        println!("  --help, -h        Show this help message");
        println!();
        println!("Environment variables:");
        println!("  SERVICE_CONFIG_PATH        Path to config file (default config/service.toml)");
        println!("  SERVICE_CONSUMER_KEY       Overrides security.consumer_key");
        println!("  SERVICE_CONSUMER_SECRET    Overrides security.consumer_secret");
        println!("  SERVICE_DOMAIN             Overrides security.domain");
        return Ok(());
    }

    if let Some(path) = config_path_arg(&args) {
        std::env::set_var(CONFIG_PATH_ENV, &path);
        info!("Using custom config: {}", path);
    }

    let config = Config::load()?;
    info!(
        "Configuration loaded successfully (domain: {})",
        config.security.domain
    );

    let learner = Learner::generate();
    info!(
        "Learner {} assigned session {}",
        learner.user_id, learner.session_id
    );

    let api_server = ApiServer::new(config, learner);

    // Run the service (this blocks until shutdown)
    api_server.run().await?;

    Ok(())
}

/// Value following `--config`, if any.
fn config_path_arg(args: &[String]) -> Option<String> {
    args.iter()
        .position(|arg| arg == "--config")
        .and_then(|i| args.get(i + 1))
        .cloned()
}
