//! Request Signing Utility
//!
//! Signs a JSON payload for one of the platform services using the credentials
//! from the service configuration, and prints the signed request.
//!
//! ## Usage
//!
//! ```bash
//! # Sign an author request
//! cargo run --bin sign_request -- author payload.json
//!
//! # Pin the timestamp, sign a data API call with an action
//! cargo run --bin sign_request -- data_api payload.json --timestamp 20240101-0000 --action get
//!
//! # Check a previously signed request
//! cargo run --bin sign_request -- --verify signed.json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;

use assessment_init::config::Config;
use assessment_init::init::{self, DataAction, InitError, Service, SignedRequest};

#[derive(Parser, Debug)]
#[command(
    name = "sign_request",
    author,
    version,
    about = "Sign a JSON payload for a platform service, or verify a signed request"
)]
struct Args {
    /// Service to sign for (author, items, reports, items_v2, questions, data_api)
    #[arg(required_unless_present = "verify")]
    service: Option<String>,

    /// JSON file holding the payload to sign
    #[arg(required_unless_present = "verify")]
    payload: Option<PathBuf>,

    /// Fixed timestamp (YYYYMMDD-HHMM, UTC) instead of the current time
    #[arg(long, value_name = "YYYYMMDD-HHMM")]
    timestamp: Option<String>,

    /// Data API action (get, set, update, delete)
    #[arg(long, value_parser = parse_action)]
    action: Option<DataAction>,

    /// Verify a previously signed request instead of signing
    #[arg(
        long,
        value_name = "signed.json",
        conflicts_with_all = ["service", "payload", "timestamp", "action"]
    )]
    verify: Option<PathBuf>,
}

fn parse_action(s: &str) -> Result<DataAction, InitError> {
    s.parse()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = Config::load()?;

    if let Some(path) = &args.verify {
        return verify_file(&config, path);
    }

    let (Some(service), Some(payload_path)) = (&args.service, &args.payload) else {
        // clap enforces both positionals unless --verify is given
        anyhow::bail!("service and payload are required");
    };

    let content = std::fs::read_to_string(payload_path)
        .with_context(|| format!("Failed to read payload '{}'", payload_path.display()))?;
    let payload: Value = serde_json::from_str(&content)?;

    let mut security = config.security_context();
    if let Some(timestamp) = &args.timestamp {
        security = security.with_timestamp(timestamp.clone());
    }

    let secret = &config.security.consumer_secret;
    let signed = match args.action {
        Some(action) => {
            if service.parse::<Service>()? != Service::DataApi {
                anyhow::bail!("--action is only valid for the data_api service");
            }
            init::initialize_data_api(&security, secret, &payload, action)?
        }
        None => init::initialize(service, &security, secret, &payload)?,
    };

    println!("{}", serde_json::to_string_pretty(&signed)?);
    Ok(())
}

fn verify_file(config: &Config, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read signed request '{}'", path.display()))?;
    let signed: SignedRequest = serde_json::from_str(&content)?;
    if init::verify(&signed, &config.security.consumer_secret) {
        println!("Signature is valid");
        return Ok(());
    }
    anyhow::bail!("Signature does not match")
}
