//! Supported client-side API surfaces

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::InitError;

/// One of the platform's client-facing APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    Author,
    Items,
    Reports,
    ItemsV2,
    Questions,
    DataApi,
}

impl Service {
    pub const ALL: [Service; 6] = [
        Service::Author,
        Service::Items,
        Service::Reports,
        Service::ItemsV2,
        Service::Questions,
        Service::DataApi,
    ];

    /// Wire name of the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Author => "author",
            Service::Items => "items",
            Service::Reports => "reports",
            Service::ItemsV2 => "items_v2",
            Service::Questions => "questions",
            Service::DataApi => "data_api",
        }
    }

    /// Whether a top-level `user_id` in the payload is bound into the security block.
    pub fn binds_user_id(&self) -> bool {
        matches!(self, Service::Items | Service::ItemsV2)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Service {
    type Err = InitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Service::ALL
            .iter()
            .copied()
            .find(|service| service.as_str() == s)
            .ok_or_else(|| InitError::UnsupportedService(s.to_string()))
    }
}

/// Action carried by data API requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataAction {
    Get,
    Set,
    Update,
    Delete,
}

impl DataAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataAction::Get => "get",
            DataAction::Set => "set",
            DataAction::Update => "update",
            DataAction::Delete => "delete",
        }
    }
}

impl FromStr for DataAction {
    type Err = InitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "get" => Ok(DataAction::Get),
            "set" => Ok(DataAction::Set),
            "update" => Ok(DataAction::Update),
            "delete" => Ok(DataAction::Delete),
            other => Err(InitError::InvalidConfiguration(format!(
                "unknown data API action '{}'",
                other
            ))),
        }
    }
}
