//! Request and response types for the health tool group.
use chrono::{DateTime, SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::server::runtime::{SERVER_DESCRIPTION, SERVER_NAME, SERVER_VERSION};

/// Health state reported by `health_check`. Only one state exists: a server
/// that can answer is healthy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
}

/// Output of `health_check`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: HealthState,
    pub server: String,
    pub version: String,
    /// RFC 3339 / ISO-8601, UTC, millisecond precision.
    pub timestamp: String,
}

impl HealthStatus {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            status: HealthState::Healthy,
            server: SERVER_NAME.to_string(),
            version: SERVER_VERSION.to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Input for `get_server_info`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ServerInfoRequest {
    /// Include detailed capability information
    #[serde(default)]
    pub verbose: Option<bool>,
}

/// Static capability flags; not derived from the registered tool set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapabilityFlags {
    pub tools: bool,
    pub resources: bool,
    pub prompts: bool,
}

pub const STATIC_CAPABILITIES: CapabilityFlags = CapabilityFlags {
    tools: true,
    resources: false,
    prompts: false,
};

/// Output of `get_server_info`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfoPayload {
    pub name: String,
    pub version: String,
    pub description: String,
    pub tool_groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<CapabilityFlags>,
}

impl ServerInfoPayload {
    pub fn new(tool_groups: Vec<String>, verbose: bool) -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: SERVER_VERSION.to_string(),
            description: SERVER_DESCRIPTION.to_string(),
            tool_groups,
            capabilities: verbose.then_some(STATIC_CAPABILITIES),
        }
    }
}
