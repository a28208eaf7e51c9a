//! Configuration types.

use serde::{Deserialize, Serialize};

/// Filter names accepted for `timeline.default_filter`.
pub const TIMELINE_FILTERS: [&str; 4] = ["all", "status", "edit", "view"];

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CasebookConfig {
    /// Case API connection.
    pub api: ApiConfig,
    /// Timeline rendering.
    pub timeline: TimelineSettings,
}

/// Case API connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the case API, without the `/api` suffix.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Timeline rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Filter applied when none is given on the command line.
    pub default_filter: String,
    /// Actor shown when a record has no name attached.
    pub unknown_actor: String,
    /// Prefix of the note line under a status change.
    pub note_prefix: String,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            default_filter: "all".to_string(),
            unknown_actor: "Unknown".to_string(),
            note_prefix: "Note: ".to_string(),
        }
    }
}
