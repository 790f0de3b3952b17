//! DTOs for health check endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health check response.
///
/// Counters are omitted when the store is unreachable.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_links: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_clicks: Option<i64>,
}
