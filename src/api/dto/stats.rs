//! DTOs for the aggregate statistics endpoint.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Stats, TopLink};

/// Aggregate statistics across all links.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_clicks: i64,
    pub total_links: i64,
    pub clicks_per_domain: BTreeMap<String, i64>,
    pub links_per_domain: BTreeMap<String, i64>,
    pub top_urls: Vec<TopUrl>,
}

/// One entry of the most clicked links list.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUrl {
    pub url: String,
    pub clicks: i64,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<TopLink> for TopUrl {
    fn from(link: TopLink) -> Self {
        Self {
            url: link.original_url,
            clicks: link.clicks,
            short_code: link.code,
            created_at: link.created_at,
        }
    }
}

impl From<Stats> for StatsResponse {
    fn from(stats: Stats) -> Self {
        Self {
            total_clicks: stats.total_clicks,
            total_links: stats.total_links,
            clicks_per_domain: stats.clicks_per_domain,
            links_per_domain: stats.links_per_domain,
            top_urls: stats.top_links.into_iter().map(TopUrl::from).collect(),
        }
    }
}
