//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A stored short link.
///
/// Everything except `clicks` is fixed at insertion. `clicks` only grows,
/// one step per successful redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub domain: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
}

impl Link {
    pub fn new(
        id: i64,
        code: String,
        original_url: String,
        domain: String,
        created_at: DateTime<Utc>,
        clicks: i64,
    ) -> Self {
        Self {
            id,
            code,
            original_url,
            domain,
            created_at,
            clicks,
        }
    }

    /// Public URL under which this link is served.
    pub fn short_url(&self) -> String {
        short_url(&self.domain, &self.code)
    }
}

/// Builds the public short URL for `code` served under `domain`.
///
/// Always uses HTTPS.
pub fn short_url(domain: &str, code: &str) -> String {
    format!("https://{}/{}", domain.trim_end_matches('/'), code)
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub original_url: String,
    pub domain: String,
}
