//! Read-side statistics derived from the link table.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// Link and click counters across the whole store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkTotals {
    pub total_links: i64,
    pub total_clicks: i64,
}

/// Click and link counts for one serving domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainStats {
    pub domain: String,
    pub clicks: i64,
    pub links: i64,
}

/// A link ranked by its click count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopLink {
    pub code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

/// Raw aggregate as read from the store in a single read transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkAggregate {
    pub totals: LinkTotals,
    pub domains: Vec<DomainStats>,
    pub top_links: Vec<TopLink>,
}

/// Statistics snapshot served to clients.
///
/// Advisory only: it may trail concurrent writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    pub total_links: i64,
    pub total_clicks: i64,
    pub clicks_per_domain: BTreeMap<String, i64>,
    pub links_per_domain: BTreeMap<String, i64>,
    pub top_links: Vec<TopLink>,
}

impl From<LinkAggregate> for Stats {
    fn from(aggregate: LinkAggregate) -> Self {
        let mut clicks_per_domain = BTreeMap::new();
        let mut links_per_domain = BTreeMap::new();

        for d in aggregate.domains {
            clicks_per_domain.insert(d.domain.clone(), d.clicks);
            links_per_domain.insert(d.domain, d.links);
        }

        Self {
            total_links: aggregate.totals.total_links,
            total_clicks: aggregate.totals.total_clicks,
            clicks_per_domain,
            links_per_domain,
            top_links: aggregate.top_links,
        }
    }
}
