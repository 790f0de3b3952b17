//! Core domain entities.
//!
//! - [`Link`] - A shortened URL mapping and its click counter
//! - [`Stats`] - Aggregated counters derived from the link table
//!
//! Creation inputs use a separate struct ([`NewLink`]).

pub mod link;
pub mod stats;

pub use link::{Link, NewLink, short_url};
pub use stats::{DomainStats, LinkAggregate, LinkTotals, Stats, TopLink};
