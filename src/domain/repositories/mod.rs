//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access. Concrete implementations live in
//! `crate::infrastructure::persistence`; mocks are generated with `mockall`
//! for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Link existence, insertion, click accounting and
//!   allocation transactions ([`LinkTransaction`])
//! - [`StatsRepository`] - Aggregate statistics

pub mod link_repository;
pub mod stats_repository;

pub use link_repository::{LinkRepository, LinkTransaction};
pub use stats_repository::StatsRepository;

#[cfg(test)]
pub use link_repository::{MockLinkRepository, MockLinkTransaction};
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
