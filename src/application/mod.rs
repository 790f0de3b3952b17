//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls and business rules and give HTTP
//! handlers and the admin CLI a small API to call.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short code allocation
//! - [`services::redirect_service::RedirectService`] - Code resolution with click accounting
//! - [`services::stats_service::StatsService`] - Aggregate statistics

pub mod services;
