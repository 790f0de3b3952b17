//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::application::services::{LinkService, RedirectService, StatsService};
use crate::infrastructure::persistence::{SqliteLinkRepository, SqliteStatsRepository};
use crate::utils::code_generator::RandomCodeGenerator;

pub type AppLinkService = LinkService<SqliteLinkRepository, RandomCodeGenerator>;
pub type AppRedirectService = RedirectService<SqliteLinkRepository>;
pub type AppStatsService = StatsService<SqliteStatsRepository>;

/// Request deadlines per endpoint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationTimeouts {
    pub shorten: Duration,
    pub redirect: Duration,
    pub stats: Duration,
}

impl Default for OperationTimeouts {
    fn default() -> Self {
        Self {
            shorten: Duration::from_secs(3),
            redirect: Duration::from_secs(2),
            stats: Duration::from_secs(5),
        }
    }
}

/// Cheaply cloneable handle to the services. The pool is owned by the
/// server and shared with the repositories.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<AppLinkService>,
    pub redirect_service: Arc<AppRedirectService>,
    pub stats_service: Arc<AppStatsService>,
    pub timeouts: OperationTimeouts,
}

impl AppState {
    pub fn new(pool: Arc<SqlitePool>, max_attempts: u32, timeouts: OperationTimeouts) -> Self {
        let link_repository = Arc::new(SqliteLinkRepository::new(pool.clone()));
        let stats_repository = Arc::new(SqliteStatsRepository::new(pool));

        Self {
            link_service: Arc::new(LinkService::new(
                link_repository.clone(),
                RandomCodeGenerator::new(),
                max_attempts,
            )),
            redirect_service: Arc::new(RedirectService::new(link_repository)),
            stats_service: Arc::new(StatsService::new(stats_repository)),
            timeouts,
        }
    }
}
