//! Application state - Dependency injection container.

use std::sync::Arc;

use mockable::Clock;

use crate::config::Config;
use crate::domain::ValidationContext;
use crate::infra::{Database, UserRepository, UserStore};
use crate::services::{UserManager, UserService};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Source of "now" for request validation
    pub clock: Arc<dyn Clock>,
    /// Database connection, absent when running on in-memory storage
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Wire the PostgreSQL-backed service stack.
    pub fn from_config(database: Arc<Database>, clock: Arc<dyn Clock>, config: &Config) -> Self {
        let repo: Arc<dyn UserRepository> = Arc::new(UserStore::new(database.get_connection()));
        let user_service = Arc::new(UserManager::new(repo, clock.clone(), config.age_requirement));

        Self {
            user_service,
            clock,
            database: Some(database),
        }
    }

    /// Wire the service stack over an arbitrary repository, without a database.
    pub fn with_repository(
        repo: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
        age_requirement: u32,
    ) -> Self {
        let user_service = Arc::new(UserManager::new(repo, clock.clone(), age_requirement));
        Self::new(user_service, clock, None)
    }

    /// Create new application state with manually injected services.
    pub fn new(
        user_service: Arc<dyn UserService>,
        clock: Arc<dyn Clock>,
        database: Option<Arc<Database>>,
    ) -> Self {
        Self {
            user_service,
            clock,
            database,
        }
    }

    /// Validation inputs pinned to the current instant
    pub fn validation_context(&self) -> ValidationContext {
        ValidationContext::at(self.clock.utc())
    }
}
