//! Application state wiring the service to its storage.
//!
//! `UserService` is generic over the repository trait; AppState pins it to
//! the SQLite implementation. Each AppState owns its own pool, so tests and
//! deployments never share a process-wide connection.

use std::sync::Arc;

use userdesk_core::service::user::UserService;
use userdesk_infra::sqlite::pool::DatabasePool;
use userdesk_infra::sqlite::user::SqliteUserRepository;

pub type ConcreteUserService = UserService<SqliteUserRepository>;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<ConcreteUserService>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Connect to the database (applying the schema) and wire the service.
    pub async fn init(database_url: &str) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(database_url).await?;
        Ok(Self::from_pool(db_pool))
    }

    pub fn from_pool(db_pool: DatabasePool) -> Self {
        let user_repo = SqliteUserRepository::new(db_pool.clone());
        Self {
            user_service: Arc::new(UserService::new(user_repo)),
            db_pool,
        }
    }
}
