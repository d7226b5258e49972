//! User repository trait definition.

use userdesk_types::error::RepositoryError;
use userdesk_types::user::{User, UserId, UserPayload};

/// Repository trait for user persistence.
///
/// Implementations live in userdesk-infra (e.g., SqliteUserRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait UserRepository: Send + Sync {
    /// List every user, ordered by id ascending.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<User>, RepositoryError>> + Send;

    /// Get a user by id.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Insert a new user. The storage layer assigns the id.
    ///
    /// Returns `RepositoryError::Conflict` when the email is already taken.
    fn create(
        &self,
        payload: &UserPayload,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    /// Overwrite name and email of an existing user in a single statement.
    ///
    /// Returns `RepositoryError::NotFound` when no row has this id.
    fn update(
        &self,
        id: UserId,
        payload: &UserPayload,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    /// Permanently delete a user by id.
    ///
    /// Returns `RepositoryError::NotFound` when no row has this id.
    fn delete(
        &self,
        id: UserId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
