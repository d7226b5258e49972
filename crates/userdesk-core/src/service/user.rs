//! User management service.
//!
//! Thin orchestration over a [`UserRepository`]: parses identifiers taken
//! from request paths and classifies repository failures into
//! [`UserError`] so the HTTP layer can pick a status code.

use userdesk_types::error::{RepositoryError, UserError};
use userdesk_types::user::{User, UserId, UserPayload};

use crate::repository::user::UserRepository;

/// Service implementing list/get/create/update/delete for users.
///
/// Generic over the repository so the core never depends on infra.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// List every user in id order.
    pub async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repo.list().await.map_err(classify)
    }

    /// Fetch a single user.
    ///
    /// `raw_id` comes straight from the request path. A value that is not
    /// an integer cannot match any row, so it reports `NotFound` rather
    /// than a separate bad-request error.
    pub async fn get_user(&self, raw_id: &str) -> Result<User, UserError> {
        let id = parse_id(raw_id)?;
        self.repo
            .get_by_id(id)
            .await
            .map_err(classify)?
            .ok_or(UserError::NotFound)
    }

    /// Create a user. The id is assigned by storage.
    pub async fn create_user(&self, payload: UserPayload) -> Result<User, UserError> {
        let user = self.repo.create(&payload).await.map_err(classify)?;
        tracing::info!(id = %user.id, "user created");
        Ok(user)
    }

    /// Replace name and email of an existing user.
    ///
    /// This is a full replace: empty fields in `payload` overwrite stored
    /// values. The lookup and write happen in one statement.
    pub async fn update_user(&self, raw_id: &str, payload: UserPayload) -> Result<User, UserError> {
        let id = parse_id(raw_id)?;
        let user = self.repo.update(id, &payload).await.map_err(classify)?;
        tracing::info!(%id, "user updated");
        Ok(user)
    }

    /// Hard-delete a user.
    pub async fn delete_user(&self, raw_id: &str) -> Result<(), UserError> {
        let id = parse_id(raw_id)?;
        self.repo.delete(id).await.map_err(classify)?;
        tracing::info!(%id, "user deleted");
        Ok(())
    }
}

fn parse_id(raw_id: &str) -> Result<UserId, UserError> {
    raw_id.parse().map_err(|_| {
        tracing::debug!(raw_id, "unparsable user id treated as not found");
        UserError::NotFound
    })
}

fn classify(err: RepositoryError) -> UserError {
    match err {
        RepositoryError::NotFound => UserError::NotFound,
        RepositoryError::Conflict(email) => UserError::EmailTaken(email),
        other => UserError::StorageError(other.to_string()),
    }
}
