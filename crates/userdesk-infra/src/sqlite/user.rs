//! SQLite user repository implementation.
//!
//! Implements `UserRepository` from `userdesk-core` using sqlx with split read/write pools.
//! Update and delete are single statements, so a concurrent delete cannot
//! slip in between the existence check and the write.

use sqlx::Row;
use userdesk_core::repository::user::UserRepository;
use userdesk_types::error::RepositoryError;
use userdesk_types::user::{User, UserId, UserPayload};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `UserRepository`.
pub struct SqliteUserRepository {
    pool: DatabasePool,
}

impl SqliteUserRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<User, RepositoryError> {
    let id: i64 = row.try_get("id").map_err(query_error)?;
    Ok(User {
        id: UserId(id),
        name: row.try_get("name").map_err(query_error)?,
        email: row.try_get("email").map_err(query_error)?,
    })
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Query(e.to_string())
}

/// Map a failed INSERT/UPDATE, surfacing the unique email constraint as a conflict.
fn write_error(e: sqlx::Error, email: &str) -> RepositoryError {
    match e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            RepositoryError::Conflict(email.to_string())
        }
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => RepositoryError::Connection,
        other => query_error(other),
    }
}

impl UserRepository for SqliteUserRepository {
    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        rows.iter().map(user_from_row).collect()
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query("SELECT id, name, email FROM users WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn create(&self, payload: &UserPayload) -> Result<User, RepositoryError> {
        let row = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?) RETURNING id, name, email")
            .bind(&payload.name)
            .bind(&payload.email)
            .fetch_one(&self.pool.writer)
            .await
            .map_err(|e| write_error(e, &payload.email))?;

        user_from_row(&row)
    }

    async fn update(&self, id: UserId, payload: &UserPayload) -> Result<User, RepositoryError> {
        let row = sqlx::query(
            "UPDATE users SET name = ?, email = ? WHERE id = ? RETURNING id, name, email",
        )
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(id.as_i64())
        .fetch_optional(&self.pool.writer)
        .await
        .map_err(|e| write_error(e, &payload.email))?;

        match row {
            Some(row) => user_from_row(&row),
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool.writer)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
