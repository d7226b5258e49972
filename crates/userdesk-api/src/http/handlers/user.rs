//! User CRUD handlers for the REST API.
//!
//! Path ids are taken as raw strings and handed to the service, which
//! reports an unparsable id as "not found". Request bodies are decoded as
//! JSON whatever their `Content-Type`.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use userdesk_types::user::{User, UserPayload};

use crate::http::error::AppError;
use crate::http::response::MessageBody;
use crate::http::schemas::{UserPayloadSchema, UserSchema};
use crate::state::AppState;

/// GET /api/v1/users - List all users.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "All users in id order", body = [UserSchema]),
        (status = 500, description = "Storage failure", body = MessageBody)
    ),
    tag = "users",
    operation_id = "listUsers"
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state
        .user_service
        .list_users()
        .await
        .map_err(|e| AppError::from_user(e, "Error fetching users"))?;

    Ok(Json(users))
}

/// GET /api/v1/users/{id} - Get a user by id.
///
/// A missing or unparsable id is 404. A storage failure is 500
/// `{"message": "Error fetching user"}`.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = UserSchema),
        (status = 404, description = "User not found", body = MessageBody),
        (status = 500, description = "Storage failure", body = MessageBody)
    ),
    tag = "users",
    operation_id = "getUser"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let user = state
        .user_service
        .get_user(&id)
        .await
        .map_err(|e| AppError::from_user(e, "Error fetching user"))?;

    Ok(Json(user))
}

/// POST /api/v1/users - Create a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserPayloadSchema,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Invalid input", body = MessageBody),
        (status = 409, description = "Email already in use", body = MessageBody),
        (status = 500, description = "Storage failure", body = MessageBody)
    ),
    tag = "users",
    operation_id = "createUser"
)]
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<User>), AppError> {
    let payload = decode_payload(&body).map_err(reject_body)?;

    let user = state
        .user_service
        .create_user(payload)
        .await
        .map_err(|e| AppError::from_user(e, "Failed to create user"))?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/v1/users/{id} - Replace a user's name and email.
///
/// Fields missing from the body are stored as empty strings.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UserPayloadSchema,
    responses(
        (status = 200, description = "User updated", body = UserSchema),
        (status = 400, description = "Invalid input", body = MessageBody),
        (status = 404, description = "User not found", body = MessageBody),
        (status = 409, description = "Email already in use", body = MessageBody),
        (status = 500, description = "Storage failure", body = MessageBody)
    ),
    tag = "users",
    operation_id = "updateUser"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<User>, AppError> {
    let payload = match decode_payload(&body) {
        Ok(payload) => payload,
        Err(err) => {
            // A missing user answers 404 even when the body is also bad.
            state
                .user_service
                .get_user(&id)
                .await
                .map_err(|e| AppError::from_user(e, "Failed to update user"))?;
            return Err(reject_body(err));
        }
    };

    let user = state
        .user_service
        .update_user(&id, payload)
        .await
        .map_err(|e| AppError::from_user(e, "Failed to update user"))?;

    Ok(Json(user))
}

/// DELETE /api/v1/users/{id} - Delete a user permanently.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageBody),
        (status = 404, description = "User not found", body = MessageBody),
        (status = 500, description = "Storage failure", body = MessageBody)
    ),
    tag = "users",
    operation_id = "deleteUser"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, AppError> {
    state
        .user_service
        .delete_user(&id)
        .await
        .map_err(|e| AppError::from_user(e, "Failed to delete user"))?;

    Ok(Json(MessageBody::new("User deleted")))
}

fn decode_payload(body: &[u8]) -> Result<UserPayload, serde_json::Error> {
    serde_json::from_slice(body)
}

fn reject_body(err: serde_json::Error) -> AppError {
    tracing::debug!(reason = %err, "rejected request body");
    AppError::InvalidInput
}
