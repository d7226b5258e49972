//! OpenAPI schema definitions for domain types.
//!
//! `userdesk-types` stays free of framework derives; these wrappers mirror
//! the domain structs for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`userdesk_types::user::User`].
#[derive(ToSchema)]
#[schema(as = User)]
#[allow(dead_code)]
pub struct UserSchema {
    /// Assigned by the database on create; never changes.
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "Dave")]
    name: String,
    /// Unique across all users.
    #[schema(example = "dave@example.com")]
    email: String,
}

/// OpenAPI schema for [`userdesk_types::user::UserPayload`].
///
/// Omitted fields are stored as empty strings.
#[derive(ToSchema)]
#[schema(as = UserPayload)]
#[allow(dead_code)]
pub struct UserPayloadSchema {
    #[schema(example = "Dave")]
    name: Option<String>,
    #[schema(example = "dave@example.com")]
    email: Option<String>,
}
