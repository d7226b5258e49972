//! OpenAPI documentation for the REST API.
//!
//! Served as JSON at `/api-docs/openapi.json` and browsable through
//! Swagger UI at `/swagger-ui`. `userdesk openapi` prints the same document.

use utoipa::OpenApi;

use crate::http::response::MessageBody;
use crate::http::schemas::{UserPayloadSchema, UserSchema};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User API",
        description = "A simple API for managing users in a relational database.",
        contact(name = "API Support", email = "support@localhost.com")
    ),
    paths(
        crate::http::handlers::user::list_users,
        crate::http::handlers::user::get_user,
        crate::http::handlers::user::create_user,
        crate::http::handlers::user::update_user,
        crate::http::handlers::user::delete_user,
    ),
    components(schemas(UserSchema, UserPayloadSchema, MessageBody)),
    tags((name = "users", description = "User CRUD operations"))
)]
pub struct ApiDoc;
