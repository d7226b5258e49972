//! HTTP/REST API layer for userdesk.
//!
//! Axum-based REST API at `/api/v1/` with CORS, request tracing and an
//! OpenAPI document served through Swagger UI.

pub mod doc;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod schemas;
