//! Shared domain types for userdesk.
//!
//! The `User` record, its identifier and request payload, plus the error
//! enums shared between the service and storage layers.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod error;
pub mod user;
