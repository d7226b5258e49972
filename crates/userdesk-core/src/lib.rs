//! Business logic and repository trait definitions for userdesk.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements. It depends only on `userdesk-types` -- never on
//! `userdesk-infra` or any database/IO crate.

pub mod repository;
pub mod service;
