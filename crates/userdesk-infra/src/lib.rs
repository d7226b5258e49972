//! Infrastructure layer for userdesk.
//!
//! Contains the SQLite implementation of the repository traits defined in
//! `userdesk-core`.

pub mod sqlite;
