//! Services implementing the user operations on top of the repository ports.

pub mod user;
