//! Helper functions shared across layers.
//!
//! - [`resource_url`] - Canonical resource URLs for users and groups
//! - [`password`] - Argon2 password hashing
//! - [`token_generator`] - Raw API token generation

pub mod password;
pub mod resource_url;
pub mod token_generator;
