//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs deserialize with Serde and validate with `validator`; every
//! field is optional at the Serde level so that missing fields surface as
//! validation errors rather than deserialization failures.

pub mod fields;
pub mod group;
pub mod health;
pub mod todo;
pub mod token;
pub mod user;
