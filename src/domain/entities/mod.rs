//! Core domain entities.
//!
//! Entities are plain data structures. Each mutable resource has a matching
//! `*Fields` struct carrying the validated values used for both creation and
//! full replacement.
//!
//! # Entity Types
//!
//! - [`Todo`] - A todo record
//! - [`User`] - An account record
//! - [`Group`] - A named collection of users
//! - [`ApiToken`] - An issued bearer token

pub mod group;
pub mod todo;
pub mod token;
pub mod user;

pub use group::Group;
pub use todo::{Todo, TodoFields};
pub use token::ApiToken;
pub use user::{User, UserFields};
