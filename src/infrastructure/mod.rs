//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the repository traits defined by the domain
//! layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`memory`] - In-process store implementing every repository

pub mod memory;
pub mod persistence;
