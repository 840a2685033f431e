//! HTTP middleware for request processing and protection.
//!
//! Provides authentication, access policies, rate limiting and request
//! tracing.

pub mod access;
pub mod auth;
pub mod rate_limit;
pub mod tracing;
