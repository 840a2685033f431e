//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls and business rules and give HTTP
//! handlers a small API to call.
//!
//! # Available Services
//!
//! - [`services::todo_service::TodoService`] - Todo CRUD
//! - [`services::user_service::UserService`] - User accounts, password hashing, memberships
//! - [`services::group_service::GroupService`] - Groups
//! - [`services::auth_service::AuthService`] - Bearer token validation and issuing

pub mod services;
