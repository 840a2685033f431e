//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx
//! runtime-checked queries mapped through `FromRow` row structs.
//!
//! # Repositories
//!
//! - [`PgTodoRepository`] - Todo storage
//! - [`PgUserRepository`] - User accounts and group memberships
//! - [`PgGroupRepository`] - Groups
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_group_repository;
pub mod pg_todo_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_group_repository::PgGroupRepository;
pub use pg_todo_repository::PgTodoRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
