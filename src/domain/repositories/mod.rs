//! Repository trait definitions for the domain layer.
//!
//! These traits are the persistence interface of the service. Concrete
//! implementations live in `crate::infrastructure`; mocks are generated with
//! `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`TodoRepository`] - Todo CRUD
//! - [`UserRepository`] - User accounts and memberships
//! - [`GroupRepository`] - Groups
//! - [`TokenRepository`] - API token authentication

pub mod group_repository;
pub mod todo_repository;
pub mod token_repository;
pub mod user_repository;

pub use group_repository::GroupRepository;
pub use todo_repository::TodoRepository;
pub use token_repository::TokenRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use group_repository::MockGroupRepository;
#[cfg(test)]
pub use todo_repository::MockTodoRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
