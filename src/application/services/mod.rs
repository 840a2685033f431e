//! Business logic services for the application layer.

pub mod auth_service;
pub mod group_service;
pub mod todo_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use group_service::GroupService;
pub use todo_service::TodoService;
pub use user_service::{UserInput, UserService};
