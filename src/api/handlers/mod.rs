//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod groups;
pub mod health;
pub mod todos;
pub mod token_auth;
pub mod users;

pub use groups::{
    create_group_handler, delete_group_handler, get_group_handler, list_groups_handler,
    update_group_handler,
};
pub use health::health_handler;
pub use todos::{
    create_todo_handler, delete_todo_handler, get_todo_handler, list_todos_handler,
    update_todo_handler,
};
pub use token_auth::obtain_auth_token_handler;
pub use users::{
    create_user_handler, delete_user_handler, get_user_handler, list_users_handler,
    update_user_handler,
};
