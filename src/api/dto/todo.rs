//! DTOs for the todo resource.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::fields::{not_null, trimmed};
use crate::domain::entities::{Todo, TodoFields};

/// Request body for `POST /todo/` and `PUT /todo/{id}`.
///
/// Every field is replaced on update. An absent `completed` defaults to
/// `false`; an explicit `null` is rejected.
#[derive(Debug, Deserialize, Validate)]
pub struct TodoRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "This field is required."),
        length(
            min = 1,
            max = 200,
            message = "Ensure this field has between 1 and 200 characters."
        )
    )]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "This field is required."),
        length(min = 1, message = "This field may not be blank.")
    )]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "not_null")]
    pub completed: Option<bool>,
}

impl TodoRequest {
    /// Converts a validated request into storable fields.
    pub fn into_fields(self) -> TodoFields {
        TodoFields {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            completed: self.completed.unwrap_or(false),
        }
    }
}

/// Wire representation of a todo.
#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
        }
    }
}
