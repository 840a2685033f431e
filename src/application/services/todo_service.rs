//! Todo CRUD service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Todo, TodoFields};
use crate::domain::repositories::TodoRepository;
use crate::error::AppError;

/// Service for listing, creating, retrieving, updating and deleting todos.
pub struct TodoService<R: TodoRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: TodoRepository + ?Sized> TodoService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Lists all todos.
    pub async fn list_todos(&self) -> Result<Vec<Todo>, AppError> {
        self.repository.list().await
    }

    /// Persists a validated todo.
    pub async fn create_todo(&self, fields: TodoFields) -> Result<Todo, AppError> {
        let todo = self.repository.create(fields).await?;
        tracing::info!(todo_id = todo.id, "Todo created");
        Ok(todo)
    }

    /// Retrieves a todo by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the identifier is unknown.
    pub async fn get_todo(&self, id: i64) -> Result<Todo, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Replaces all mutable fields of a todo.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the identifier is unknown.
    pub async fn update_todo(&self, id: i64, fields: TodoFields) -> Result<Todo, AppError> {
        self.repository
            .update(id, fields)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Deletes a todo.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the identifier is unknown.
    pub async fn delete_todo(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(todo_id = id, "Todo deleted");
        Ok(())
    }

    /// Number of stored todos.
    pub async fn count_todos(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found("Todo not found", json!({ "id": id }))
}
