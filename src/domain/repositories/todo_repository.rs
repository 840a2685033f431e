//! Repository trait for todo storage.

use crate::domain::entities::{Todo, TodoFields};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for todo records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTodoRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Inserts a todo and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, fields: TodoFields) -> Result<Todo, AppError>;

    /// Finds a todo by identifier.
    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, AppError>;

    /// Lists all todos ordered by identifier.
    async fn list(&self) -> Result<Vec<Todo>, AppError>;

    /// Replaces all mutable fields of a todo.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Todo))` with the updated record
    /// - `Ok(None)` if no todo has this identifier
    async fn update(&self, id: i64, fields: TodoFields) -> Result<Option<Todo>, AppError>;

    /// Deletes a todo. Returns `false` if it did not exist.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Counts stored todos. Also used by the health check.
    async fn count(&self) -> Result<i64, AppError>;
}
