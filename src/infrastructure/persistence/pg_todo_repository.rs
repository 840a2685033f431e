//! PostgreSQL implementation of the todo repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Todo, TodoFields};
use crate::domain::repositories::TodoRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    description: String,
    completed: bool,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            title: row.title,
            description: row.description,
            completed: row.completed,
        }
    }
}

/// PostgreSQL repository for todos.
pub struct PgTodoRepository {
    pool: Arc<PgPool>,
}

impl PgTodoRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    async fn create(&self, fields: TodoFields) -> Result<Todo, AppError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (title, description, completed)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, completed
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.completed)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Todo>, AppError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, title, description, completed
            FROM todos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Todo::from))
    }

    async fn list(&self) -> Result<Vec<Todo>, AppError> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, title, description, completed
            FROM todos
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn update(&self, id: i64, fields: TodoFields) -> Result<Option<Todo>, AppError> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos SET
                title       = $2,
                description = $3,
                completed   = $4
            WHERE id = $1
            RETURNING id, title, description, completed
            "#,
        )
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.completed)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Todo::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
