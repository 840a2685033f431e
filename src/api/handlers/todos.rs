//! Handlers for the todo collection and item endpoints.
//!
//! Reads are open to anonymous callers; writes pass through the
//! authenticated-or-read-only policy before reaching these handlers.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::todo::{TodoRequest, TodoResponse};
use crate::api::extract::{DeferredJson, ItemId, ValidatedJson};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all todos ordered by id.
///
/// # Endpoint
///
/// `GET /todo/`
pub async fn list_todos_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let todos = state.todo_service.list_todos().await?;

    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// Creates a todo.
///
/// # Endpoint
///
/// `POST /todo/`
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Buy milk",
///   "description": "2% fat",
///   "completed": false  // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `title` or `description` is missing or blank.
pub async fn create_todo_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TodoRequest>,
) -> Result<(StatusCode, Json<TodoResponse>), AppError> {
    let todo = state
        .todo_service
        .create_todo(payload.into_fields())
        .await?;

    Ok((StatusCode::CREATED, Json(todo.into())))
}

/// Returns a single todo.
///
/// # Endpoint
///
/// `GET /todo/{id}`
pub async fn get_todo_handler(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<Json<TodoResponse>, AppError> {
    let todo = state.todo_service.get_todo(id).await?;

    Ok(Json(todo.into()))
}

/// Replaces every mutable field of a todo.
///
/// # Endpoint
///
/// `PUT /todo/{id}` or `PATCH /todo/{id}`
///
/// # Errors
///
/// Returns 404 if the todo does not exist, checked before the body, and
/// 400 if the body is invalid.
pub async fn update_todo_handler(
    State(state): State<AppState>,
    ItemId(id): ItemId,
    body: DeferredJson<TodoRequest>,
) -> Result<Json<TodoResponse>, AppError> {
    state.todo_service.get_todo(id).await?;
    let payload = body.into_validated()?;

    let todo = state
        .todo_service
        .update_todo(id, payload.into_fields())
        .await?;

    Ok(Json(todo.into()))
}

/// Deletes a todo.
///
/// # Endpoint
///
/// `DELETE /todo/{id}`
///
/// # Response
///
/// Returns 204 No Content on success, 404 if the todo does not exist.
pub async fn delete_todo_handler(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<StatusCode, AppError> {
    state.todo_service.delete_todo(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
