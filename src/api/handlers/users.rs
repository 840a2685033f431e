//! Handlers for user administration endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::user::{UserRequest, UserResponse};
use crate::api::extract::{DeferredJson, ItemId, ValidatedJson};
use crate::error::AppError;
use crate::state::AppState;

/// Lists users, most recently joined first.
///
/// # Endpoint
///
/// `GET /general/users/`
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.user_service.list_users().await?;

    Ok(Json(
        users
            .into_iter()
            .map(|user| UserResponse::new(user, &state.links))
            .collect(),
    ))
}

/// Creates a user.
///
/// # Endpoint
///
/// `POST /general/users/`
///
/// # Request Body
///
/// ```json
/// {
///   "username": "alice",
///   "password": "s3cret",
///   "email": "alice@example.com",
///   "groups": ["http://localhost:8000/general/groups/1/"]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails, the username is taken or a
/// group URL does not resolve to an existing group.
pub async fn create_user_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let input = payload.into_input(&state.links)?;
    let user = state.user_service.create_user(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse::new(user, &state.links)),
    ))
}

/// `GET /general/users/{id}`
pub async fn get_user_handler(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.get_user(id).await?;

    Ok(Json(UserResponse::new(user, &state.links)))
}

/// Replaces a user, including password and group memberships.
///
/// # Endpoint
///
/// `PUT /general/users/{id}` or `PATCH /general/users/{id}`
pub async fn update_user_handler(
    State(state): State<AppState>,
    ItemId(id): ItemId,
    body: DeferredJson<UserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    state.user_service.get_user(id).await?;
    let input = body.into_validated()?.into_input(&state.links)?;
    let user = state.user_service.update_user(id, input).await?;

    Ok(Json(UserResponse::new(user, &state.links)))
}

/// `DELETE /general/users/{id}`
pub async fn delete_user_handler(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<StatusCode, AppError> {
    state.user_service.delete_user(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
