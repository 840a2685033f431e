//! Handlers for group administration endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::group::{GroupRequest, GroupResponse};
use crate::api::extract::{DeferredJson, ItemId, ValidatedJson};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /general/groups/`
pub async fn list_groups_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<GroupResponse>>, AppError> {
    let groups = state.group_service.list_groups().await?;

    Ok(Json(
        groups
            .into_iter()
            .map(|group| GroupResponse::new(group, &state.links))
            .collect(),
    ))
}

/// Creates a group.
///
/// # Endpoint
///
/// `POST /general/groups/`
///
/// # Errors
///
/// Returns 400 Bad Request if `name` is missing, too long or already taken.
pub async fn create_group_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<GroupRequest>,
) -> Result<(StatusCode, Json<GroupResponse>), AppError> {
    let group = state
        .group_service
        .create_group(&payload.into_name())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(GroupResponse::new(group, &state.links)),
    ))
}

/// `GET /general/groups/{id}`
pub async fn get_group_handler(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<Json<GroupResponse>, AppError> {
    let group = state.group_service.get_group(id).await?;

    Ok(Json(GroupResponse::new(group, &state.links)))
}

/// `PUT /general/groups/{id}` or `PATCH /general/groups/{id}`
pub async fn update_group_handler(
    State(state): State<AppState>,
    ItemId(id): ItemId,
    body: DeferredJson<GroupRequest>,
) -> Result<Json<GroupResponse>, AppError> {
    state.group_service.get_group(id).await?;
    let payload = body.into_validated()?;

    let group = state
        .group_service
        .update_group(id, &payload.into_name())
        .await?;

    Ok(Json(GroupResponse::new(group, &state.links)))
}

/// Deletes a group and drops it from every user's memberships.
///
/// # Endpoint
///
/// `DELETE /general/groups/{id}`
pub async fn delete_group_handler(
    State(state): State<AppState>,
    ItemId(id): ItemId,
) -> Result<StatusCode, AppError> {
    state.group_service.delete_group(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
