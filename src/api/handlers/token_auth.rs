//! Handler exchanging username and password for an API token.

use axum::{Json, extract::State};

use crate::api::dto::token::{TokenRequest, TokenResponse};
use crate::api::extract::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges credentials for a fresh bearer token.
///
/// # Endpoint
///
/// `POST /api-token-auth/`
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "password": "s3cret" }
/// ```
///
/// # Response
///
/// ```json
/// { "token": "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request with `non_field_errors` when the credentials are
/// wrong or the account is inactive.
pub async fn obtain_auth_token_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let username = payload.username.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let token = state
        .auth_service
        .obtain_token(&username, &password)
        .await?;

    Ok(Json(TokenResponse { token }))
}
