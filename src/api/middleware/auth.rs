//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{domain::entities::User, error::AppError, state::AppState};

/// Identity of the request, resolved by [`layer`].
#[derive(Debug, Clone)]
pub enum Caller {
    Anonymous,
    Authenticated(User),
}

impl Caller {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Caller::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Caller::Authenticated(user) => Some(user),
            Caller::Anonymous => None,
        }
    }
}

/// Resolves the caller from the `Authorization` header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. No `Authorization` header: the caller is [`Caller::Anonymous`]
/// 2. Extract the token, hash it and look it up
/// 3. Reject unknown or revoked tokens and inactive owners
/// 4. Store [`Caller::Authenticated`] in request extensions
///
/// Whether an anonymous caller may proceed is decided by the access policy
/// ([`crate::api::middleware::access`]), not here.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is malformed or the token is
/// unknown or revoked, and `403 Forbidden` if the token owner is inactive.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let caller = if parts.headers.contains_key(AUTHORIZATION) {
        let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
            .await
            .map_err(|_| {
                AppError::unauthorized(
                    "Unauthorized",
                    serde_json::json!({"reason": "Authorization header is missing or invalid"}),
                )
            })?;

        Caller::Authenticated(st.auth_service.authenticate(&token).await?)
    } else {
        Caller::Anonymous
    };

    if let Some(user) = caller.user() {
        tracing::debug!(user_id = user.id, "Authenticated request");
    }

    parts.extensions.insert(caller);
    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}
