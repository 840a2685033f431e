//! DTOs for the credential exchange endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /api-token-auth/`.
#[derive(Debug, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(required(message = "This field is required."))]
    pub username: Option<String>,

    #[validate(required(message = "This field is required."))]
    pub password: Option<String>,
}

/// Response carrying the raw token. Shown once; only its hash is stored.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
