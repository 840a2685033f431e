//! Application error type and its HTTP representation.
//!
//! Every failure surfaced to a caller is an [`AppError`]. Handlers return
//! `Result<_, AppError>` and the [`IntoResponse`] impl turns the error into a
//! structured JSON body:
//!
//! ```json
//! {
//!   "error": {
//!     "code": "validation_error",
//!     "message": "Invalid input",
//!     "details": { "title": ["This field is required."] }
//!   }
//! }
//! ```

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing fields on create/update.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Unknown identifier on an item operation.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// No credentials, or credentials that do not resolve to a user.
    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    /// Valid credentials lacking the required privilege.
    #[error("{message}")]
    Forbidden { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Validation error attached to a single field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut details = Map::new();
        details.insert(field.to_string(), json!([message.into()]));
        Self::bad_request("Invalid input", Value::Object(details))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Unauthorized { message, details } => ("unauthorized", message, details),
            AppError::Forbidden { message, details } => ("forbidden", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        let mut response = (status, Json(body)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            let field = match db.constraint() {
                Some("auth_user_username_key") => "username",
                Some("auth_group_name_key") => "name",
                _ => "non_field_errors",
            };
            return AppError::field(field, "A record with this value already exists.");
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

/// Flattens validator output into `field -> [messages]`.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details = Map::new();

        for (field, errs) in errors.field_errors() {
            let messages: Vec<Value> = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => Value::String(msg.to_string()),
                    None => Value::String(format!("Invalid value ({}).", e.code)),
                })
                .collect();
            details.insert(field.to_string(), Value::Array(messages));
        }

        AppError::bad_request("Invalid input", Value::Object(details))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Malformed request body",
            json!({ "non_field_errors": [rejection.body_text()] }),
        )
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request(
            "Invalid identifier",
            json!({ "id": [rejection.body_text()] }),
        )
    }
}
