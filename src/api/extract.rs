//! Request extractors that reject with [`AppError`].
//!
//! Axum's own `Json` and `Path` rejections are plain text with 415/422
//! statuses; these wrappers turn every input problem into a 400 with the
//! standard error body.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::marker::PhantomData;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has been deserialized and validated.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// JSON body that is parsed as JSON but not yet checked against `T`.
///
/// Update handlers look the record up before calling
/// [`DeferredJson::into_validated`], so an unknown identifier is reported as
/// 404 whatever the body contains. Malformed JSON is still rejected up front.
pub struct DeferredJson<T> {
    value: Value,
    target: PhantomData<fn() -> T>,
}

impl<T, S> FromRequest<S> for DeferredJson<T>
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        Ok(Self {
            value,
            target: PhantomData,
        })
    }
}

impl<T> DeferredJson<T>
where
    T: DeserializeOwned + Validate,
{
    /// Deserializes and validates the body.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on a shape mismatch or failed rule.
    pub fn into_validated(self) -> Result<T, AppError> {
        let payload = serde_json::from_value::<T>(self.value).map_err(|e| {
            AppError::bad_request(
                "Malformed request body",
                json!({ "non_field_errors": [e.to_string()] }),
            )
        })?;
        payload.validate()?;
        Ok(payload)
    }
}

/// Numeric identifier taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct ItemId(pub i64);

impl<S> FromRequestParts<S> for ItemId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state).await?;
        Ok(Self(id))
    }
}
