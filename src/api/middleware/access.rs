//! Per-route access policies.
//!
//! Runs after [`crate::api::middleware::auth::layer`] and before the handler.

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::api::middleware::auth::Caller;
use crate::error::AppError;

/// Rule deciding which verbs a caller may use on a route group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Safe methods for anyone; writes need an authenticated caller.
    AuthenticatedOrReadOnly,
    /// Every method needs an authenticated caller.
    Authenticated,
}

/// GET, HEAD and OPTIONS.
pub fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

impl Policy {
    /// Checks whether `caller` may use `method`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for anonymous callers the policy
    /// does not admit.
    pub fn check(self, method: &Method, caller: &Caller) -> Result<(), AppError> {
        if caller.is_authenticated() {
            return Ok(());
        }

        match self {
            Policy::AuthenticatedOrReadOnly if is_safe_method(method) => Ok(()),
            _ => Err(AppError::unauthorized(
                "Authentication credentials were not provided.",
                json!({"method": method.as_str()}),
            )),
        }
    }
}

/// Enforces the route group's [`Policy`].
///
/// # Example
///
/// ```rust,ignore
/// let todos = todo_routes()
///     .route_layer(middleware::from_fn_with_state(Policy::AuthenticatedOrReadOnly, access::layer));
/// ```
pub async fn layer(
    State(policy): State<Policy>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let caller = req
        .extensions()
        .get::<Caller>()
        .cloned()
        .unwrap_or(Caller::Anonymous);

    policy.check(req.method(), &caller)?;

    Ok(next.run(req).await)
}
