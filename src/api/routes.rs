//! API route configuration.
//!
//! Resource routes pass through bearer authentication
//! ([`crate::api::middleware::auth`]) and then through the access policy of
//! their group ([`crate::api::middleware::access`]).

use crate::api::handlers::{
    create_group_handler, create_todo_handler, create_user_handler, delete_group_handler,
    delete_todo_handler, delete_user_handler, get_group_handler, get_todo_handler,
    get_user_handler, list_groups_handler, list_todos_handler, list_users_handler,
    obtain_auth_token_handler, update_group_handler, update_todo_handler, update_user_handler,
};
use crate::api::middleware::{access, access::Policy, auth};
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Todo routes.
///
/// # Endpoints
///
/// - `GET    /todo`       - List todos
/// - `POST   /todo`       - Create a todo
/// - `GET    /todo/{id}`  - Retrieve a todo
/// - `PUT    /todo/{id}`  - Replace a todo
/// - `PATCH  /todo/{id}`  - Same as `PUT`
/// - `DELETE /todo/{id}`  - Delete a todo
pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/todo", get(list_todos_handler).post(create_todo_handler))
        .route(
            "/todo/{id}",
            get(get_todo_handler)
                .put(update_todo_handler)
                .patch(update_todo_handler)
                .delete(delete_todo_handler),
        )
}

/// User and group administration routes.
///
/// # Endpoints
///
/// - `GET/POST             /general/users`
/// - `GET/PUT/PATCH/DELETE /general/users/{id}`
/// - `GET/POST             /general/groups`
/// - `GET/PUT/PATCH/DELETE /general/groups/{id}`
pub fn general_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/general/users",
            get(list_users_handler).post(create_user_handler),
        )
        .route(
            "/general/users/{id}",
            get(get_user_handler)
                .put(update_user_handler)
                .patch(update_user_handler)
                .delete(delete_user_handler),
        )
        .route(
            "/general/groups",
            get(list_groups_handler).post(create_group_handler),
        )
        .route(
            "/general/groups/{id}",
            get(get_group_handler)
                .put(update_group_handler)
                .patch(update_group_handler)
                .delete(delete_group_handler),
        )
}

/// `POST /api-token-auth` - exchange credentials for a token.
pub fn token_routes() -> Router<AppState> {
    Router::new().route("/api-token-auth", post(obtain_auth_token_handler))
}

/// Todo and general routes with authentication and access policies applied.
///
/// Route layers run outside-in: authentication resolves the caller first,
/// then the group's policy decides whether the verb is allowed.
pub fn resource_routes(state: AppState) -> Router<AppState> {
    let todos = todo_routes().route_layer(middleware::from_fn_with_state(
        Policy::AuthenticatedOrReadOnly,
        access::layer,
    ));

    let general = general_routes().route_layer(middleware::from_fn_with_state(
        Policy::Authenticated,
        access::layer,
    ));

    Router::new()
        .merge(todos)
        .merge(general)
        .route_layer(middleware::from_fn_with_state(state, auth::layer))
}
