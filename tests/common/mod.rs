#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use todo_api::application::services::UserInput;
use todo_api::domain::entities::User;
use todo_api::infrastructure::memory::MemoryStore;
use todo_api::routes::app_router;
use todo_api::state::AppState;

pub const BASE_URL: &str = "http://testserver";
pub const SIGNING_SECRET: &str = "test-signing-secret";

pub fn create_test_state() -> (AppState, Arc<MemoryStore>) {
    AppState::in_memory(BASE_URL, SIGNING_SECRET.to_string())
}

/// Full application router over an in-memory store, rate limiting off.
pub fn make_server(state: AppState) -> TestServer {
    let app = Router::new().fallback_service(app_router(state, false));
    TestServer::new(app).unwrap()
}

pub fn user_input(username: &str, password: &str) -> UserInput {
    UserInput {
        username: username.to_string(),
        password: password.to_string(),
        first_name: String::new(),
        last_name: String::new(),
        email: String::new(),
        is_staff: false,
        is_active: true,
        is_superuser: false,
        groups: Vec::new(),
    }
}

pub async fn create_test_user(state: &AppState, username: &str, password: &str) -> User {
    state
        .user_service
        .create_user(user_input(username, password))
        .await
        .unwrap()
}

/// Creates an active user and returns a raw bearer token for it.
pub async fn create_authenticated_user(state: &AppState, username: &str) -> String {
    let user = create_test_user(state, username, "password123").await;
    let (token, _) = state.auth_service.issue_token(user.id).await.unwrap();
    token
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub fn todo_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "something to do",
    })
}
