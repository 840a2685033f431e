mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::json;
use todo_api::domain::repositories::TokenRepository;
use todo_api::routes::app_router;
use tower::ServiceExt;

#[tokio::test]
async fn test_anonymous_can_read_todos() {
    let (state, _store) = common::create_test_state();
    let server = common::make_server(state);

    server.get("/todo/").await.assert_status_ok();
}

#[tokio::test]
async fn test_anonymous_cannot_write_todos() {
    let (state, _store) = common::create_test_state();
    let server = common::make_server(state);

    server
        .put("/todo/1/")
        .json(&common::todo_body("x"))
        .await
        .assert_status_unauthorized();
    server.delete("/todo/1/").await.assert_status_unauthorized();
}

#[tokio::test]
async fn test_invalid_token_rejected_on_safe_method() {
    let (state, _store) = common::create_test_state();
    let server = common::make_server(state);

    let response = server
        .get("/todo/")
        .add_header("Authorization", common::bearer("not-a-real-token"))
        .await;

    response.assert_status_unauthorized();
    assert_eq!(response.header("www-authenticate"), "Bearer");
}

#[tokio::test]
async fn test_malformed_authorization_header() {
    let (state, _store) = common::create_test_state();
    let server = common::make_server(state);

    server
        .get("/todo/")
        .add_header("Authorization", "Basic YWxpY2U6cHc=")
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_revoked_token_rejected() {
    let (state, store) = common::create_test_state();
    let token = common::create_authenticated_user(&state, "alice").await;
    let server = common::make_server(state);

    let record = store.list_tokens().await.unwrap().remove(0);
    assert!(store.revoke_token(record.id).await.unwrap());

    server
        .get("/general/users/")
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_inactive_user_token_forbidden() {
    let (state, _store) = common::create_test_state();
    let mut input = common::user_input("dormant", "pw");
    input.is_active = false;
    let user = state.user_service.create_user(input).await.unwrap();
    let (token, _) = state.auth_service.issue_token(user.id).await.unwrap();
    let server = common::make_server(state);

    let response = server
        .post("/todo/")
        .add_header("Authorization", common::bearer(&token))
        .json(&common::todo_body("x"))
        .await;

    response.assert_status_forbidden();
    assert_eq!(response.json::<serde_json::Value>()["error"]["code"], "forbidden");
}

#[tokio::test]
async fn test_general_routes_reject_anonymous_every_verb() {
    let (state, _store) = common::create_test_state();
    let server = common::make_server(state);

    server.get("/general/users/").await.assert_status_unauthorized();
    server.get("/general/users/1/").await.assert_status_unauthorized();
    server
        .put("/general/groups/1/")
        .json(&json!({"name": "x"}))
        .await
        .assert_status_unauthorized();
    server
        .delete("/general/groups/1/")
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_token_endpoint_open_to_anonymous() {
    let (state, _store) = common::create_test_state();
    common::create_test_user(&state, "alice", "pw").await;
    let server = common::make_server(state);

    server
        .post("/api-token-auth/")
        .json(&json!({"username": "alice", "password": "pw"}))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_trailing_slash_is_optional() {
    let (state, _store) = common::create_test_state();
    let app = app_router(state, false);

    for uri in ["/todo", "/todo/", "/health", "/health/"] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    }
}
