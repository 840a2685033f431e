mod common;

use serde_json::{Value, json};
use todo_api::domain::repositories::UserRepository;

#[tokio::test]
async fn test_obtain_token_success() {
    let (state, store) = common::create_test_state();
    let user = common::create_test_user(&state, "alice", "s3cret").await;
    let server = common::make_server(state);

    let response = server
        .post("/api-token-auth/")
        .json(&json!({"username": "alice", "password": "s3cret"}))
        .await;

    response.assert_status_ok();

    let token = response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string();
    assert_eq!(token.len(), 40);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));

    let stored = store.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.last_login.is_some());
}

#[tokio::test]
async fn test_obtained_token_authenticates() {
    let (state, _store) = common::create_test_state();
    common::create_test_user(&state, "alice", "s3cret").await;
    let server = common::make_server(state);

    let token = server
        .post("/api-token-auth/")
        .json(&json!({"username": "alice", "password": "s3cret"}))
        .await
        .json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string();

    server
        .get("/general/users/")
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_each_exchange_issues_new_token() {
    let (state, _store) = common::create_test_state();
    common::create_test_user(&state, "alice", "s3cret").await;
    let server = common::make_server(state);

    let body = json!({"username": "alice", "password": "s3cret"});
    let first = server.post("/api-token-auth/").json(&body).await.json::<Value>();
    let second = server.post("/api-token-auth/").json(&body).await.json::<Value>();

    assert_ne!(first["token"], second["token"]);
}

#[tokio::test]
async fn test_wrong_password() {
    let (state, _store) = common::create_test_state();
    common::create_test_user(&state, "alice", "s3cret").await;
    let server = common::make_server(state);

    let response = server
        .post("/api-token-auth/")
        .json(&json!({"username": "alice", "password": "wrong"}))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["details"]["non_field_errors"][0],
        "Unable to log in with provided credentials."
    );
}

#[tokio::test]
async fn test_unknown_user() {
    let (state, _store) = common::create_test_state();
    let server = common::make_server(state);

    server
        .post("/api-token-auth/")
        .json(&json!({"username": "nobody", "password": "pw"}))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_inactive_user_cannot_log_in() {
    let (state, _store) = common::create_test_state();
    let mut input = common::user_input("alice", "s3cret");
    input.is_active = false;
    state.user_service.create_user(input).await.unwrap();
    let server = common::make_server(state);

    server
        .post("/api-token-auth/")
        .json(&json!({"username": "alice", "password": "s3cret"}))
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn test_missing_fields() {
    let (state, _store) = common::create_test_state();
    let server = common::make_server(state);

    let response = server
        .post("/api-token-auth/")
        .json(&json!({"username": "alice"}))
        .await;

    response.assert_status_bad_request();
    assert!(
        response.json::<Value>()["error"]["details"]
            .get("password")
            .is_some()
    );
}
