mod common;

use axum::body::Bytes;
use axum::http::StatusCode;
use serde_json::{Value, json};
use todo_api::domain::repositories::TodoRepository;

// ─── LIST / RETRIEVE ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_todos_empty() {
    let (state, _store) = common::create_test_state();
    let server = common::make_server(state);

    let response = server.get("/todo/").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_list_todos_ordered_by_id() {
    let (state, _store) = common::create_test_state();
    let token = common::create_authenticated_user(&state, "alice").await;
    let server = common::make_server(state);

    for title in ["first", "second", "third"] {
        server
            .post("/todo/")
            .add_header("Authorization", common::bearer(&token))
            .json(&common::todo_body(title))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = server.get("/todo/").await;
    response.assert_status_ok();

    let items = response.json::<Vec<Value>>();
    let titles: Vec<&str> = items.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
    assert!(items[0]["id"].as_i64().unwrap() < items[1]["id"].as_i64().unwrap());
}

#[tokio::test]
async fn test_get_todo_anonymous() {
    let (state, _store) = common::create_test_state();
    let token = common::create_authenticated_user(&state, "alice").await;
    let server = common::make_server(state);

    let created = server
        .post("/todo/")
        .add_header("Authorization", common::bearer(&token))
        .json(&common::todo_body("Buy milk"))
        .await
        .json::<Value>();
    let id = created["id"].as_i64().unwrap();

    let response = server.get(&format!("/todo/{id}/")).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), created);
}

#[tokio::test]
async fn test_get_todo_not_found() {
    let (state, _store) = common::create_test_state();
    let server = common::make_server(state);

    let response = server.get("/todo/999/").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_get_todo_non_numeric_id() {
    let (state, _store) = common::create_test_state();
    let server = common::make_server(state);

    let response = server.get("/todo/abc/").await;

    response.assert_status_bad_request();
}

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_todo_success() {
    let (state, _store) = common::create_test_state();
    let token = common::create_authenticated_user(&state, "alice").await;
    let server = common::make_server(state);

    let response = server
        .post("/todo/")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({"title": "Buy milk", "description": "2%"}))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    assert!(json["id"].as_i64().unwrap() > 0);
    assert_eq!(json["title"], "Buy milk");
    assert_eq!(json["description"], "2%");
    assert_eq!(json["completed"], false);
}

#[tokio::test]
async fn test_create_todo_anonymous_rejected() {
    let (state, store) = common::create_test_state();
    let server = common::make_server(state);

    let response = server.post("/todo/").json(&common::todo_body("x")).await;

    response.assert_status_unauthorized();
    assert_eq!(response.header("www-authenticate"), "Bearer");

    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_todo_missing_title() {
    let (state, _store) = common::create_test_state();
    let token = common::create_authenticated_user(&state, "alice").await;
    let server = common::make_server(state);

    let response = server
        .post("/todo/")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({"description": "no title"}))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(json["error"]["details"].get("title").is_some());

    server
        .get("/todo/")
        .await
        .assert_json(&json!([]));
}

#[tokio::test]
async fn test_create_todo_blank_title() {
    let (state, _store) = common::create_test_state();
    let token = common::create_authenticated_user(&state, "alice").await;
    let server = common::make_server(state);

    let response = server
        .post("/todo/")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({"title": "   ", "description": "blank"}))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_todo_title_too_long() {
    let (state, _store) = common::create_test_state();
    let token = common::create_authenticated_user(&state, "alice").await;
    let server = common::make_server(state);

    let response = server
        .post("/todo/")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({"title": "a".repeat(201), "description": "long"}))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_todo_malformed_json() {
    let (state, _store) = common::create_test_state();
    let token = common::create_authenticated_user(&state, "alice").await;
    let server = common::make_server(state);

    let response = server
        .post("/todo/")
        .add_header("Authorization", common::bearer(&token))
        .bytes(Bytes::from_static(b"{not json"))
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "validation_error"
    );
}

// ─── UPDATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_todo_success() {
    let (state, _store) = common::create_test_state();
    let token = common::create_authenticated_user(&state, "alice").await;
    let server = common::make_server(state);

    let id = server
        .post("/todo/")
        .add_header("Authorization", common::bearer(&token))
        .json(&common::todo_body("Buy milk"))
        .await
        .json::<Value>()["id"]
        .as_i64()
        .unwrap();

    let response = server
        .put(&format!("/todo/{id}/"))
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({"title": "Buy oat milk", "description": "1L", "completed": true}))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!({"id": id, "title": "Buy oat milk", "description": "1L", "completed": true})
    );

    server
        .get(&format!("/todo/{id}/"))
        .await
        .assert_json(&json!({"id": id, "title": "Buy oat milk", "description": "1L", "completed": true}));
}

#[tokio::test]
async fn test_update_todo_not_found() {
    let (state, _store) = common::create_test_state();
    let token = common::create_authenticated_user(&state, "alice").await;
    let server = common::make_server(state);

    let response = server
        .put("/todo/42/")
        .add_header("Authorization", common::bearer(&token))
        .json(&common::todo_body("ghost"))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_update_todo_invalid_leaves_record() {
    let (state, _store) = common::create_test_state();
    let token = common::create_authenticated_user(&state, "alice").await;
    let server = common::make_server(state);

    let created = server
        .post("/todo/")
        .add_header("Authorization", common::bearer(&token))
        .json(&common::todo_body("keep me"))
        .await
        .json::<Value>();
    let id = created["id"].as_i64().unwrap();

    server
        .put(&format!("/todo/{id}/"))
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({"title": ""}))
        .await
        .assert_status_bad_request();

    server.get(&format!("/todo/{id}/")).await.assert_json(&created);
}

#[tokio::test]
async fn test_update_todo_not_found_with_invalid_body() {
    let (state, _store) = common::create_test_state();
    let token = common::create_authenticated_user(&state, "alice").await;
    let server = common::make_server(state);

    let response = server
        .put("/todo/999/")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({}))
        .await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_patch_replaces_every_field() {
    let (state, _store) = common::create_test_state();
    let token = common::create_authenticated_user(&state, "alice").await;
    let server = common::make_server(state);

    let id = server
        .post("/todo/")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({"title": "Buy milk", "description": "2%", "completed": true}))
        .await
        .json::<Value>()["id"]
        .as_i64()
        .unwrap();

    let response = server
        .patch(&format!("/todo/{id}/"))
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({"title": "Buy bread", "description": "rye"}))
        .await;

    response.assert_status_ok();
    let expected = json!({"id": id, "title": "Buy bread", "description": "rye", "completed": false});
    assert_eq!(response.json::<Value>(), expected);
    server.get(&format!("/todo/{id}/")).await.assert_json(&expected);
}

#[tokio::test]
async fn test_patch_requires_full_body() {
    let (state, _store) = common::create_test_state();
    let token = common::create_authenticated_user(&state, "alice").await;
    let server = common::make_server(state);

    let id = server
        .post("/todo/")
        .add_header("Authorization", common::bearer(&token))
        .json(&common::todo_body("Buy milk"))
        .await
        .json::<Value>()["id"]
        .as_i64()
        .unwrap();

    let response = server
        .patch(&format!("/todo/{id}/"))
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({"completed": true}))
        .await;

    response.assert_status_bad_request();
    let details = &response.json::<Value>()["error"]["details"];
    assert!(details.get("title").is_some());
    assert!(details.get("description").is_some());
}

#[tokio::test]
async fn test_patch_anonymous_unauthorized() {
    let (state, _store) = common::create_test_state();
    let server = common::make_server(state);

    server
        .patch("/todo/1/")
        .json(&common::todo_body("nope"))
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_null_completed_rejected() {
    let (state, _store) = common::create_test_state();
    let token = common::create_authenticated_user(&state, "alice").await;
    let server = common::make_server(state);

    let response = server
        .post("/todo/")
        .add_header("Authorization", common::bearer(&token))
        .json(&json!({"title": "a", "description": "b", "completed": null}))
        .await;

    response.assert_status_bad_request();
    server.get("/todo/").await.assert_json(&json!([]));
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_todo_success() {
    let (state, _store) = common::create_test_state();
    let token = common::create_authenticated_user(&state, "alice").await;
    let server = common::make_server(state);

    let id = server
        .post("/todo/")
        .add_header("Authorization", common::bearer(&token))
        .json(&common::todo_body("temp"))
        .await
        .json::<Value>()["id"]
        .as_i64()
        .unwrap();

    let response = server
        .delete(&format!("/todo/{id}/"))
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.as_bytes().is_empty());

    server
        .get(&format!("/todo/{id}/"))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_todo_not_found() {
    let (state, _store) = common::create_test_state();
    let token = common::create_authenticated_user(&state, "alice").await;
    let server = common::make_server(state);

    let response = server
        .delete("/todo/7/")
        .add_header("Authorization", common::bearer(&token))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_ids_not_reused_after_delete() {
    let (state, _store) = common::create_test_state();
    let token = common::create_authenticated_user(&state, "alice").await;
    let server = common::make_server(state);

    let first = server
        .post("/todo/")
        .add_header("Authorization", common::bearer(&token))
        .json(&common::todo_body("one"))
        .await
        .json::<Value>()["id"]
        .as_i64()
        .unwrap();

    server
        .delete(&format!("/todo/{first}/"))
        .add_header("Authorization", common::bearer(&token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let second = server
        .post("/todo/")
        .add_header("Authorization", common::bearer(&token))
        .json(&common::todo_body("two"))
        .await
        .json::<Value>()["id"]
        .as_i64()
        .unwrap();

    assert_ne!(first, second);
}
