use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use soapbox_api::{AppStateInner, router};
use soapbox_db::Database;
use soapbox_service::{AccountService, MessageService};

fn app() -> Router {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let accounts = AccountService::new(db.clone());
    let messages = MessageService::new(db, accounts.clone());
    router(Arc::new(AppStateInner { accounts, messages }))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn parse(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn register_then_login() {
    let app = app();

    let (status, body) =
        send(&app, "POST", "/register", Some(json!({"username": "bob", "password": "pass1"}))).await;
    assert_eq!(status, StatusCode::OK);
    let account = parse(&body);
    assert!(account["account_id"].as_i64().unwrap() > 0);
    assert_eq!(account["username"], "bob");
    assert_eq!(account["password"], "pass1");

    // Same username again
    let (status, _) =
        send(&app, "POST", "/register", Some(json!({"username": "bob", "password": "other"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Short password
    let (status, _) =
        send(&app, "POST", "/register", Some(json!({"username": "alice", "password": "abc"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) =
        send(&app, "POST", "/login", Some(json!({"username": "bob", "password": "pass1"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body), account);

    let (status, _) =
        send(&app, "POST", "/login", Some(json!({"username": "bob", "password": "wrong"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn message_lifecycle() {
    let app = app();

    let (_, body) =
        send(&app, "POST", "/register", Some(json!({"username": "bob", "password": "pass1"}))).await;
    let bob = parse(&body)["account_id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/messages",
        Some(json!({"posted_by": bob, "message_text": "hi", "time_posted_epoch": 1700000000})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let posted = parse(&body);
    let id = posted["message_id"].as_i64().unwrap();
    assert_eq!(posted["posted_by"], bob);
    assert_eq!(posted["message_text"], "hi");
    assert_eq!(posted["time_posted_epoch"], 1_700_000_000);

    let (status, body) = send(&app, "GET", "/messages", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body), json!([posted]));

    let (status, body) = send(&app, "GET", &format!("/messages/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body), posted);

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/messages/{id}"),
        Some(json!({"message_text": "hi there"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["message_text"], "hi there");

    let (status, body) = send(&app, "GET", &format!("/accounts/{bob}/messages"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body).as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "DELETE", &format!("/messages/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["message_text"], "hi there");

    // A second delete is a 200 with an empty body
    let (status, body) = send(&app, "DELETE", &format!("/messages/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn absent_message_is_empty_200() {
    let app = app();
    let (status, body) = send(&app, "GET", "/messages/999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn invalid_messages_are_400() {
    let app = app();

    let (_, body) =
        send(&app, "POST", "/register", Some(json!({"username": "bob", "password": "pass1"}))).await;
    let bob = parse(&body)["account_id"].as_i64().unwrap();

    // Empty text
    let (status, _) = send(
        &app,
        "POST",
        "/messages",
        Some(json!({"posted_by": bob, "message_text": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown author
    let (status, _) = send(
        &app,
        "POST",
        "/messages",
        Some(json!({"posted_by": bob + 1, "message_text": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Patch against an id that does not exist
    let (status, _) = send(
        &app,
        "PATCH",
        "/messages/999",
        Some(json!({"message_text": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
