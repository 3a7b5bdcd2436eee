#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use bookstore_app::SharedStore;
use bookstore_db::SqliteStore;
use bookstore_kernel::settings::Settings;
use serde_json::Value;
use tower::ServiceExt;

/// Full application router over a fresh in-memory database.
pub fn app() -> Router {
    let store = SqliteStore::open_in_memory().unwrap();
    app_with_store(Arc::new(store))
}

pub fn app_with_store(store: SharedStore) -> Router {
    let registry = bookstore_app::build_registry(store).unwrap();
    bookstore_http::build_router(&registry, &Settings::default())
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub async fn send_raw(app: &Router, method: Method, uri: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap()
}

pub fn dune() -> Value {
    serde_json::json!({
        "title": "Dune",
        "author": "Frank Herbert",
        "isbn": "9780441013593",
        "publisher": "Chilton Books",
        "publicationDate": "1965-08-01T00:00:00Z",
        "pages": 412
    })
}

/// Create a book and return its key.
pub async fn create_book(app: &Router, body: Value) -> i64 {
    let (status, book) = send(app, Method::POST, "/books", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {book}");
    book["id"].as_i64().unwrap()
}
