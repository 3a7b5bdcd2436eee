mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{app, create_book, dune, error_message, send};

#[tokio::test]
async fn comment_lifecycle_under_its_book() {
    let app = app();
    let book_id = create_book(&app, dune()).await;
    let base = format!("/books/{book_id}/comments");

    let (status, created) = send(
        &app,
        Method::POST,
        &base,
        Some(json!({ "author": "ana", "commentText": "A classic." })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["bookId"], book_id);
    assert_eq!(created["commentText"], "A classic.");

    let comment_id = created["id"].as_i64().unwrap();
    let uri = format!("{base}/{comment_id}");

    let (status, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "author": "ana", "commentText": "Still a classic." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["commentText"], "Still a classic.");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (status, deleted) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], comment_id);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "Record Not Found.");
}

#[tokio::test]
async fn deleting_an_unknown_comment_is_not_found() {
    let app = app();
    let book_id = create_book(&app, dune()).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/books/{book_id}/comments/9999"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 404);
    assert_eq!(error_message(&body), "Record Not Found.");
}

#[tokio::test]
async fn book_id_in_body_is_ignored() {
    let app = app();
    let book_id = create_book(&app, dune()).await;
    let other = create_book(&app, json!({ "title": "Emma", "isbn": "9780141439587", "pages": 474 })).await;

    let (status, created) = send(
        &app,
        Method::POST,
        &format!("/books/{book_id}/comments"),
        Some(json!({ "author": "ana", "bookId": other })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["bookId"], book_id);
}

#[tokio::test]
async fn comment_is_not_found_under_another_book() {
    let app = app();
    let book_id = create_book(&app, dune()).await;
    let other = create_book(&app, json!({ "title": "Emma", "isbn": "9780141439587", "pages": 474 })).await;

    let (_, created) = send(
        &app,
        Method::POST,
        &format!("/books/{book_id}/comments"),
        Some(json!({ "author": "ana" })),
    )
    .await;
    let comment_id = created["id"].as_i64().unwrap();
    let wrong = format!("/books/{other}/comments/{comment_id}");

    let (status, body) = send(&app, Method::GET, &wrong, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "Record Not Found.");

    let (status, _) = send(&app, Method::PUT, &wrong, Some(json!({ "author": "bo" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &wrong, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn commenting_on_unknown_book_is_a_bad_request() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/books/404/comments",
        Some(json!({ "author": "ana" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Bad Request. Invalid Book ID.");
}

#[tokio::test]
async fn comment_validation_messages() {
    let app = app();
    let book_id = create_book(&app, dune()).await;
    let base = format!("/books/{book_id}/comments");

    let cases = [
        (json!({ "commentText": "hi" }), "Bad Request. Author cannot be empty."),
        (json!({ "author": "a".repeat(256) }), "Bad Request. Author cannot be longer than 255 characters."),
        (
            json!({ "author": "ana", "commentText": "c".repeat(256) }),
            "Bad Request. Comment cannot be longer than 255 characters.",
        ),
    ];

    for (body, expected) in cases {
        let (status, response) = send(&app, Method::POST, &base, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&response), expected);
    }
}

#[tokio::test]
async fn invalid_keys_are_rejected_in_path_order() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/books/x/comments/y", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Bad Request. Invalid Book ID.");

    let (status, body) = send(&app, Method::GET, "/books/1/comments/y", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "Bad Request. Invalid Comment ID.");
}

#[tokio::test]
async fn listing_is_paginated_per_book() {
    let app = app();
    let book_id = create_book(&app, dune()).await;
    let other = create_book(&app, json!({ "title": "Emma", "isbn": "9780141439587", "pages": 474 })).await;

    for n in 0..3 {
        send(
            &app,
            Method::POST,
            &format!("/books/{book_id}/comments"),
            Some(json!({ "author": format!("reader {n}") })),
        )
        .await;
    }
    send(
        &app,
        Method::POST,
        &format!("/books/{other}/comments"),
        Some(json!({ "author": "elsewhere" })),
    )
    .await;

    let (status, page) = send(
        &app,
        Method::GET,
        &format!("/books/{book_id}/comments?pageNumber=1&pageSize=2"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["data"].as_array().unwrap().len(), 2);
    assert_eq!(
        page["meta"]["pagination"],
        json!({ "total": 3, "totalPages": 2, "currentPage": 1, "perPage": 2, "count": 2 })
    );

    let (status, missing) = send(&app, Method::GET, "/books/12345/comments?pageNumber=1&pageSize=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(missing["data"], json!([]));
    assert_eq!(missing["meta"]["pagination"]["total"], 0);
}

#[tokio::test]
async fn deleting_a_book_removes_its_comments() {
    let app = app();
    let book_id = create_book(&app, dune()).await;
    let base = format!("/books/{book_id}/comments");
    let (_, created) = send(&app, Method::POST, &base, Some(json!({ "author": "ana" }))).await;
    let comment_id = created["id"].as_i64().unwrap();

    let (status, _) = send(&app, Method::DELETE, &format!("/books/{book_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, &format!("{base}/{comment_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
