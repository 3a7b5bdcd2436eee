//! Storage failures surface as 500 responses carrying the underlying message.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use bookstore_db::{
    Book, BookId, Comment, CommentId, NewBook, NewComment, RecordStore, StoreError, StoreResult,
};
use serde_json::json;

use common::{app_with_store, dune, error_message, send};

struct BrokenStore;

fn broken<T>() -> StoreResult<T> {
    Err(StoreError::Task("disk unplugged".to_string()))
}

#[async_trait]
impl RecordStore for BrokenStore {
    async fn count_books(&self) -> StoreResult<u64> {
        broken()
    }

    async fn list_books(&self, _offset: u64, _limit: u64) -> StoreResult<Vec<Book>> {
        broken()
    }

    async fn get_book(&self, _id: BookId) -> StoreResult<Book> {
        broken()
    }

    async fn book_exists(&self, _id: BookId) -> StoreResult<bool> {
        broken()
    }

    async fn isbn_in_use(&self, _isbn: &str, _except: Option<BookId>) -> StoreResult<bool> {
        broken()
    }

    async fn insert_book(&self, _book: NewBook) -> StoreResult<Book> {
        broken()
    }

    async fn replace_book(&self, _id: BookId, _book: NewBook) -> StoreResult<Book> {
        broken()
    }

    async fn purge_book(&self, _id: BookId) -> StoreResult<Book> {
        broken()
    }

    async fn count_comments(&self, _book_id: BookId) -> StoreResult<u64> {
        broken()
    }

    async fn list_comments(
        &self,
        _book_id: BookId,
        _offset: u64,
        _limit: u64,
    ) -> StoreResult<Vec<Comment>> {
        broken()
    }

    async fn get_comment(&self, _book_id: BookId, _id: CommentId) -> StoreResult<Comment> {
        broken()
    }

    async fn comment_exists(&self, _book_id: BookId, _id: CommentId) -> StoreResult<bool> {
        broken()
    }

    async fn insert_comment(&self, _comment: NewComment) -> StoreResult<Comment> {
        broken()
    }

    async fn replace_comment(&self, _id: CommentId, _comment: NewComment) -> StoreResult<Comment> {
        broken()
    }

    async fn purge_comment(&self, _book_id: BookId, _id: CommentId) -> StoreResult<Comment> {
        broken()
    }
}

#[tokio::test]
async fn store_failures_are_internal_errors() {
    let app = app_with_store(Arc::new(BrokenStore));

    let requests = [
        (Method::GET, "/books?pageNumber=1&pageSize=10", None),
        (Method::POST, "/books", Some(dune())),
        (Method::GET, "/books/1", None),
        (Method::PUT, "/books/1", Some(dune())),
        (Method::DELETE, "/books/1", None),
        (Method::GET, "/books/1/comments?pageNumber=1&pageSize=10", None),
        (Method::POST, "/books/1/comments", Some(json!({ "author": "ana" }))),
        (Method::GET, "/books/1/comments/1", None),
        (Method::PUT, "/books/1/comments/1", Some(json!({ "author": "ana" }))),
        (Method::DELETE, "/books/1/comments/1", None),
    ];

    for (method, uri, body) in requests {
        let (status, response) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(response["error"]["code"], 500);
        assert!(error_message(&response).contains("disk unplugged"), "{uri}");
    }
}

#[tokio::test]
async fn request_errors_win_over_store_failures() {
    let app = app_with_store(Arc::new(BrokenStore));

    let (status, _) = send(&app, Method::GET, "/books?pageNumber=0&pageSize=10", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/books/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
