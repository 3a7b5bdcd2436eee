//! Path, query and body parsing shared by the resource handlers.
//!
//! Every failure is a `BadRequest` raised before the store is touched.

use axum::extract::rejection::{PathRejection, QueryRejection};
use bookstore_http::error::{AppError, MALFORMED_BODY};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const INVALID_BOOK_ID: &str = "Bad Request. Invalid Book ID.";
pub const INVALID_COMMENT_ID: &str = "Bad Request. Invalid Comment ID.";
pub const INVALID_PAGE_NUMBER: &str = "Bad Request. Invalid Page Number.";
pub const INVALID_PAGE_SIZE: &str = "Bad Request. Invalid Page Size.";

/// Parse a record key; keys are non-negative integers.
pub fn parse_key(raw: &str, message: &'static str) -> Result<i64, AppError> {
    match raw.parse::<i64>() {
        Ok(key) if key >= 0 => Ok(key),
        _ => Err(AppError::bad_request(message)),
    }
}

fn parse_positive(raw: Option<&str>, message: &'static str) -> Result<u64, AppError> {
    match raw.map(str::parse::<i64>) {
        Some(Ok(value)) if value > 0 => Ok(value as u64),
        _ => Err(AppError::bad_request(message)),
    }
}

/// Raw `pageNumber` / `pageSize` query values.
#[derive(Debug, Default)]
pub struct PageQuery {
    pub page_number: Option<String>,
    pub page_size: Option<String>,
}

impl PageQuery {
    /// Pick the paging values out of decoded query pairs; a repeated key keeps
    /// its first value and unrelated keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = PageQuery::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "pageNumber" => &mut query.page_number,
                "pageSize" => &mut query.page_size,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    /// `(page_number, page_size)`, both strictly positive.
    pub fn parse(&self) -> Result<(u64, u64), AppError> {
        let page_number = parse_positive(self.page_number.as_deref(), INVALID_PAGE_NUMBER)?;
        let page_size = parse_positive(self.page_size.as_deref(), INVALID_PAGE_SIZE)?;
        Ok((page_number, page_size))
    }
}

/// Path captures for `/books/{book_id}` and `/books/{book_id}/comments`.
#[derive(Debug, Deserialize)]
pub struct BookPath {
    pub book_id: String,
}

impl BookPath {
    pub fn book_id(&self) -> Result<i64, AppError> {
        parse_key(&self.book_id, INVALID_BOOK_ID)
    }
}

/// Path captures for `/books/{book_id}/comments/{comment_id}`.
#[derive(Debug, Deserialize)]
pub struct CommentPath {
    pub book_id: String,
    pub comment_id: String,
}

impl CommentPath {
    /// `(book_id, comment_id)`, validated in path order.
    pub fn keys(&self) -> Result<(i64, i64), AppError> {
        let book_id = parse_key(&self.book_id, INVALID_BOOK_ID)?;
        let comment_id = parse_key(&self.comment_id, INVALID_COMMENT_ID)?;
        Ok((book_id, comment_id))
    }
}

/// Decode a JSON request body.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|err| {
        tracing::debug!(error = %err, "request body rejected");
        AppError::bad_request(MALFORMED_BODY)
    })
}

pub fn path_rejected(rejection: PathRejection) -> AppError {
    tracing::debug!(error = %rejection, "path rejected");
    AppError::bad_request(MALFORMED_BODY)
}

pub fn query_rejected(rejection: QueryRejection) -> AppError {
    tracing::debug!(error = %rejection, "query rejected");
    AppError::bad_request(MALFORMED_BODY)
}
