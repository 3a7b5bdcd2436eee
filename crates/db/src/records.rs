use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub type BookId = i64;
pub type CommentId = i64;

/// A persisted book row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publisher: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub publication_date: Option<OffsetDateTime>,
    pub pages: i64,
}

/// Column values written on insert and full replace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publisher: String,
    pub publication_date: Option<OffsetDateTime>,
    pub pages: i64,
}

/// A persisted comment row. Identity is scoped by `book_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<OffsetDateTime>,
    pub book_id: BookId,
    pub author: String,
    pub comment_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewComment {
    pub book_id: BookId,
    pub author: String,
    pub comment_text: String,
}
