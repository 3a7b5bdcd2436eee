//! Field and cross-entity rules checked before a book or comment is written.
//!
//! Rules run in a fixed order and stop at the first violation, so a request
//! always gets exactly one message back.

use bookstore_db::{BookId, NewBook, NewComment, RecordStore, StoreError};
use bookstore_http::error::AppError;
use thiserror::Error;
use time::OffsetDateTime;

pub const MAX_TEXT_LEN: usize = 255;
pub const MAX_ISBN_LEN: usize = 13;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Bad Request. Title cannot be empty.")]
    EmptyTitle,
    #[error("Bad Request. Title cannot be longer than 255 characters.")]
    TitleTooLong,
    #[error("Bad Request. Author cannot be empty.")]
    EmptyAuthor,
    #[error("Bad Request. Author cannot be longer than 255 characters.")]
    AuthorTooLong,
    #[error("Bad Request. Publisher cannot be longer than 255 characters.")]
    PublisherTooLong,
    #[error("Bad Request. ISBN number cannot be longer than 13 characters.")]
    IsbnTooLong,
    #[error("Bad Request. ISBN number must be unique.")]
    DuplicateIsbn,
    #[error("Bad Request. Number of pages cannot be less than 1.")]
    TooFewPages,
    #[error("Bad Request. Publication date cannot be in the future.")]
    PublishedInFuture,
    #[error("Bad Request. Comment cannot be longer than 255 characters.")]
    CommentTooLong,
    #[error("Bad Request. Invalid Book ID.")]
    UnknownBook,

    /// A lookup needed by a rule failed; not the client's fault.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Store(store) => AppError::Internal(store.into()),
            rule => AppError::bad_request(rule.to_string()),
        }
    }
}

fn too_long(value: &str, max: usize) -> bool {
    value.chars().count() > max
}

/// Check a book about to be inserted (`key == None`) or replaced.
///
/// The isbn must not belong to any other live book; on update the book's own
/// key is excluded so an unchanged isbn stays valid.
pub async fn validate_book(
    store: &dyn RecordStore,
    candidate: &NewBook,
    key: Option<BookId>,
    now: OffsetDateTime,
) -> Result<(), ValidationError> {
    if candidate.title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if too_long(&candidate.title, MAX_TEXT_LEN) {
        return Err(ValidationError::TitleTooLong);
    }
    if too_long(&candidate.author, MAX_TEXT_LEN) {
        return Err(ValidationError::AuthorTooLong);
    }
    if too_long(&candidate.publisher, MAX_TEXT_LEN) {
        return Err(ValidationError::PublisherTooLong);
    }
    if too_long(&candidate.isbn, MAX_ISBN_LEN) {
        return Err(ValidationError::IsbnTooLong);
    }
    if store.isbn_in_use(&candidate.isbn, key).await? {
        return Err(ValidationError::DuplicateIsbn);
    }
    if candidate.pages < 1 {
        return Err(ValidationError::TooFewPages);
    }
    if candidate.publication_date.is_some_and(|date| date > now) {
        return Err(ValidationError::PublishedInFuture);
    }
    Ok(())
}

/// Check a comment; `candidate.book_id` must already come from the request path.
pub async fn validate_comment(
    store: &dyn RecordStore,
    candidate: &NewComment,
) -> Result<(), ValidationError> {
    if candidate.author.is_empty() {
        return Err(ValidationError::EmptyAuthor);
    }
    if too_long(&candidate.author, MAX_TEXT_LEN) {
        return Err(ValidationError::AuthorTooLong);
    }
    if too_long(&candidate.comment_text, MAX_TEXT_LEN) {
        return Err(ValidationError::CommentTooLong);
    }
    if !store.book_exists(candidate.book_id).await? {
        return Err(ValidationError::UnknownBook);
    }
    Ok(())
}
