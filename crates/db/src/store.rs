use async_trait::async_trait;

use crate::error::StoreResult;
use crate::records::{Book, BookId, Comment, CommentId, NewBook, NewComment};

/// Persistence capabilities required by the book and comment handlers.
///
/// Reads only ever see live rows (no `deleted_at` marker). Keyed reads and
/// mutations report a missing row as [`crate::StoreError::NotFound`].
/// Comment operations are always scoped by the owning book key.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn count_books(&self) -> StoreResult<u64>;

    /// Live books ordered by id.
    async fn list_books(&self, offset: u64, limit: u64) -> StoreResult<Vec<Book>>;

    async fn get_book(&self, id: BookId) -> StoreResult<Book>;

    async fn book_exists(&self, id: BookId) -> StoreResult<bool>;

    /// Whether a live book other than `except` already carries `isbn`.
    async fn isbn_in_use(&self, isbn: &str, except: Option<BookId>) -> StoreResult<bool>;

    async fn insert_book(&self, book: NewBook) -> StoreResult<Book>;

    /// Overwrites every column of a live book and returns the stored row.
    async fn replace_book(&self, id: BookId, book: NewBook) -> StoreResult<Book>;

    /// Permanently removes a live book, returning the row as it was.
    async fn purge_book(&self, id: BookId) -> StoreResult<Book>;

    async fn count_comments(&self, book_id: BookId) -> StoreResult<u64>;

    async fn list_comments(
        &self,
        book_id: BookId,
        offset: u64,
        limit: u64,
    ) -> StoreResult<Vec<Comment>>;

    async fn get_comment(&self, book_id: BookId, id: CommentId) -> StoreResult<Comment>;

    async fn comment_exists(&self, book_id: BookId, id: CommentId) -> StoreResult<bool>;

    async fn insert_comment(&self, comment: NewComment) -> StoreResult<Comment>;

    /// Overwrites a live comment found under `comment.book_id`.
    async fn replace_comment(&self, id: CommentId, comment: NewComment) -> StoreResult<Comment>;

    async fn purge_comment(&self, book_id: BookId, id: CommentId) -> StoreResult<Comment>;
}
