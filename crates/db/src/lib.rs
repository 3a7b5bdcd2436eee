//! Relational record store for books and comments.
//!
//! The [`RecordStore`] trait is the only surface the HTTP handlers see;
//! [`SqliteStore`] is the production implementation.

pub mod error;
pub mod migrations;
pub mod records;
pub mod sqlite;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use records::{Book, BookId, Comment, CommentId, NewBook, NewComment};
pub use sqlite::SqliteStore;
pub use store::RecordStore;
