//! SQLite implementation of [`RecordStore`].
//!
//! A single connection is shared behind a mutex; every query runs on Tokio's
//! blocking pool so handlers never block the async executor.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::{StoreError, StoreResult};
use crate::migrations;
use crate::records::{Book, BookId, Comment, CommentId, NewBook, NewComment};
use crate::store::RecordStore;

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const BOOK_COLUMNS: &str =
    "id, created_at, updated_at, deleted_at, title, author, isbn, publisher, publication_date, pages";

const COMMENT_COLUMNS: &str =
    "id, created_at, updated_at, deleted_at, book_id, author, comment_text";

/// Record store backed by one SQLite connection.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (or creates) a database file and applies pending migrations.
    pub fn open(path: impl AsRef<Path>, busy_timeout: Duration) -> StoreResult<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();

        let mut conn = Connection::open(path).inspect_err(|err| {
            tracing::error!(path = %path.display(), error = %err, "failed to open database");
        })?;
        bootstrap_connection(&mut conn, busy_timeout)?;

        tracing::info!(
            path = %path.display(),
            schema_version = migrations::latest_version(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "record store opened"
        );
        Ok(Self::from_connection(conn))
    }

    /// Opens a private in-memory database with the schema applied.
    pub fn open_in_memory() -> StoreResult<Self> {
        let mut conn = Connection::open_in_memory()?;
        bootstrap_connection(&mut conn, DEFAULT_BUSY_TIMEOUT)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    pub fn schema_version(&self) -> StoreResult<u32> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        migrations::current_version(&conn)
    }

    async fn call<F, T>(&self, op: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Connection) -> StoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().map_err(|_| StoreError::Poisoned)?;
            op(&mut *guard)
        })
        .await
        .map_err(|err| StoreError::Task(err.to_string()))?
    }
}

fn bootstrap_connection(conn: &mut Connection, busy_timeout: Duration) -> StoreResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(busy_timeout)?;
    migrations::apply_migrations(conn)
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn count_books(&self) -> StoreResult<u64> {
        self.call(|conn| {
            let total: i64 = conn.query_row(
                "SELECT COUNT(*) FROM books WHERE deleted_at IS NULL",
                [],
                |row| row.get(0),
            )?;
            Ok(total.max(0) as u64)
        })
        .await
    }

    async fn list_books(&self, offset: u64, limit: u64) -> StoreResult<Vec<Book>> {
        self.call(move |conn| {
            let sql = format!(
                "SELECT {BOOK_COLUMNS} FROM books
                 WHERE deleted_at IS NULL
                 ORDER BY id ASC
                 LIMIT ?1 OFFSET ?2"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![to_sql_int(limit), to_sql_int(offset)], book_from_row)?;
            let books = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(books)
        })
        .await
    }

    async fn get_book(&self, id: BookId) -> StoreResult<Book> {
        self.call(move |conn| select_book(conn, id)).await
    }

    async fn book_exists(&self, id: BookId) -> StoreResult<bool> {
        self.call(move |conn| {
            let exists = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM books WHERE id = ?1 AND deleted_at IS NULL)",
                [id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
    }

    async fn isbn_in_use(&self, isbn: &str, except: Option<BookId>) -> StoreResult<bool> {
        let isbn = isbn.to_owned();
        self.call(move |conn| {
            let taken = conn.query_row(
                "SELECT EXISTS(
                    SELECT 1 FROM books
                    WHERE isbn = ?1
                      AND deleted_at IS NULL
                      AND (?2 IS NULL OR id != ?2)
                 )",
                params![isbn, except],
                |row| row.get(0),
            )?;
            Ok(taken)
        })
        .await
    }

    async fn insert_book(&self, book: NewBook) -> StoreResult<Book> {
        let now = format_timestamp(OffsetDateTime::now_utc())?;
        let publication_date = book.publication_date.map(format_timestamp).transpose()?;
        self.call(move |conn| {
            conn.execute(
                "INSERT INTO books
                    (created_at, updated_at, title, author, isbn, publisher, publication_date, pages)
                 VALUES (?1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    now,
                    book.title,
                    book.author,
                    book.isbn,
                    book.publisher,
                    publication_date,
                    book.pages
                ],
            )?;
            let id = conn.last_insert_rowid();
            tracing::debug!(book_id = id, "book inserted");
            select_book(conn, id)
        })
        .await
    }

    async fn replace_book(&self, id: BookId, book: NewBook) -> StoreResult<Book> {
        let now = format_timestamp(OffsetDateTime::now_utc())?;
        let publication_date = book.publication_date.map(format_timestamp).transpose()?;
        self.call(move |conn| {
            let changed = conn.execute(
                "UPDATE books
                 SET updated_at = ?2,
                     title = ?3,
                     author = ?4,
                     isbn = ?5,
                     publisher = ?6,
                     publication_date = ?7,
                     pages = ?8
                 WHERE id = ?1 AND deleted_at IS NULL",
                params![
                    id,
                    now,
                    book.title,
                    book.author,
                    book.isbn,
                    book.publisher,
                    publication_date,
                    book.pages
                ],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound);
            }
            select_book(conn, id)
        })
        .await
    }

    async fn purge_book(&self, id: BookId) -> StoreResult<Book> {
        self.call(move |conn| {
            let tx = conn.transaction()?;
            let book = select_book(&tx, id)?;
            tx.execute("DELETE FROM books WHERE id = ?1", [id])?;
            tx.commit()?;
            tracing::debug!(book_id = id, "book purged");
            Ok(book)
        })
        .await
    }

    async fn count_comments(&self, book_id: BookId) -> StoreResult<u64> {
        self.call(move |conn| {
            let total: i64 = conn.query_row(
                "SELECT COUNT(*) FROM comments WHERE book_id = ?1 AND deleted_at IS NULL",
                [book_id],
                |row| row.get(0),
            )?;
            Ok(total.max(0) as u64)
        })
        .await
    }

    async fn list_comments(
        &self,
        book_id: BookId,
        offset: u64,
        limit: u64,
    ) -> StoreResult<Vec<Comment>> {
        self.call(move |conn| {
            let sql = format!(
                "SELECT {COMMENT_COLUMNS} FROM comments
                 WHERE book_id = ?1 AND deleted_at IS NULL
                 ORDER BY id ASC
                 LIMIT ?2 OFFSET ?3"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(
                params![book_id, to_sql_int(limit), to_sql_int(offset)],
                comment_from_row,
            )?;
            let comments = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(comments)
        })
        .await
    }

    async fn get_comment(&self, book_id: BookId, id: CommentId) -> StoreResult<Comment> {
        self.call(move |conn| select_comment(conn, book_id, id)).await
    }

    async fn comment_exists(&self, book_id: BookId, id: CommentId) -> StoreResult<bool> {
        self.call(move |conn| {
            let exists = conn.query_row(
                "SELECT EXISTS(
                    SELECT 1 FROM comments
                    WHERE id = ?1 AND book_id = ?2 AND deleted_at IS NULL
                 )",
                [id, book_id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
    }

    async fn insert_comment(&self, comment: NewComment) -> StoreResult<Comment> {
        let now = format_timestamp(OffsetDateTime::now_utc())?;
        self.call(move |conn| {
            conn.execute(
                "INSERT INTO comments (created_at, updated_at, book_id, author, comment_text)
                 VALUES (?1, ?1, ?2, ?3, ?4)",
                params![now, comment.book_id, comment.author, comment.comment_text],
            )?;
            let id = conn.last_insert_rowid();
            tracing::debug!(book_id = comment.book_id, comment_id = id, "comment inserted");
            select_comment(conn, comment.book_id, id)
        })
        .await
    }

    async fn replace_comment(&self, id: CommentId, comment: NewComment) -> StoreResult<Comment> {
        let now = format_timestamp(OffsetDateTime::now_utc())?;
        self.call(move |conn| {
            let changed = conn.execute(
                "UPDATE comments
                 SET updated_at = ?3,
                     author = ?4,
                     comment_text = ?5
                 WHERE id = ?1 AND book_id = ?2 AND deleted_at IS NULL",
                params![id, comment.book_id, now, comment.author, comment.comment_text],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound);
            }
            select_comment(conn, comment.book_id, id)
        })
        .await
    }

    async fn purge_comment(&self, book_id: BookId, id: CommentId) -> StoreResult<Comment> {
        self.call(move |conn| {
            let tx = conn.transaction()?;
            let comment = select_comment(&tx, book_id, id)?;
            tx.execute(
                "DELETE FROM comments WHERE id = ?1 AND book_id = ?2",
                [id, book_id],
            )?;
            tx.commit()?;
            tracing::debug!(book_id, comment_id = id, "comment purged");
            Ok(comment)
        })
        .await
    }
}

fn select_book(conn: &Connection, id: BookId) -> StoreResult<Book> {
    let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?1 AND deleted_at IS NULL");
    conn.query_row(&sql, [id], book_from_row)
        .optional()?
        .ok_or(StoreError::NotFound)
}

fn select_comment(conn: &Connection, book_id: BookId, id: CommentId) -> StoreResult<Comment> {
    let sql = format!(
        "SELECT {COMMENT_COLUMNS} FROM comments
         WHERE id = ?1 AND book_id = ?2 AND deleted_at IS NULL"
    );
    conn.query_row(&sql, [id, book_id], comment_from_row)
        .optional()?
        .ok_or(StoreError::NotFound)
}

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        created_at: parse_timestamp(1, row.get(1)?)?,
        updated_at: parse_timestamp(2, row.get(2)?)?,
        deleted_at: parse_optional_timestamp(3, row.get(3)?)?,
        title: row.get(4)?,
        author: row.get(5)?,
        isbn: row.get(6)?,
        publisher: row.get(7)?,
        publication_date: parse_optional_timestamp(8, row.get(8)?)?,
        pages: row.get(9)?,
    })
}

fn comment_from_row(row: &Row<'_>) -> rusqlite::Result<Comment> {
    Ok(Comment {
        id: row.get(0)?,
        created_at: parse_timestamp(1, row.get(1)?)?,
        updated_at: parse_timestamp(2, row.get(2)?)?,
        deleted_at: parse_optional_timestamp(3, row.get(3)?)?,
        book_id: row.get(4)?,
        author: row.get(5)?,
        comment_text: row.get(6)?,
    })
}

fn format_timestamp(ts: OffsetDateTime) -> StoreResult<String> {
    Ok(ts.format(&Rfc3339)?)
}

fn parse_timestamp(idx: usize, raw: String) -> rusqlite::Result<OffsetDateTime> {
    OffsetDateTime::parse(&raw, &Rfc3339)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

fn parse_optional_timestamp(
    idx: usize,
    raw: Option<String>,
) -> rusqlite::Result<Option<OffsetDateTime>> {
    raw.map(|raw| parse_timestamp(idx, raw)).transpose()
}

// SQLite integers are signed; page sizes beyond i64::MAX mean "everything".
fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
