use bookstore_db::NewBook;
use serde::Deserialize;
use time::OffsetDateTime;

/// Request body for creating or replacing a book.
///
/// Missing fields take their empty value; `id` and timestamps are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publisher: String,
    #[serde(with = "time::serde::rfc3339::option")]
    pub publication_date: Option<OffsetDateTime>,
    pub pages: i64,
}

impl From<BookPayload> for NewBook {
    fn from(payload: BookPayload) -> Self {
        NewBook {
            title: payload.title,
            author: payload.author,
            isbn: payload.isbn,
            publisher: payload.publisher,
            publication_date: payload.publication_date,
            pages: payload.pages,
        }
    }
}
