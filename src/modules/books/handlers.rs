use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use bookstore_db::{Book, NewBook};
use bookstore_http::error::{AppError, RECORD_NOT_FOUND};
use time::OffsetDateTime;

use super::models::BookPayload;
use crate::pagination::{paginate, Paginated};
use crate::request::{decode_json, path_rejected, query_rejected, BookPath, PageQuery};
use crate::validation::validate_book;
use crate::SharedStore;

/// `GET /books?pageNumber=N&pageSize=M`
pub(super) async fn list_books(
    State(store): State<SharedStore>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Paginated<Book>>, AppError> {
    let Query(query) = query.map_err(query_rejected)?;
    let (page_number, page_size) = PageQuery::from_pairs(query).parse()?;

    let total = store.count_books().await?;
    let page = paginate(total, page_number, page_size);
    let books = store.list_books(page.offset, page.limit).await?;

    Ok(Json(Paginated::new(books, total, page, page_number)))
}

/// `POST /books`
pub(super) async fn create_book(
    State(store): State<SharedStore>,
    body: Bytes,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let candidate: NewBook = decode_json::<BookPayload>(&body)?.into();
    validate_book(store.as_ref(), &candidate, None, OffsetDateTime::now_utc()).await?;

    let book = store.insert_book(candidate).await?;
    tracing::info!(book_id = book.id, "book created");

    Ok((StatusCode::CREATED, Json(book)))
}

/// `GET /books/{id}`
pub(super) async fn get_book(
    State(store): State<SharedStore>,
    path: Result<Path<BookPath>, PathRejection>,
) -> Result<Json<Book>, AppError> {
    let Path(path) = path.map_err(path_rejected)?;
    let id = path.book_id()?;

    Ok(Json(store.get_book(id).await?))
}

/// `PUT /books/{id}`: full replace of an existing book.
pub(super) async fn update_book(
    State(store): State<SharedStore>,
    path: Result<Path<BookPath>, PathRejection>,
    body: Bytes,
) -> Result<Json<Book>, AppError> {
    let Path(path) = path.map_err(path_rejected)?;
    let id = path.book_id()?;

    let candidate: NewBook = decode_json::<BookPayload>(&body)?.into();
    validate_book(store.as_ref(), &candidate, Some(id), OffsetDateTime::now_utc()).await?;

    if !store.book_exists(id).await? {
        return Err(AppError::not_found(RECORD_NOT_FOUND));
    }

    let book = store.replace_book(id, candidate).await?;
    tracing::info!(book_id = book.id, "book updated");

    Ok(Json(book))
}

/// `DELETE /books/{id}`: permanent removal, echoing the removed row.
pub(super) async fn delete_book(
    State(store): State<SharedStore>,
    path: Result<Path<BookPath>, PathRejection>,
) -> Result<Json<Book>, AppError> {
    let Path(path) = path.map_err(path_rejected)?;
    let id = path.book_id()?;

    let book = store.purge_book(id).await?;
    tracing::info!(book_id = book.id, "book deleted");

    Ok(Json(book))
}
