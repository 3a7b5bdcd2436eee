use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use bookstore_db::Comment;
use bookstore_http::error::{AppError, RECORD_NOT_FOUND};

use super::models::CommentPayload;
use crate::pagination::{paginate, Paginated};
use crate::request::{
    decode_json, path_rejected, query_rejected, BookPath, CommentPath, PageQuery,
};
use crate::validation::validate_comment;
use crate::SharedStore;

/// `GET /books/{bookId}/comments?pageNumber=N&pageSize=M`
///
/// An unknown book lists as an empty page rather than an error.
pub(super) async fn list_comments(
    State(store): State<SharedStore>,
    path: Result<Path<BookPath>, PathRejection>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Paginated<Comment>>, AppError> {
    let Path(path) = path.map_err(path_rejected)?;
    let book_id = path.book_id()?;
    let Query(query) = query.map_err(query_rejected)?;
    let (page_number, page_size) = PageQuery::from_pairs(query).parse()?;

    let total = store.count_comments(book_id).await?;
    let page = paginate(total, page_number, page_size);
    let comments = store
        .list_comments(book_id, page.offset, page.limit)
        .await?;

    Ok(Json(Paginated::new(comments, total, page, page_number)))
}

/// `POST /books/{bookId}/comments`
pub(super) async fn create_comment(
    State(store): State<SharedStore>,
    path: Result<Path<BookPath>, PathRejection>,
    body: Bytes,
) -> Result<(StatusCode, Json<Comment>), AppError> {
    let Path(path) = path.map_err(path_rejected)?;
    let book_id = path.book_id()?;

    let candidate = decode_json::<CommentPayload>(&body)?.for_book(book_id);
    validate_comment(store.as_ref(), &candidate).await?;

    let comment = store.insert_comment(candidate).await?;
    tracing::info!(book_id, comment_id = comment.id, "comment created");

    Ok((StatusCode::CREATED, Json(comment)))
}

/// `GET /books/{bookId}/comments/{id}`
pub(super) async fn get_comment(
    State(store): State<SharedStore>,
    path: Result<Path<CommentPath>, PathRejection>,
) -> Result<Json<Comment>, AppError> {
    let Path(path) = path.map_err(path_rejected)?;
    let (book_id, comment_id) = path.keys()?;

    Ok(Json(store.get_comment(book_id, comment_id).await?))
}

/// `PUT /books/{bookId}/comments/{id}`
pub(super) async fn update_comment(
    State(store): State<SharedStore>,
    path: Result<Path<CommentPath>, PathRejection>,
    body: Bytes,
) -> Result<Json<Comment>, AppError> {
    let Path(path) = path.map_err(path_rejected)?;
    let (book_id, comment_id) = path.keys()?;

    let candidate = decode_json::<CommentPayload>(&body)?.for_book(book_id);
    validate_comment(store.as_ref(), &candidate).await?;

    if !store.comment_exists(book_id, comment_id).await? {
        return Err(AppError::not_found(RECORD_NOT_FOUND));
    }

    let comment = store.replace_comment(comment_id, candidate).await?;
    tracing::info!(book_id, comment_id, "comment updated");

    Ok(Json(comment))
}

/// `DELETE /books/{bookId}/comments/{id}`
pub(super) async fn delete_comment(
    State(store): State<SharedStore>,
    path: Result<Path<CommentPath>, PathRejection>,
) -> Result<Json<Comment>, AppError> {
    let Path(path) = path.map_err(path_rejected)?;
    let (book_id, comment_id) = path.keys()?;

    let comment = store.purge_comment(book_id, comment_id).await?;
    tracing::info!(book_id, comment_id, "comment deleted");

    Ok(Json(comment))
}
