use bookstore_db::{BookId, NewComment};
use serde::Deserialize;

/// Request body for creating or replacing a comment.
///
/// Any `bookId` in the body is ignored: the owning book always comes from the path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentPayload {
    pub author: String,
    pub comment_text: String,
}

impl CommentPayload {
    pub fn for_book(self, book_id: BookId) -> NewComment {
        NewComment {
            book_id,
            author: self.author,
            comment_text: self.comment_text,
        }
    }
}
