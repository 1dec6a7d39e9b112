//! Copy (physical exemplar of a book) model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

pub const UNKNOWN_BOOK: &str = "Book with the specified BookId does not exist.";

#[derive(Debug, Clone, FromRow)]
pub struct BookCopy {
    pub id: i32,
    pub book_id: i32,
    pub version: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CopyDto {
    pub id: i32,
    pub book_id: i32,
}

impl From<BookCopy> for CopyDto {
    fn from(copy: BookCopy) -> Self {
        Self {
            id: copy.id,
            book_id: copy.book_id,
        }
    }
}

/// Create or update copy request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CopyInput {
    #[serde(default, alias = "bookId", alias = "BookId")]
    pub book_id: i32,
}
