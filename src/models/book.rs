//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{check_fields, not_blank, AuthorDto};
use crate::error::AppResult;

pub const UNKNOWN_AUTHOR: &str = "Author with the specified AuthorId does not exist.";

/// Book row joined with its author
#[derive(Debug, Clone, FromRow)]
pub struct BookWithAuthor {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub author_id: i32,
    pub version: i64,
    pub author_first_name: String,
    pub author_last_name: String,
}

/// Book as returned by the API, with its author embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookDto {
    pub id: i32,
    pub title: String,
    pub year: i32,
    pub author: AuthorDto,
}

impl From<BookWithAuthor> for BookDto {
    fn from(row: BookWithAuthor) -> Self {
        Self {
            id: row.id,
            title: row.title,
            year: row.year,
            author: AuthorDto {
                id: row.author_id,
                first_name: row.author_first_name,
                last_name: row.author_last_name,
            },
        }
    }
}

/// Create or update book request. Updates replace every field.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct BookInput {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub year: i32,
    #[serde(default, alias = "authorId", alias = "AuthorId")]
    pub author_id: i32,
}

impl BookInput {
    /// Field checks only; the author reference is checked against storage
    /// by the books service.
    pub fn check(&self) -> AppResult<()> {
        check_fields(
            self,
            &[
                ("title", "Title cannot be empty."),
                ("year", "Year cannot be negative."),
            ],
        )
    }
}

/// Book list filter
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Only return books by this author
    #[serde(rename = "authorId", alias = "author_id")]
    pub author_id: Option<i32>,
}
