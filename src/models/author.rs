//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{check_fields, not_blank};
use crate::error::AppResult;

/// Full author row from database
#[derive(Debug, Clone, FromRow)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Concurrency token, bumped on every update
    pub version: i64,
}

/// Author as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthorDto {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name,
            last_name: author.last_name,
        }
    }
}

/// Create or update author request. Updates replace every field.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct AuthorInput {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
}

impl AuthorInput {
    pub fn check(&self) -> AppResult<()> {
        check_fields(
            self,
            &[
                ("first_name", "First name cannot be empty."),
                ("last_name", "Last name cannot be empty."),
            ],
        )
    }
}
