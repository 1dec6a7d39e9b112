//! Copies repository for database operations

use sqlx::{Pool, Sqlite};

use super::{parent_missing, WriteOutcome};
use crate::{
    error::AppResult,
    models::copy::{BookCopy, CopyInput, UNKNOWN_BOOK},
};

#[derive(Clone)]
pub struct CopiesRepository {
    pool: Pool<Sqlite>,
}

impl CopiesRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<BookCopy>> {
        let rows = sqlx::query_as::<_, BookCopy>(
            "SELECT id, book_id, version FROM copies ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<BookCopy>> {
        let row = sqlx::query_as::<_, BookCopy>(
            "SELECT id, book_id, version FROM copies WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM copies WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    pub async fn create(&self, data: &CopyInput) -> AppResult<BookCopy> {
        let row = sqlx::query_as::<_, BookCopy>(
            "INSERT INTO copies (book_id) VALUES (?) RETURNING id, book_id, version",
        )
        .bind(data.book_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| parent_missing(e, UNKNOWN_BOOK))?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: i32,
        expected_version: i64,
        data: &CopyInput,
    ) -> AppResult<WriteOutcome> {
        let result = sqlx::query(
            "UPDATE copies SET book_id = ?, version = version + 1 WHERE id = ? AND version = ?",
        )
        .bind(data.book_id)
        .bind(id)
        .bind(expected_version)
        .execute(&self.pool)
        .await
        .map_err(|e| parent_missing(e, UNKNOWN_BOOK))?;

        if result.rows_affected() > 0 {
            return Ok(WriteOutcome::Applied);
        }
        if self.exists(id).await? {
            Ok(WriteOutcome::Conflict)
        } else {
            Ok(WriteOutcome::NotFound)
        }
    }

    pub async fn delete(&self, id: i32) -> AppResult<WriteOutcome> {
        let result = sqlx::query("DELETE FROM copies WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(WriteOutcome::NotFound);
        }
        Ok(WriteOutcome::Applied)
    }
}
