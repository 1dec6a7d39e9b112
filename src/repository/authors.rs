//! Authors repository for database operations

use sqlx::{Pool, Sqlite};

use super::WriteOutcome;
use crate::{error::AppResult, models::author::{Author, AuthorInput}};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Sqlite>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List all authors in storage order
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, last_name, version FROM authors ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, last_name, version FROM authors WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    pub async fn create(&self, data: &AuthorInput) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (first_name, last_name)
            VALUES (?, ?)
            RETURNING id, first_name, last_name, version
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Overwrite all mutable fields, provided the row still carries
    /// `expected_version`.
    pub async fn update(
        &self,
        id: i32,
        expected_version: i64,
        data: &AuthorInput,
    ) -> AppResult<WriteOutcome> {
        let result = sqlx::query(
            r#"
            UPDATE authors
            SET first_name = ?, last_name = ?, version = version + 1
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(id)
        .bind(expected_version)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(WriteOutcome::Applied);
        }
        if self.exists(id).await? {
            Ok(WriteOutcome::Conflict)
        } else {
            Ok(WriteOutcome::NotFound)
        }
    }

    /// Delete an author that no book references. Authors with books are
    /// left untouched and reported as `Restricted`.
    pub async fn delete(&self, id: i32) -> AppResult<WriteOutcome> {
        let mut tx = self.pool.begin().await?;

        let books: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE author_id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if books > 0 {
            tx.rollback().await?;
            return Ok(WriteOutcome::Restricted);
        }

        let result = sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Ok(WriteOutcome::NotFound);
        }
        Ok(WriteOutcome::Applied)
    }
}
