//! Books repository for database operations
//!
//! Every read joins the owning author so callers never need a second query
//! to render a book.

use sqlx::{Pool, QueryBuilder, Sqlite};

use super::{parent_missing, WriteOutcome};
use crate::{
    error::{AppError, AppResult},
    models::book::{BookInput, BookWithAuthor, UNKNOWN_AUTHOR},
};

const SELECT_WITH_AUTHOR: &str = r#"
    SELECT b.id, b.title, b.year, b.author_id, b.version,
           a.first_name AS author_first_name,
           a.last_name AS author_last_name
    FROM books b
    JOIN authors a ON a.id = b.author_id
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List books in storage order, optionally restricted to one author
    pub async fn list(&self, author_id: Option<i32>) -> AppResult<Vec<BookWithAuthor>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_WITH_AUTHOR);
        if let Some(author_id) = author_id {
            builder.push(" WHERE b.author_id = ").push_bind(author_id);
        }
        builder.push(" ORDER BY b.id");

        let rows = builder
            .build_query_as::<BookWithAuthor>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<BookWithAuthor>> {
        let query = format!("{} WHERE b.id = ?", SELECT_WITH_AUTHOR);
        let row = sqlx::query_as::<_, BookWithAuthor>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }

    /// Insert a book and return it with its author loaded
    pub async fn create(&self, data: &BookInput) -> AppResult<BookWithAuthor> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO books (title, year, author_id) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&data.title)
        .bind(data.year)
        .bind(data.author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| parent_missing(e, UNKNOWN_AUTHOR))?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Book {} vanished after insert", id)))
    }

    /// Overwrite all mutable fields, provided the row still carries
    /// `expected_version`.
    pub async fn update(
        &self,
        id: i32,
        expected_version: i64,
        data: &BookInput,
    ) -> AppResult<WriteOutcome> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = ?, year = ?, author_id = ?, version = version + 1
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(&data.title)
        .bind(data.year)
        .bind(data.author_id)
        .bind(id)
        .bind(expected_version)
        .execute(&self.pool)
        .await
        .map_err(|e| parent_missing(e, UNKNOWN_AUTHOR))?;

        if result.rows_affected() > 0 {
            return Ok(WriteOutcome::Applied);
        }
        if self.exists(id).await? {
            Ok(WriteOutcome::Conflict)
        } else {
            Ok(WriteOutcome::NotFound)
        }
    }

    /// Delete a book together with all of its copies
    pub async fn delete(&self, id: i32) -> AppResult<WriteOutcome> {
        let mut tx = self.pool.begin().await?;

        let copies = sqlx::query("DELETE FROM copies WHERE book_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(WriteOutcome::NotFound);
        }
        tx.commit().await?;

        tracing::debug!(
            "Deleted book id={} with {} copies",
            id,
            copies.rows_affected()
        );
        Ok(WriteOutcome::Applied)
    }
}
