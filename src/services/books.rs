//! Books service

use super::{not_found, settle};
use crate::{
    error::{AppError, AppResult},
    models::book::{BookDto, BookInput, UNKNOWN_AUTHOR},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List books, optionally only those by one author
    pub async fn list(&self, author_id: Option<i32>) -> AppResult<Vec<BookDto>> {
        let books = self.repository.books.list(author_id).await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<BookDto> {
        self.repository
            .books
            .get_by_id(id)
            .await?
            .map(BookDto::from)
            .ok_or_else(|| not_found("Book", id))
    }

    pub async fn create(&self, data: &BookInput) -> AppResult<BookDto> {
        data.check()?;
        self.require_author(data.author_id).await?;

        let book = self.repository.books.create(data).await?;
        tracing::info!("Created book id={} author_id={}", book.id, book.author_id);
        Ok(book.into())
    }

    /// Replace a book. A missing author is reported before the book itself
    /// is looked up, and leaves the stored book untouched.
    pub async fn update(&self, id: i32, data: &BookInput) -> AppResult<()> {
        data.check()?;
        self.require_author(data.author_id).await?;

        let current = self
            .repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found("Book", id))?;

        let outcome = self
            .repository
            .books
            .update(id, current.version, data)
            .await?;
        settle(outcome, "Book", id)?;

        tracing::info!("Updated book id={}", id);
        Ok(())
    }

    /// Delete a book and its copies
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let outcome = self.repository.books.delete(id).await?;
        settle(outcome, "Book", id)?;
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    async fn require_author(&self, author_id: i32) -> AppResult<()> {
        if self.repository.authors.exists(author_id).await? {
            return Ok(());
        }
        tracing::debug!("Rejected book write: author id={} does not exist", author_id);
        Err(AppError::BadRequest(UNKNOWN_AUTHOR.to_string()))
    }
}
