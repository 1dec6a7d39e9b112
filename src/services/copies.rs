//! Copies service

use super::{not_found, settle};
use crate::{
    error::{AppError, AppResult},
    models::copy::{CopyDto, CopyInput, UNKNOWN_BOOK},
    repository::Repository,
};

#[derive(Clone)]
pub struct CopiesService {
    repository: Repository,
}

impl CopiesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<CopyDto>> {
        let copies = self.repository.copies.list().await?;
        Ok(copies.into_iter().map(CopyDto::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<CopyDto> {
        self.repository
            .copies
            .get_by_id(id)
            .await?
            .map(CopyDto::from)
            .ok_or_else(|| not_found("Copy", id))
    }

    pub async fn create(&self, data: &CopyInput) -> AppResult<CopyDto> {
        self.require_book(data.book_id).await?;
        let copy = self.repository.copies.create(data).await?;
        tracing::info!("Created copy id={} of book id={}", copy.id, copy.book_id);
        Ok(copy.into())
    }

    pub async fn update(&self, id: i32, data: &CopyInput) -> AppResult<()> {
        self.require_book(data.book_id).await?;

        let current = self
            .repository
            .copies
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found("Copy", id))?;

        let outcome = self
            .repository
            .copies
            .update(id, current.version, data)
            .await?;
        settle(outcome, "Copy", id)?;

        tracing::info!("Updated copy id={}", id);
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let outcome = self.repository.copies.delete(id).await?;
        settle(outcome, "Copy", id)?;
        tracing::info!("Deleted copy id={}", id);
        Ok(())
    }

    async fn require_book(&self, book_id: i32) -> AppResult<()> {
        if self.repository.books.exists(book_id).await? {
            return Ok(());
        }
        tracing::debug!("Rejected copy write: book id={} does not exist", book_id);
        Err(AppError::BadRequest(UNKNOWN_BOOK.to_string()))
    }
}
