//! Authors service

use super::{not_found, settle};
use crate::{
    error::AppResult,
    models::author::{AuthorDto, AuthorInput},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<AuthorDto>> {
        let authors = self.repository.authors.list().await?;
        Ok(authors.into_iter().map(AuthorDto::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<AuthorDto> {
        self.repository
            .authors
            .get_by_id(id)
            .await?
            .map(AuthorDto::from)
            .ok_or_else(|| not_found("Author", id))
    }

    pub async fn create(&self, data: &AuthorInput) -> AppResult<AuthorDto> {
        data.check()?;
        let author = self.repository.authors.create(data).await?;
        tracing::info!("Created author id={}", author.id);
        Ok(author.into())
    }

    pub async fn update(&self, id: i32, data: &AuthorInput) -> AppResult<()> {
        data.check()?;

        let current = self
            .repository
            .authors
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found("Author", id))?;

        let outcome = self
            .repository
            .authors
            .update(id, current.version, data)
            .await?;
        settle(outcome, "Author", id)?;

        tracing::info!("Updated author id={}", id);
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let outcome = self.repository.authors.delete(id).await?;
        settle(outcome, "Author", id)?;
        tracing::info!("Deleted author id={}", id);
        Ok(())
    }
}
