//! Business logic services

pub mod authors;
pub mod books;
pub mod copies;

use crate::{
    error::{AppError, AppResult},
    repository::{Repository, WriteOutcome},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub copies: copies::CopiesService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            copies: copies::CopiesService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}

/// Translate the outcome of an update or delete into the API result.
fn settle(outcome: WriteOutcome, entity: &str, id: i32) -> AppResult<()> {
    match outcome {
        WriteOutcome::Applied => Ok(()),
        WriteOutcome::NotFound => Err(not_found(entity, id)),
        WriteOutcome::Conflict => Err(AppError::Conflict(format!(
            "{} {} was modified concurrently; reload it and retry",
            entity, id
        ))),
        WriteOutcome::Restricted => {
            tracing::debug!("Refused to delete {} id={}: books reference it", entity, id);
            Err(AppError::Conflict(format!(
                "{} {} has books and cannot be deleted.",
                entity, id
            )))
        }
    }
}

fn not_found(entity: &str, id: i32) -> AppError {
    AppError::NotFound(format!("{} {} not found", entity, id))
}
