//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod copies;

use sqlx::{
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};
use std::str::FromStr;

use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};

/// Result of a write addressed to a single row by id.
///
/// Missing rows and lost races are ordinary outcomes, not errors, so callers
/// decide how each one is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Applied,
    NotFound,
    /// The row exists but changed since the caller read it.
    Conflict,
    /// The row is still referenced and was left untouched.
    Restricted,
}

/// Report a write that lost its parent row between the caller's existence
/// check and the write itself as the same client fault as a missing parent.
pub(crate) fn parent_missing(error: sqlx::Error, message: &str) -> AppError {
    match &error {
        sqlx::Error::Database(e) if e.is_foreign_key_violation() => {
            AppError::BadRequest(message.to_string())
        }
        _ => AppError::Database(error),
    }
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub copies: copies::CopiesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            copies: copies::CopiesRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database (for readiness checks)
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Open a connection pool, creating the database file if needed
pub async fn connect(config: &DatabaseConfig) -> Result<Pool<Sqlite>, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_with(options)
        .await
}

/// Apply pending schema migrations
pub async fn migrate(pool: &Pool<Sqlite>) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
