//! Data models for the library catalog
//!
//! Each entity has a row type read from the database and separate transfer
//! shapes for request bodies and responses.

pub mod author;
pub mod book;
pub mod copy;

use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};

// Re-export commonly used types
pub use author::{Author, AuthorDto, AuthorInput};
pub use book::{BookDto, BookInput, BookQuery, BookWithAuthor};
pub use copy::{BookCopy, CopyDto, CopyInput};

/// Rejects strings that are empty once surrounding whitespace is removed.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Runs the derived checks on `input` and reports the first failing field,
/// walking `rules` in order so callers get one stable message.
pub(crate) fn check_fields<T: Validate>(input: &T, rules: &[(&str, &str)]) -> AppResult<()> {
    let Err(errors) = input.validate() else {
        return Ok(());
    };

    let failed = errors.field_errors();
    let message = rules
        .iter()
        .find(|(field, _)| failed.contains_key(*field))
        .map(|(_, message)| message.to_string())
        .unwrap_or_else(|| errors.to_string());

    Err(AppError::Validation(message))
}
