//! Book endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use super::{created, Created, JsonBody, WideId};
use crate::{
    error::AppResult,
    models::book::{BookDto, BookInput, BookQuery},
    AppState,
};

/// List books, optionally filtered by author
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "List of books with their authors", body = Vec<BookDto>)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<BookDto>>> {
    let books = state.services.books.list(query.author_id).await?;
    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = f64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDto),
        (status = 404, description = "Book not found or ID out of range")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    WideId(id): WideId,
) -> AppResult<Json<BookDto>> {
    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookInput,
    responses(
        (status = 201, description = "Book created", body = BookDto),
        (status = 400, description = "Invalid field or unknown author", body = String)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    JsonBody(data): JsonBody<BookInput>,
) -> AppResult<Created<BookDto>> {
    let book = state.services.books.create(&data).await?;
    Ok(created(format!("/books/{}", book.id), book))
}

/// Replace a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = f64, Path, description = "Book ID")),
    request_body = BookInput,
    responses(
        (status = 204, description = "Book updated"),
        (status = 400, description = "Invalid field or unknown author", body = String),
        (status = 404, description = "Book not found or ID out of range"),
        (status = 409, description = "Book changed concurrently", body = String)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    WideId(id): WideId,
    JsonBody(data): JsonBody<BookInput>,
) -> AppResult<StatusCode> {
    state.services.books.update(id, &data).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a book and all of its copies
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = f64, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found or ID out of range")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    WideId(id): WideId,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
