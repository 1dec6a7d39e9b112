//! Author endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use super::{created, Created, JsonBody, WideId};
use crate::{
    error::AppResult,
    models::author::{AuthorDto, AuthorInput},
    AppState,
};

/// List all authors
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "List of authors", body = Vec<AuthorDto>)
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Json<Vec<AuthorDto>>> {
    let authors = state.services.authors.list().await?;
    Ok(Json(authors))
}

/// Get author by ID
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = f64, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = AuthorDto),
        (status = 404, description = "Author not found or ID out of range")
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    WideId(id): WideId,
) -> AppResult<Json<AuthorDto>> {
    let author = state.services.authors.get_by_id(id).await?;
    Ok(Json(author))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = AuthorInput,
    responses(
        (status = 201, description = "Author created", body = AuthorDto),
        (status = 400, description = "Empty first or last name", body = String)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    JsonBody(data): JsonBody<AuthorInput>,
) -> AppResult<Created<AuthorDto>> {
    let author = state.services.authors.create(&data).await?;
    Ok(created(format!("/authors/{}", author.id), author))
}

/// Replace an author
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = f64, Path, description = "Author ID")),
    request_body = AuthorInput,
    responses(
        (status = 204, description = "Author updated"),
        (status = 400, description = "Empty first or last name", body = String),
        (status = 404, description = "Author not found or ID out of range"),
        (status = 409, description = "Author changed concurrently", body = String)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    WideId(id): WideId,
    JsonBody(data): JsonBody<AuthorInput>,
) -> AppResult<StatusCode> {
    state.services.authors.update(id, &data).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete an author that has no books
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = f64, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Author deleted"),
        (status = 404, description = "Author not found or ID out of range"),
        (status = 409, description = "Author still has books", body = String)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    WideId(id): WideId,
) -> AppResult<StatusCode> {
    state.services.authors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
