//! Copy endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::{created, Created, JsonBody};
use crate::{
    error::AppResult,
    models::copy::{CopyDto, CopyInput},
    AppState,
};

/// List all copies
#[utoipa::path(
    get,
    path = "/copies",
    tag = "copies",
    responses(
        (status = 200, description = "List of copies", body = Vec<CopyDto>)
    )
)]
pub async fn list_copies(State(state): State<AppState>) -> AppResult<Json<Vec<CopyDto>>> {
    let copies = state.services.copies.list().await?;
    Ok(Json(copies))
}

/// Get copy by ID
#[utoipa::path(
    get,
    path = "/copies/{id}",
    tag = "copies",
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Copy details", body = CopyDto),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn get_copy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CopyDto>> {
    let copy = state.services.copies.get_by_id(id).await?;
    Ok(Json(copy))
}

/// Create a new copy of a book
#[utoipa::path(
    post,
    path = "/copies",
    tag = "copies",
    request_body = CopyInput,
    responses(
        (status = 201, description = "Copy created", body = CopyDto),
        (status = 400, description = "Unknown book", body = String)
    )
)]
pub async fn create_copy(
    State(state): State<AppState>,
    JsonBody(data): JsonBody<CopyInput>,
) -> AppResult<Created<CopyDto>> {
    let copy = state.services.copies.create(&data).await?;
    Ok(created(format!("/copies/{}", copy.id), copy))
}

/// Move a copy to another book
#[utoipa::path(
    put,
    path = "/copies/{id}",
    tag = "copies",
    params(("id" = i32, Path, description = "Copy ID")),
    request_body = CopyInput,
    responses(
        (status = 204, description = "Copy updated"),
        (status = 400, description = "Unknown book", body = String),
        (status = 404, description = "Copy not found"),
        (status = 409, description = "Copy changed concurrently", body = String)
    )
)]
pub async fn update_copy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(data): JsonBody<CopyInput>,
) -> AppResult<StatusCode> {
    state.services.copies.update(id, &data).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a copy
#[utoipa::path(
    delete,
    path = "/copies/{id}",
    tag = "copies",
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 204, description = "Copy deleted"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn delete_copy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.copies.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
