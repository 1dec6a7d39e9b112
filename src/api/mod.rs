//! API handlers for the library catalog REST endpoints

pub mod authors;
pub mod books;
pub mod copies;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path},
    http::{header::LOCATION, request::Parts, HeaderName, StatusCode},
    Json,
};

use crate::error::AppError;

/// JSON request body whose rejections are reported as `400 Bad Request`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Identifier taken from a path segment that may hold any number.
///
/// The segment is parsed as a float; values that do not fit an `i32`
/// (including NaN and infinities) are answered as not found rather than as
/// malformed requests. Fractions truncate toward zero.
pub struct WideId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for WideId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<f64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        narrow_id(raw)
            .map(WideId)
            .ok_or_else(|| AppError::NotFound(format!("Identifier {} is out of range", raw)))
    }
}

pub fn narrow_id(raw: f64) -> Option<i32> {
    if raw.is_nan() || raw < i32::MIN as f64 || raw > i32::MAX as f64 {
        return None;
    }
    Some(raw.trunc() as i32)
}

/// `201 Created` with a `Location` header pointing at the new resource
pub type Created<T> = (StatusCode, [(HeaderName, String); 1], Json<T>);

pub fn created<T>(location: String, body: T) -> Created<T> {
    (StatusCode::CREATED, [(LOCATION, location)], Json(body))
}
