//! Typed path parameter extraction.

use std::str::FromStr;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use notehub_core::error::AppError;

use crate::error::ApiError;

/// A single `{id}` path segment parsed into a typed identifier.
///
/// Malformed ids are rejected with 400 before any handler runs.
#[derive(Debug, Clone, Copy)]
pub struct IdPath<T>(pub T);

impl<S, T> FromRequestParts<S> for IdPath<T>
where
    S: Send + Sync,
    T: FromStr + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::validation("Invalid ID format"))?;

        raw.parse::<T>()
            .map(IdPath)
            .map_err(|_| AppError::validation("Invalid ID format").into())
    }
}
