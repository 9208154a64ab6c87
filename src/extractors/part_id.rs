//! Extract and validate the `:id` path segment.

use crate::error::AppError;
use crate::model::{PartId, INVALID_ID_MESSAGE};
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Runs before any body extractor, so a bad id is reported even when the body is also invalid.
#[derive(Clone, Copy, Debug)]
pub struct PartIdPath(pub PartId);

#[async_trait]
impl<S> FromRequestParts<S> for PartIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::invalid_input(INVALID_ID_MESSAGE))?;
        Ok(PartIdPath(raw.parse()?))
    }
}
