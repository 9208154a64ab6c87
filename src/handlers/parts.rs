//! Part CRUD handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::extractors::{JsonBody, PartIdPath};
use crate::model::Part;
use crate::response::MessageBody;
use crate::service::PartValidator;
use crate::state::AppState;
use crate::store::UpdateOutcome;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

const LIST_FAILED: &str = "Server error while fetching parts.";
const READ_FAILED: &str = "Server error while fetching specific part.";
const CREATE_FAILED: &str = "Server error while creating part.";
const UPDATE_FAILED: &str = "Server error while updating part.";
const DELETE_FAILED: &str = "Server error while deleting part.";

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Part>>, AppError> {
    tracing::info!("GET /api/parts");
    let parts = state.parts.list().await.map_err(AppError::server(LIST_FAILED))?;
    Ok(Json(parts))
}

pub async fn read(
    State(state): State<AppState>,
    PartIdPath(id): PartIdPath,
) -> Result<Json<Part>, AppError> {
    tracing::info!(part_id = %id, "GET /api/parts/:id");
    let part = state
        .parts
        .get(id)
        .await
        .map_err(AppError::server(READ_FAILED))?
        .ok_or_else(|| AppError::not_found(format!("Part with ID: {} not found.", id)))?;
    Ok(Json(part))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("POST /api/parts");
    let draft = PartValidator::validate(&body)?;
    let part = state.parts.create(&draft).await.map_err(AppError::server(CREATE_FAILED))?;
    tracing::info!(part_id = part.part_id, "part created");
    Ok((StatusCode::CREATED, Json(part)))
}

pub async fn update(
    State(state): State<AppState>,
    PartIdPath(id): PartIdPath,
    JsonBody(body): JsonBody,
) -> Result<Json<Part>, AppError> {
    tracing::info!(part_id = %id, "PUT /api/parts/:id");
    let draft = PartValidator::validate(&body)?;
    let outcome = state
        .parts
        .update(id, &draft)
        .await
        .map_err(AppError::server(UPDATE_FAILED))?;
    match outcome {
        UpdateOutcome::Updated(part) => {
            tracing::info!(part_id = %id, "part updated");
            Ok(Json(part))
        }
        // Echoes the request rather than re-reading the row; a concurrent writer may have changed it since.
        UpdateOutcome::Unchanged => {
            tracing::info!(part_id = %id, "part data identical, no changes made");
            Ok(Json(draft.into_part(id)))
        }
        UpdateOutcome::Missing => Err(AppError::not_found(format!(
            "Part with ID: {} not found for update.",
            id
        ))),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    PartIdPath(id): PartIdPath,
) -> Result<Json<MessageBody>, AppError> {
    tracing::info!(part_id = %id, "DELETE /api/parts/:id");
    let removed = state.parts.delete(id).await.map_err(AppError::server(DELETE_FAILED))?;
    if !removed {
        return Err(AppError::not_found(format!(
            "Part with ID: {} not found for deletion.",
            id
        )));
    }
    tracing::info!(part_id = %id, "part deleted");
    Ok(Json(MessageBody::new(format!("Part ID: {} deleted successfully.", id))))
}

/// Fallback for anything under `/api` that no route or method matched.
pub async fn api_not_found() -> (StatusCode, Json<MessageBody>) {
    (StatusCode::NOT_FOUND, Json(MessageBody::new("API endpoint not found.")))
}
