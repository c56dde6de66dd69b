//! Route handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::models::{HistoryEntry, ReviewRequest, ReviewResult, SaveHistoryRequest};

use super::AppState;
use super::error::{ApiError, ApiJson};

/// `GET /`, a liveness check.
pub async fn root() -> &'static str {
    "codelens review service is running"
}

/// `POST /ai/get-review`
pub async fn get_review(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ReviewRequest>,
) -> Result<Json<ReviewResult>, ApiError> {
    let result = state.reviews.review(&request).await?;
    Ok(Json(result))
}

/// `GET /history`
pub async fn list_history(State(state): State<AppState>) -> Json<Vec<HistoryEntry>> {
    Json(state.history.list().await)
}

/// `POST /history`
pub async fn save_history(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SaveHistoryRequest>,
) -> Result<(StatusCode, Json<HistoryEntry>), ApiError> {
    let result = match request.persona {
        Some(persona) => ReviewResult::from_value(persona, request.result).map_err(|e| {
            ApiError::InvalidBody(format!(
                "result does not match the {persona} review schema: {e}"
            ))
        })?,
        None => serde_json::from_value::<ReviewResult>(request.result).map_err(|_| {
            ApiError::InvalidBody(
                "result matches neither the senior nor the junior review schema".to_string(),
            )
        })?,
    };

    let entry = HistoryEntry::new(result, request.language, request.focus_area, request.title);
    let saved = state.history.save(entry).await?;
    tracing::info!(id = %saved.id, persona = %saved.persona, "history entry saved");
    Ok((StatusCode::CREATED, Json(saved)))
}

/// `GET /history/:id`
pub async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HistoryEntry>, ApiError> {
    let id = parse_id(&id)?;
    state
        .history
        .get(id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound("History entry"))
}

/// `DELETE /history/:id`
pub async fn delete_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if state.history.delete(id).await? {
        tracing::info!(%id, "history entry deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("History entry"))
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Route")
}

/// Ids that are not UUIDs cannot name an entry.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("History entry"))
}
