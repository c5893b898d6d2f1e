//! Gear inventory API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, require_field, success, written, ApiResult};
use crate::models::{Gear, GearInput};
use crate::AppState;

/// GET /api/gear - List gear, newest first.
pub async fn list_gear(State(state): State<AppState>) -> ApiResult<Vec<Gear>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_gear().await {
        Ok(gear) => success(gear, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/gear - Add gear.
pub async fn create_gear(
    State(state): State<AppState>,
    Json(request): Json<GearInput>,
) -> ApiResult<Gear> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Err(e) = require_field(&request.name, "Name") {
        return error(e, revision_id);
    }

    let result = state.repo.create_gear(&request).await;
    written(&state, result, revision_id).await
}

/// PUT /api/gear/:id - Replace gear.
pub async fn update_gear(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<GearInput>,
) -> ApiResult<Gear> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Err(e) = require_field(&request.name, "Name") {
        return error(e, revision_id);
    }

    let result = state.repo.update_gear(&id, &request).await;
    written(&state, result, revision_id).await
}

/// DELETE /api/gear/:id - Delete gear.
pub async fn delete_gear(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let result = state.repo.delete_gear(&id).await;
    written(&state, result, revision_id).await
}
