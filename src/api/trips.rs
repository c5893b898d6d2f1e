//! Trip API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, require_field, success, written, ApiResult};
use crate::errors::AppError;
use crate::models::{Trip, TripInput};
use crate::AppState;

/// GET /api/trips - List trips, newest first.
pub async fn list_trips(State(state): State<AppState>) -> ApiResult<Vec<Trip>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_trips().await {
        Ok(trips) => success(trips, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/trips - Log a trip.
pub async fn create_trip(
    State(state): State<AppState>,
    Json(request): Json<TripInput>,
) -> ApiResult<Trip> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Err(e) = validate(&request) {
        return error(e, revision_id);
    }

    let result = state.repo.create_trip(&request).await;
    written(&state, result, revision_id).await
}

/// PUT /api/trips/:id - Replace a trip.
pub async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<TripInput>,
) -> ApiResult<Trip> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Err(e) = validate(&request) {
        return error(e, revision_id);
    }

    let result = state.repo.update_trip(&id, &request).await;
    written(&state, result, revision_id).await
}

/// DELETE /api/trips/:id - Delete a trip.
pub async fn delete_trip(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let result = state.repo.delete_trip(&id).await;
    written(&state, result, revision_id).await
}

fn validate(request: &TripInput) -> Result<(), AppError> {
    require_field(&request.start_location, "Start location")?;
    require_field(&request.destination, "Destination")?;
    require_field(&request.date, "Date")
}
