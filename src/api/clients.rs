//! Client API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, require_field, success, written, ApiResult};
use crate::models::{Client, ClientInput};
use crate::AppState;

/// GET /api/clients - List clients by name.
pub async fn list_clients(State(state): State<AppState>) -> ApiResult<Vec<Client>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_clients().await {
        Ok(clients) => success(clients, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/clients - Add a client.
pub async fn create_client(
    State(state): State<AppState>,
    Json(request): Json<ClientInput>,
) -> ApiResult<Client> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Err(e) = require_field(&request.name, "Name") {
        return error(e, revision_id);
    }

    let result = state.repo.create_client(&request).await;
    written(&state, result, revision_id).await
}

/// PUT /api/clients/:id - Replace a client.
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ClientInput>,
) -> ApiResult<Client> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Err(e) = require_field(&request.name, "Name") {
        return error(e, revision_id);
    }

    let result = state.repo.update_client(&id, &request).await;
    written(&state, result, revision_id).await
}

/// DELETE /api/clients/:id - Delete a client.
pub async fn delete_client(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let result = state.repo.delete_client(&id).await;
    written(&state, result, revision_id).await
}
