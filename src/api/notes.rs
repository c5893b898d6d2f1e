//! Personal notes API endpoints, keyed by the caller's identity id.

use axum::{extract::State, Json};

use super::{error, success, written, ApiResult};
use crate::identity::AuthIdentity;
use crate::models::{SaveNotesRequest, UserNotes};
use crate::AppState;

/// GET /api/notes - The caller's notes, empty when never saved.
pub async fn get_notes(
    State(state): State<AppState>,
    identity: AuthIdentity,
) -> ApiResult<UserNotes> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.get_notes(&identity.id).await {
        Ok(Some(notes)) => success(notes, revision_id),
        Ok(None) => success(
            UserNotes {
                user_id: identity.id,
                notes: String::new(),
            },
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// PUT /api/notes - Overwrite the caller's notes.
pub async fn save_notes(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Json(request): Json<SaveNotesRequest>,
) -> ApiResult<UserNotes> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let result = state.repo.save_notes(&identity.id, &request.notes).await;
    written(&state, result, revision_id).await
}
