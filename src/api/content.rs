//! Content (task) API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{caller_member, error, require_field, success, written, ApiResult};
use crate::errors::AppError;
use crate::identity::AuthIdentity;
use crate::models::{Content, ContentInput, StatusUpdateRequest, TeamMember};
use crate::AppState;

/// GET /api/content - List all tasks.
pub async fn list_content(State(state): State<AppState>) -> ApiResult<Vec<Content>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_content().await {
        Ok(content) => success(content, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/content/:id - Get a single task.
pub async fn get_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Content> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.get_content(&id).await {
        Ok(Some(content)) => success(content, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("Content {} not found", id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/content - Create a task, owned by the caller unless stated.
pub async fn create_content(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Json(request): Json<ContentInput>,
) -> ApiResult<Content> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Err(e) = validate(&request) {
        return error(e, revision_id);
    }

    let caller = caller_member(&state, &identity);
    let owner = match task_owner(request.owner.as_deref(), caller.as_ref()) {
        Ok(owner) => owner,
        Err(e) => return error(e, revision_id),
    };

    let result = state.repo.create_content(&request, &owner).await;
    written(&state, result, revision_id).await
}

/// PUT /api/content/:id - Replace a task. Omitted owner keeps the stored one.
pub async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ContentInput>,
) -> ApiResult<Content> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Err(e) = validate(&request) {
        return error(e, revision_id);
    }

    let owner = match request.owner.as_deref().filter(|o| !o.trim().is_empty()) {
        Some(owner) => owner.to_string(),
        None => match state.repo.get_content(&id).await {
            Ok(Some(existing)) => existing.owner,
            Ok(None) => {
                return error(
                    AppError::NotFound(format!("Content {} not found", id)),
                    revision_id,
                )
            }
            Err(e) => return error(e, revision_id),
        },
    };

    let result = state.repo.update_content(&id, &request, &owner).await;
    written(&state, result, revision_id).await
}

/// PATCH /api/content/:id/status - Move a task through the workflow.
pub async fn update_content_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<StatusUpdateRequest>,
) -> ApiResult<Content> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let result = state.repo.update_content_status(&id, request.status).await;
    written(&state, result, revision_id).await
}

/// DELETE /api/content/:id - Delete a task.
pub async fn delete_content(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let result = state.repo.delete_content(&id).await;
    written(&state, result, revision_id).await
}

fn validate(request: &ContentInput) -> Result<(), AppError> {
    require_field(&request.title, "Title")?;
    require_field(&request.deadline, "Deadline")
}

/// Owner name for a new task: the stated owner, else the caller's roster name.
fn task_owner(requested: Option<&str>, caller: Option<&TeamMember>) -> Result<String, AppError> {
    if let Some(owner) = requested.map(str::trim).filter(|o| !o.is_empty()) {
        return Ok(owner.to_string());
    }
    caller
        .map(|m| m.name.clone())
        .ok_or_else(AppError::profile_not_provisioned)
}
