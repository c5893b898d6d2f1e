//! Time entry API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{caller_member, error, require_field, success, written, ApiResult};
use crate::errors::AppError;
use crate::identity::AuthIdentity;
use crate::models::{TeamMember, TimeEntry, TimeEntryInput};
use crate::AppState;

/// GET /api/time-entries - List dated entries, newest first.
pub async fn list_time_entries(State(state): State<AppState>) -> ApiResult<Vec<TimeEntry>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_time_entries().await {
        Ok(entries) => success(entries, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/time-entries - Log time.
pub async fn create_time_entry(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Json(request): Json<TimeEntryInput>,
) -> ApiResult<TimeEntry> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let team_member = match prepare(&state, &identity, &request) {
        Ok(name) => name,
        Err(e) => return error(e, revision_id),
    };

    let result = state.repo.create_time_entry(&request, &team_member).await;
    written(&state, result, revision_id).await
}

/// PUT /api/time-entries/:id - Replace an entry.
pub async fn update_time_entry(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Path(id): Path<String>,
    Json(request): Json<TimeEntryInput>,
) -> ApiResult<TimeEntry> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let team_member = match prepare(&state, &identity, &request) {
        Ok(name) => name,
        Err(e) => return error(e, revision_id),
    };

    let result = state
        .repo
        .update_time_entry(&id, &request, &team_member)
        .await;
    written(&state, result, revision_id).await
}

/// DELETE /api/time-entries/:id - Delete an entry.
pub async fn delete_time_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let result = state.repo.delete_time_entry(&id).await;
    written(&state, result, revision_id).await
}

/// Validate the request and work out whose time it is.
fn prepare(
    state: &AppState,
    identity: &AuthIdentity,
    request: &TimeEntryInput,
) -> Result<String, AppError> {
    require_field(&request.date, "Date")?;

    let roster = state.roster.snapshot();
    let caller = caller_member(state, identity);
    entry_member_name(&roster, request.team_member.as_deref(), caller.as_ref())
}

/// Entries store the member's display name. A requested member may be given
/// by roster id or by name; without one the caller logs their own time.
fn entry_member_name(
    roster: &[TeamMember],
    requested: Option<&str>,
    caller: Option<&TeamMember>,
) -> Result<String, AppError> {
    match requested.map(str::trim).filter(|r| !r.is_empty()) {
        Some(requested) => Ok(roster
            .iter()
            .find(|m| m.id == requested)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| requested.to_string())),
        None => caller
            .map(|m| m.name.clone())
            .ok_or_else(AppError::profile_not_provisioned),
    }
}
