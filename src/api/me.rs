//! Endpoints about the signed-in caller's own roster entry.

use axum::{extract::State, Json};

use super::{caller_member, error, success, written, ApiResult};
use crate::errors::AppError;
use crate::identity::{provision_member, provision_target, AuthIdentity, ProvisionDefaults};
use crate::models::{MemberNotesRequest, TeamMember};
use crate::AppState;

/// GET /api/me - The caller's roster entry, `null` before provisioning.
pub async fn get_me(
    State(state): State<AppState>,
    identity: AuthIdentity,
) -> ApiResult<Option<TeamMember>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);
    success(caller_member(&state, &identity), revision_id)
}

/// POST /api/me/provision - Create or refresh the caller's roster entry on sign-in.
pub async fn provision_me(
    State(state): State<AppState>,
    identity: AuthIdentity,
) -> ApiResult<TeamMember> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    // Read the store directly so two quick sign-ins never race a stale snapshot.
    let roster = match state.repo.list_team().await {
        Ok(roster) => roster,
        Err(e) => return error(e, revision_id),
    };

    let defaults = ProvisionDefaults {
        hourly_rate: state.config.default_hourly_rate,
        role: state.config.default_role.clone(),
    };
    let existing = provision_target(&identity, &roster);
    let member = provision_member(&identity, existing, &defaults);

    tracing::info!(
        user_id = %identity.id,
        member_id = %member.id,
        existing = existing.is_some(),
        "Provisioning team member"
    );

    let result = state.repo.upsert_member(&member).await;
    written(&state, result, revision_id).await
}

/// PUT /api/me/notes - Save notes on the caller's roster entry.
pub async fn save_my_notes(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Json(request): Json<MemberNotesRequest>,
) -> ApiResult<TeamMember> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    let Some(member) = caller_member(&state, &identity) else {
        return error(AppError::profile_not_provisioned(), revision_id);
    };

    let result = state
        .repo
        .update_member_notes(&member.id, &request.notes)
        .await;
    written(&state, result, revision_id).await
}
