//! Team roster API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{caller_member, error, require_field, success, written, ApiResult};
use crate::errors::AppError;
use crate::identity::AuthIdentity;
use crate::models::{TeamMember, TeamMemberInput};
use crate::AppState;

/// GET /api/team - List the roster.
pub async fn list_team(State(state): State<AppState>) -> ApiResult<Vec<TeamMember>> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.list_team().await {
        Ok(members) => success(members, revision_id),
        Err(e) => error(e, revision_id),
    }
}

/// GET /api/team/:id - Get a single member.
pub async fn get_team_member(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<TeamMember> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match state.repo.get_member(&id).await {
        Ok(Some(member)) => success(member, revision_id),
        Ok(None) => error(
            AppError::NotFound(format!("Team member {} not found", id)),
            revision_id,
        ),
        Err(e) => error(e, revision_id),
    }
}

/// POST /api/team - Add a member. Admins only.
pub async fn create_team_member(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Json(request): Json<TeamMemberInput>,
) -> ApiResult<TeamMember> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if !state.config.is_admin(identity.email.as_deref()) {
        return error(
            AppError::Forbidden("Only admins can add team members".to_string()),
            revision_id,
        );
    }
    if let Err(e) = require_field(&request.name, "Name") {
        return error(e, revision_id);
    }

    let result = state.repo.create_member(&request).await;
    written(&state, result, revision_id).await
}

/// PUT /api/team/:id - Replace a member.
///
/// Members may edit their own record except rate and role; admins may edit anyone.
pub async fn update_team_member(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Path(id): Path<String>,
    Json(request): Json<TeamMemberInput>,
) -> ApiResult<TeamMember> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if let Err(e) = require_field(&request.name, "Name") {
        return error(e, revision_id);
    }

    let existing = match state.repo.get_member(&id).await {
        Ok(Some(member)) => member,
        Ok(None) => {
            return error(
                AppError::NotFound(format!("Team member {} not found", id)),
                revision_id,
            )
        }
        Err(e) => return error(e, revision_id),
    };

    let is_admin = state.config.is_admin(identity.email.as_deref());
    let caller = caller_member(&state, &identity);
    let request = match authorize_member_edit(is_admin, caller.as_ref(), &existing, request) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(caller = %identity.id, member = %id, "Rejected team member edit: {}", e);
            return error(e, revision_id);
        }
    };

    let result = state.repo.update_member(&id, &request).await;
    written(&state, result, revision_id).await
}

/// DELETE /api/team/:id - Remove a member. Admins only.
pub async fn delete_team_member(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    if !state.config.is_admin(identity.email.as_deref()) {
        return error(
            AppError::Forbidden("Only admins can remove team members".to_string()),
            revision_id,
        );
    }

    let result = state.repo.delete_member(&id).await;
    written(&state, result, revision_id).await
}

/// Check a member edit and return the request to apply.
///
/// Non-admins may only touch their own record. Name and email always keep the
/// stored values, since tasks and time entries join on the name and the email
/// belongs to the identity provider. Omitted rate and role keep the stored
/// values; changing either is reserved for admins.
fn authorize_member_edit(
    is_admin: bool,
    caller: Option<&TeamMember>,
    existing: &TeamMember,
    mut request: TeamMemberInput,
) -> Result<TeamMemberInput, AppError> {
    if is_admin {
        return Ok(request);
    }

    if caller.map(|m| m.id.as_str()) != Some(existing.id.as_str()) {
        return Err(AppError::Forbidden(
            "Only admins can edit other team members".to_string(),
        ));
    }

    request.name = existing.name.clone();
    request.email = existing.email.clone();
    if request.hourly_rate.is_none() {
        request.hourly_rate = existing.hourly_rate;
    }
    if request.role.trim().is_empty() {
        request.role = existing.role.clone();
    }

    if request.hourly_rate != existing.hourly_rate {
        return Err(AppError::Forbidden(
            "Only admins can change the hourly rate".to_string(),
        ));
    }
    if request.role != existing.role {
        return Err(AppError::Forbidden("Only admins can change roles".to_string()));
    }

    Ok(request)
}
