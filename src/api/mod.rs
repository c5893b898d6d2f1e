//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.

mod clients;
mod content;
mod dashboard;
mod gear;
mod me;
mod notes;
mod team;
mod time_entries;
mod trips;

pub use clients::*;
pub use content::*;
pub use dashboard::*;
pub use gear::*;
pub use me::*;
pub use notes::*;
pub use team::*;
pub use time_entries::*;
pub use trips::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::identity::{resolve_member, AuthIdentity};
use crate::models::TeamMember;
use crate::AppState;

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub revision_id: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, revision_id: i64) -> Self {
        Self {
            success: true,
            data,
            revision_id,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppErrorWithRevision>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T, revision_id: i64) -> ApiResult<T> {
    Ok(ApiResponse::new(data, revision_id))
}

/// Create an error API response.
pub fn error<T: Serialize>(err: crate::errors::AppError, revision_id: i64) -> ApiResult<T> {
    Err(crate::errors::AppErrorWithRevision {
        error: err,
        revision_id,
    })
}

/// Reply with the outcome of a write, reporting the revision it produced.
async fn written<T: Serialize>(
    state: &AppState,
    result: Result<T, AppError>,
    revision_id: i64,
) -> ApiResult<T> {
    match result {
        Ok(data) => {
            let new_revision = state.repo.get_revision_id().await.unwrap_or(revision_id);
            success(data, new_revision)
        }
        Err(e) => error(e, revision_id),
    }
}

/// The caller's roster entry in the current roster snapshot.
pub(crate) fn caller_member(state: &AppState, identity: &AuthIdentity) -> Option<TeamMember> {
    let roster = state.roster.snapshot();
    resolve_member(identity, &roster).cloned()
}

/// Reject blank required fields.
pub(crate) fn require_field(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
