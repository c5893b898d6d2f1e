//! Member dashboard endpoint.

use axum::extract::{Query, State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{error, success, ApiResult};
use crate::dashboard::{
    aggregate, parse_calendar_date, select_subject, AggregateResult, DateWindow, Period,
};
use crate::errors::AppError;
use crate::identity::{resolve_member, AuthIdentity};
use crate::models::{Content, TeamMember};
use crate::AppState;

/// Shown alongside figures computed from an older snapshot.
const STALE_NOTICE: &str = "Showing the last loaded data; the latest refresh failed";

/// Query parameters for the dashboard.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    #[serde(default)]
    pub period: Period,
    /// View another member's dashboard
    pub user_id: Option<String>,
    /// Reference day, defaults to today
    pub date: Option<String>,
}

/// Dashboard payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Whose figures these are; `None` when the caller has no profile
    pub subject: Option<TeamMember>,
    /// Whether the caller resolved to a roster entry
    pub profile_provisioned: bool,
    pub period: Period,
    pub reference_date: NaiveDate,
    /// Calendar range of the selected period
    pub window: DateWindow,
    /// Tasks for the selected period
    pub tasks: Vec<Content>,
    pub aggregate: Option<AggregateResult>,
    pub stale: bool,
    pub notice: Option<String>,
}

/// GET /api/dashboard - Tasks, completion, hours and salary for a member.
pub async fn get_dashboard(
    State(state): State<AppState>,
    identity: AuthIdentity,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<DashboardView> {
    let revision_id = state.repo.get_revision_id().await.unwrap_or(0);

    match load_dashboard(&state, &identity, query).await {
        Ok(view) => success(view, revision_id),
        Err(e) => error(e, revision_id),
    }
}

async fn load_dashboard(
    state: &AppState,
    identity: &AuthIdentity,
    query: DashboardQuery,
) -> Result<DashboardView, AppError> {
    let reference_date = match query.date.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(raw) => parse_calendar_date(raw)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid date: {}", raw)))?,
        None => chrono::Local::now().date_naive(),
    };
    let window = DateWindow::for_period(query.period, reference_date);

    if !state.roster.is_loaded() {
        let message = if state.roster.is_live() {
            "Team roster is still loading"
        } else {
            "Team roster feed has stopped"
        };
        return Err(AppError::Internal(message.to_string()));
    }

    let roster = state.roster.snapshot();
    let resolved = resolve_member(identity, &roster);
    let subject = select_subject(&roster, resolved, query.user_id.as_deref())?;

    let Some(subject) = subject else {
        tracing::debug!(user_id = %identity.id, "Dashboard requested without a provisioned profile");
        return Ok(DashboardView {
            subject: None,
            profile_provisioned: false,
            period: query.period,
            reference_date,
            window,
            tasks: Vec::new(),
            aggregate: None,
            stale: false,
            notice: None,
        });
    };

    let ticket = state.content.begin().await;
    let content = state
        .content
        .resolve(ticket, state.repo.list_content().await)
        .await?;

    let ticket = state.time_entries.begin().await;
    let time_entries = state
        .time_entries
        .resolve(ticket, state.repo.list_time_entries().await)
        .await?;

    let stale = content.stale || time_entries.stale;
    if stale {
        tracing::warn!(
            content_stale = content.stale,
            time_entries_stale = time_entries.stale,
            "Serving dashboard from last good snapshot"
        );
    }

    let result = aggregate(
        &content.value,
        &time_entries.value,
        subject,
        query.period,
        reference_date,
    );

    Ok(DashboardView {
        subject: Some(subject.clone()),
        profile_provisioned: resolved.is_some(),
        period: query.period,
        reference_date,
        window,
        tasks: result.selected_tasks().to_vec(),
        aggregate: Some(result),
        stale,
        notice: stale.then(|| STALE_NOTICE.to_string()),
    })
}
