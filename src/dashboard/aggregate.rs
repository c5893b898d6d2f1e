//! Per-member dashboard figures derived from raw task and time-entry rows.

use chrono::NaiveDate;
use serde::Serialize;

use super::period::{parse_calendar_date, DateWindow, Period};
use crate::identity::eq_ignore_case;
use crate::models::{Content, ContentStatus, TeamMember, TimeEntry};

/// Everything the dashboard shows for one member and one reference date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub period: Period,
    pub week: DateWindow,
    pub month: DateWindow,
    /// Tasks due this week, earliest deadline first
    pub weekly_tasks: Vec<Content>,
    /// Tasks due this month, earliest deadline first
    pub monthly_tasks: Vec<Content>,
    pub completed_count: usize,
    pub total_count: usize,
    /// Share of this month's tasks that are done, 0..=100
    pub completion_percent: f64,
    pub monthly_hours: f64,
    pub monthly_salary: f64,
}

impl AggregateResult {
    /// The task list for the selected period.
    pub fn selected_tasks(&self) -> &[Content] {
        match self.period {
            Period::Week => &self.weekly_tasks,
            Period::Month => &self.monthly_tasks,
        }
    }
}

/// Compute the dashboard for `member`.
///
/// Tasks and time entries belong to the member when their owner string
/// matches the member's name ignoring case (time entries also ignore
/// surrounding whitespace). Rows whose date does not parse are left out of
/// every window.
pub fn aggregate(
    tasks: &[Content],
    time_entries: &[TimeEntry],
    member: &TeamMember,
    period: Period,
    reference_date: NaiveDate,
) -> AggregateResult {
    let week = DateWindow::week_containing(reference_date);
    let month = DateWindow::month_containing(reference_date);

    let owned: Vec<(NaiveDate, &Content)> = tasks
        .iter()
        .filter(|task| eq_ignore_case(&task.owner, &member.name))
        .filter_map(|task| parse_calendar_date(&task.deadline).map(|deadline| (deadline, task)))
        .collect();

    let weekly_tasks = due_within(&owned, week);
    let monthly_tasks = due_within(&owned, month);

    let total_count = monthly_tasks.len();
    let completed_count = monthly_tasks
        .iter()
        .filter(|task| task.status == ContentStatus::Done)
        .count();
    let completion_percent = if total_count == 0 {
        0.0
    } else {
        completed_count as f64 / total_count as f64 * 100.0
    };

    let member_name = member.name.trim();
    let monthly_hours: f64 = time_entries
        .iter()
        .filter(|entry| eq_ignore_case(entry.team_member.trim(), member_name))
        .filter(|entry| parse_calendar_date(&entry.date).is_some_and(|date| month.contains(date)))
        .map(|entry| entry.duration)
        .sum();

    let monthly_salary = match member.hourly_rate {
        Some(rate) if monthly_hours != 0.0 => monthly_hours * rate,
        _ => 0.0,
    };

    AggregateResult {
        period,
        week,
        month,
        weekly_tasks,
        monthly_tasks,
        completed_count,
        total_count,
        completion_percent,
        monthly_hours,
        monthly_salary,
    }
}

fn due_within(owned: &[(NaiveDate, &Content)], window: DateWindow) -> Vec<Content> {
    let mut due: Vec<(NaiveDate, &Content)> = owned
        .iter()
        .filter(|(deadline, _)| window.contains(*deadline))
        .copied()
        .collect();
    due.sort_by_key(|(deadline, _)| *deadline);
    due.into_iter().map(|(_, task)| task.clone()).collect()
}
