use sqlx::FromRow;

use crate::models::TimeEntry;

/// Row of the `time_entries` table. The member is stored in the `name` column.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TimeEntryRow {
    pub id: String,
    pub date: Option<String>,
    pub name: Option<String>,
    pub client: Option<String>,
    pub task: Option<String>,
    pub duration: Option<f64>,
}

impl From<TimeEntryRow> for TimeEntry {
    fn from(row: TimeEntryRow) -> Self {
        TimeEntry {
            id: row.id,
            date: row.date.unwrap_or_default(),
            team_member: row.name.unwrap_or_default(),
            client: row.client.unwrap_or_default(),
            task: row.task.unwrap_or_default(),
            duration: row.duration.unwrap_or_default(),
        }
    }
}

impl From<&TimeEntry> for TimeEntryRow {
    fn from(entry: &TimeEntry) -> Self {
        TimeEntryRow {
            id: entry.id.clone(),
            date: Some(entry.date.clone()),
            name: Some(entry.team_member.clone()),
            client: Some(entry.client.clone()),
            task: Some(entry.task.clone()),
            duration: Some(entry.duration),
        }
    }
}
