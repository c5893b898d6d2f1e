//! Time entry model.

use serde::{Deserialize, Serialize};

/// Hours logged by a team member against a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: String,
    pub date: String,
    /// Display name of the member who logged the time
    pub team_member: String,
    pub client: String,
    pub task: String,
    /// Hours, fractional allowed
    pub duration: f64,
}

/// Request body for creating or replacing a time entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryInput {
    pub date: String,
    /// Member id or name; defaults to the caller's roster name
    #[serde(default)]
    pub team_member: Option<String>,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub task: String,
    pub duration: f64,
}
