//! Content (task) model.

use serde::{Deserialize, Serialize};

/// Workflow status of a piece of content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentStatus {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "In Review")]
    InReview,
    #[serde(rename = "Done")]
    Done,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::ToDo => "To Do",
            ContentStatus::InProgress => "In Progress",
            ContentStatus::InReview => "In Review",
            ContentStatus::Done => "Done",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "To Do" => Some(ContentStatus::ToDo),
            "In Progress" => Some(ContentStatus::InProgress),
            "In Review" => Some(ContentStatus::InReview),
            "Done" => Some(ContentStatus::Done),
            _ => None,
        }
    }
}

/// A task owned by a team member.
///
/// `owner` holds the member's display name, not their id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: String,
    pub title: String,
    pub owner: String,
    pub client: String,
    pub status: ContentStatus,
    /// Calendar date as entered; may be unparseable
    pub deadline: String,
    pub description: Option<String>,
}

/// Request body for creating or replacing a task.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentInput {
    pub title: String,
    /// Defaults to the caller's roster name on create, the stored owner on replace
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub status: ContentStatus,
    pub deadline: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for a status-only update.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: ContentStatus,
}
