use sqlx::FromRow;

use super::unknown_value;
use crate::errors::AppError;
use crate::models::{Content, ContentStatus};

/// Row of the `content` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ContentRow {
    pub id: String,
    pub title: String,
    pub owner: String,
    pub client: Option<String>,
    pub status: String,
    pub deadline: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<ContentRow> for Content {
    type Error = AppError;

    fn try_from(row: ContentRow) -> Result<Self, Self::Error> {
        let status = ContentStatus::parse(&row.status)
            .ok_or_else(|| unknown_value("content", "status", &row.status))?;

        Ok(Content {
            id: row.id,
            title: row.title,
            owner: row.owner,
            client: row.client.unwrap_or_default(),
            status,
            deadline: row.deadline.unwrap_or_default(),
            description: row.description.filter(|d| !d.is_empty()),
        })
    }
}

impl From<&Content> for ContentRow {
    fn from(content: &Content) -> Self {
        ContentRow {
            id: content.id.clone(),
            title: content.title.clone(),
            owner: content.owner.clone(),
            client: Some(content.client.clone()),
            status: content.status.as_str().to_string(),
            deadline: Some(content.deadline.clone()),
            description: content.description.clone(),
        }
    }
}
