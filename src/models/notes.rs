//! Personal notes model.

use serde::{Deserialize, Serialize};

/// Free-text notes document, one per user id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNotes {
    pub user_id: String,
    pub notes: String,
}

/// Request body for saving notes.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveNotesRequest {
    pub notes: String,
}
