//! Team member model.

use serde::{Deserialize, Serialize};

/// A member of the agency roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub assigned_clients: Vec<String>,
    /// Pay per logged hour; `None` when never set
    pub hourly_rate: Option<f64>,
    #[serde(rename = "photoURL")]
    pub photo_url: String,
    pub notes: String,
}

/// Request body for creating or replacing a team member.
///
/// Updates are full-row replacements: omitted fields fall back to their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberInput {
    /// Identity-provider id; generated when absent on create, ignored on replace
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub assigned_clients: Vec<String>,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default, rename = "photoURL")]
    pub photo_url: String,
    #[serde(default)]
    pub notes: String,
}

impl TeamMemberInput {
    pub fn into_member(self, id: String) -> TeamMember {
        TeamMember {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            role: self.role,
            assigned_clients: self.assigned_clients,
            hourly_rate: self.hourly_rate,
            photo_url: self.photo_url,
            notes: self.notes,
        }
    }
}

/// Request body for saving a member's own notes.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberNotesRequest {
    pub notes: String,
}
