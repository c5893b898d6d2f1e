//! Client model.

use serde::{Deserialize, Serialize};

/// An agency client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub status: String,
    pub join_date: String,
    pub monthly_videos: i64,
    pub documentation: String,
}

/// Request body for creating or replacing a client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    pub name: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub join_date: String,
    #[serde(default)]
    pub monthly_videos: i64,
    #[serde(default)]
    pub documentation: String,
}

impl ClientInput {
    pub fn into_client(self, id: String) -> Client {
        Client {
            id,
            name: self.name,
            contact_person: self.contact_person,
            email: self.email,
            phone: self.phone,
            status: self.status,
            join_date: self.join_date,
            monthly_videos: self.monthly_videos,
            documentation: self.documentation,
        }
    }
}
