use sqlx::FromRow;

use crate::models::Client;

/// Row of the `client` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ClientRow {
    pub id: String,
    pub name: String,
    pub contactperson: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
    pub joindate: Option<String>,
    pub monthlyvideos: Option<i64>,
    pub documentation: Option<String>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: row.id,
            name: row.name,
            contact_person: row.contactperson.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            phone: row.phone.unwrap_or_default(),
            status: row.status.unwrap_or_default(),
            join_date: row.joindate.unwrap_or_default(),
            monthly_videos: row.monthlyvideos.unwrap_or_default(),
            documentation: row.documentation.unwrap_or_default(),
        }
    }
}

impl From<&Client> for ClientRow {
    fn from(client: &Client) -> Self {
        ClientRow {
            id: client.id.clone(),
            name: client.name.clone(),
            contactperson: Some(client.contact_person.clone()),
            email: Some(client.email.clone()),
            phone: Some(client.phone.clone()),
            status: Some(client.status.clone()),
            joindate: Some(client.join_date.clone()),
            monthlyvideos: Some(client.monthly_videos),
            documentation: Some(client.documentation.clone()),
        }
    }
}
