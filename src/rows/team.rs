use sqlx::FromRow;

use super::{encode_json_array, parse_json_array};
use crate::models::TeamMember;

/// Row of the `team` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TeamRow {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub assignedclients: Option<String>,
    pub hourlyrate: Option<f64>,
    pub photourl: Option<String>,
    pub notes: Option<String>,
}

impl From<TeamRow> for TeamMember {
    fn from(row: TeamRow) -> Self {
        TeamMember {
            id: row.id,
            name: row.name,
            email: row.email.unwrap_or_default(),
            phone: row.phone.unwrap_or_default(),
            role: row.role.unwrap_or_default(),
            assigned_clients: row
                .assignedclients
                .map(|s| parse_json_array(&s))
                .unwrap_or_default(),
            hourly_rate: row.hourlyrate,
            photo_url: row.photourl.unwrap_or_default(),
            notes: row.notes.unwrap_or_default(),
        }
    }
}

impl From<&TeamMember> for TeamRow {
    fn from(member: &TeamMember) -> Self {
        TeamRow {
            id: member.id.clone(),
            name: member.name.clone(),
            email: Some(member.email.clone()),
            phone: Some(member.phone.clone()),
            role: Some(member.role.clone()),
            assignedclients: Some(encode_json_array(&member.assigned_clients)),
            hourlyrate: member.hourly_rate,
            photourl: Some(member.photo_url.clone()),
            notes: Some(member.notes.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sparse_row() -> TeamRow {
        TeamRow {
            id: "u1".to_string(),
            name: "Anna".to_string(),
            email: None,
            phone: None,
            role: None,
            assignedclients: None,
            hourlyrate: None,
            photourl: None,
            notes: None,
        }
    }

    #[test]
    fn test_missing_columns_default_to_empty() {
        let member = TeamMember::from(sparse_row());
        assert_eq!(member.email, "");
        assert!(member.assigned_clients.is_empty());
        assert_eq!(member.hourly_rate, None);
        assert_eq!(member.photo_url, "");
    }

    #[test]
    fn test_negative_rate_passes_through() {
        let row = TeamRow {
            hourlyrate: Some(-20.0),
            ..sparse_row()
        };
        assert_eq!(TeamMember::from(row).hourly_rate, Some(-20.0));
    }

    #[test]
    fn test_member_round_trips_through_row() {
        let member = TeamMember {
            id: "u2".to_string(),
            name: "Björn".to_string(),
            email: "bjorn@agency.se".to_string(),
            phone: "070-000".to_string(),
            role: "Editor".to_string(),
            assigned_clients: vec!["Acme".to_string(), "Globex".to_string()],
            hourly_rate: Some(0.0),
            photo_url: "https://cdn/b.png".to_string(),
            notes: "Off on Fridays".to_string(),
        };
        let row = TeamRow::from(&member);
        assert_eq!(row.assignedclients.as_deref(), Some(r#"["Acme","Globex"]"#));
        assert_eq!(TeamMember::from(row), member);
    }
}
