use sqlx::FromRow;

use super::unknown_value;
use crate::errors::AppError;
use crate::models::{Gear, GearStatus};

/// Row of the `gear` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct GearRow {
    pub id: String,
    pub name: String,
    pub assigned_to: Option<String>,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<GearRow> for Gear {
    type Error = AppError;

    fn try_from(row: GearRow) -> Result<Self, Self::Error> {
        let status = GearStatus::parse(&row.status)
            .ok_or_else(|| unknown_value("gear", "status", &row.status))?;

        Ok(Gear {
            id: row.id,
            name: row.name,
            assigned_to: row.assigned_to.filter(|a| !a.is_empty()),
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<&Gear> for GearRow {
    fn from(gear: &Gear) -> Self {
        GearRow {
            id: gear.id.clone(),
            name: gear.name.clone(),
            assigned_to: gear.assigned_to.clone(),
            status: gear.status.as_str().to_string(),
            created_at: gear.created_at.clone(),
            updated_at: gear.updated_at.clone(),
        }
    }
}
