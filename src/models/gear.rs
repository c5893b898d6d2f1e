//! Gear inventory model.

use serde::{Deserialize, Serialize};

/// Availability of a piece of gear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GearStatus {
    #[default]
    Available,
    InUse,
    Maintenance,
    ComingSoon,
}

impl GearStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GearStatus::Available => "available",
            GearStatus::InUse => "in_use",
            GearStatus::Maintenance => "maintenance",
            GearStatus::ComingSoon => "coming_soon",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(GearStatus::Available),
            "in_use" => Some(GearStatus::InUse),
            "maintenance" => Some(GearStatus::Maintenance),
            "coming_soon" => Some(GearStatus::ComingSoon),
            _ => None,
        }
    }
}

/// A piece of equipment, optionally assigned to a member by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gear {
    pub id: String,
    pub name: String,
    pub assigned_to: Option<String>,
    pub status: GearStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating or replacing gear.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GearInput {
    pub name: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub status: GearStatus,
}
