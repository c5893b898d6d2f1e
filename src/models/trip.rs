//! Trip model.

use serde::{Deserialize, Serialize};

/// A business trip logged for mileage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub start_location: String,
    pub destination: String,
    pub distance: f64,
    pub team_member: String,
    pub date: String,
    pub purpose: String,
}

/// Request body for creating or replacing a trip.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripInput {
    pub start_location: String,
    pub destination: String,
    pub distance: f64,
    #[serde(default)]
    pub team_member: String,
    pub date: String,
    #[serde(default)]
    pub purpose: String,
}

impl TripInput {
    pub fn into_trip(self, id: String) -> Trip {
        Trip {
            id,
            start_location: self.start_location,
            destination: self.destination,
            distance: self.distance,
            team_member: self.team_member,
            date: self.date,
            purpose: self.purpose,
        }
    }
}
