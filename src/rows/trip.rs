use sqlx::FromRow;

use crate::models::Trip;

/// Row of the `trips` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TripRow {
    pub id: String,
    pub start_location: Option<String>,
    pub destination: Option<String>,
    pub distance: Option<f64>,
    pub team_member: Option<String>,
    pub date: Option<String>,
    pub purpose: Option<String>,
}

impl From<TripRow> for Trip {
    fn from(row: TripRow) -> Self {
        Trip {
            id: row.id,
            start_location: row.start_location.unwrap_or_default(),
            destination: row.destination.unwrap_or_default(),
            distance: row.distance.unwrap_or_default(),
            team_member: row.team_member.unwrap_or_default(),
            date: row.date.unwrap_or_default(),
            purpose: row.purpose.unwrap_or_default(),
        }
    }
}

impl From<&Trip> for TripRow {
    fn from(trip: &Trip) -> Self {
        TripRow {
            id: trip.id.clone(),
            start_location: Some(trip.start_location.clone()),
            destination: Some(trip.destination.clone()),
            distance: Some(trip.distance),
            team_member: Some(trip.team_member.clone()),
            date: Some(trip.date.clone()),
            purpose: Some(trip.purpose.clone()),
        }
    }
}
