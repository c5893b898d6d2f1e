//! Row mapping between backend tables and semantic records.
//!
//! Every table has one typed row struct that enumerates its columns exactly as
//! the store names them. Conversions are the only place that knows both
//! namings, so schema drift surfaces here as a [`AppError::RowMapping`].
//!
//! Mapping rules shared by all tables:
//! - nullable columns become `None` or an empty string / collection,
//! - numeric columns pass through unvalidated (negative and zero included),
//! - closed vocabularies reject values they do not know.

mod client;
mod content;
mod gear;
mod team;
mod time_entry;
mod trip;

pub use client::*;
pub use content::*;
pub use gear::*;
pub use team::*;
pub use time_entry::*;
pub use trip::*;

use crate::errors::AppError;

/// Decode a JSON array column, treating anything unreadable as empty.
pub(crate) fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}

/// Encode a string list for a JSON array column.
pub(crate) fn encode_json_array(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

fn unknown_value(table: &str, column: &str, value: &str) -> AppError {
    tracing::error!(table, column, value, "Unknown value in stored row");
    AppError::RowMapping(format!("{table}.{column}: unknown value {value:?}"))
}
