//! The member dashboard: calendar windows, aggregation and subject selection.

mod aggregate;
mod period;

pub use aggregate::*;
pub use period::*;

use crate::errors::AppError;
use crate::models::TeamMember;

/// Pick whose dashboard to show.
///
/// An explicit `selected_user_id` must exist in the roster. Without one the
/// caller's own resolved member is used, which may be absent.
pub fn select_subject<'a>(
    roster: &'a [TeamMember],
    resolved: Option<&'a TeamMember>,
    selected_user_id: Option<&str>,
) -> Result<Option<&'a TeamMember>, AppError> {
    match selected_user_id {
        Some(id) => roster
            .iter()
            .find(|m| m.id == id)
            .map(Some)
            .ok_or_else(|| AppError::NotFound(format!("Team member {} not found", id))),
        None => Ok(resolved),
    }
}
