//! Matching an authenticated identity to its roster entry.
//!
//! The identity provider and the roster can disagree: a roster row may exist
//! before the member ever signs in, or be edited by hand. Resolution therefore
//! walks a fallback chain instead of trusting the id alone.

mod headers;

pub use headers::*;

use crate::models::TeamMember;

/// Profile metadata attached to an identity by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileMetadata {
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Option<String>,
}

/// The signed-in user as reported by the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthIdentity {
    pub id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub metadata: ProfileMetadata,
}

/// Defaults applied when a member is provisioned for the first time.
#[derive(Debug, Clone)]
pub struct ProvisionDefaults {
    pub hourly_rate: f64,
    pub role: String,
}

/// Unicode-aware case-insensitive equality.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Find the roster entry for `identity`.
///
/// First match wins: id, then email, then profile full name, then profile
/// name. Email and name comparisons ignore case. `None` means the member has
/// no profile yet, which is a valid state rather than an error.
pub fn resolve_member<'a>(
    identity: &AuthIdentity,
    roster: &'a [TeamMember],
) -> Option<&'a TeamMember> {
    let by_id = || roster.iter().find(|m| m.id == identity.id);
    let by_email = || {
        non_empty(identity.email.as_deref())
            .and_then(|email| roster.iter().find(|m| eq_ignore_case(&m.email, email)))
    };
    let by_name = |name: Option<&str>| {
        non_empty(name).and_then(|name| roster.iter().find(|m| eq_ignore_case(&m.name, name)))
    };

    by_id()
        .or_else(by_email)
        .or_else(|| by_name(identity.metadata.full_name.as_deref()))
        .or_else(|| by_name(identity.metadata.name.as_deref()))
}

/// Find the row a sign-in may write to: same id, else same email.
///
/// Names never qualify. A display-name match is fine for reading a profile
/// but would let a stranger with the same name take over the row.
pub fn provision_target<'a>(
    identity: &AuthIdentity,
    roster: &'a [TeamMember],
) -> Option<&'a TeamMember> {
    roster.iter().find(|m| m.id == identity.id).or_else(|| {
        non_empty(identity.email.as_deref())
            .and_then(|email| roster.iter().find(|m| eq_ignore_case(&m.email, email)))
    })
}

/// Build the roster row written on sign-in.
///
/// An existing row keeps what the roster owns: id, name, role, rate, notes and
/// assigned clients. The identity provider supplies email, phone and photo, and
/// the id of a member seen for the first time.
pub fn provision_member(
    identity: &AuthIdentity,
    existing: Option<&TeamMember>,
    defaults: &ProvisionDefaults,
) -> TeamMember {
    let email = non_empty(identity.email.as_deref())
        .map(str::to_string)
        .or_else(|| existing.map(|m| m.email.clone()))
        .unwrap_or_default();

    let name = existing
        .map(|m| m.name.clone())
        .filter(|n| !n.trim().is_empty())
        .or_else(|| non_empty(identity.metadata.full_name.as_deref()).map(str::to_string))
        .or_else(|| {
            non_empty(identity.email.as_deref())
                .and_then(|e| e.split('@').next())
                .filter(|local| !local.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "New User".to_string());

    let role = existing
        .map(|m| m.role.clone())
        .filter(|r| !r.trim().is_empty())
        .or_else(|| non_empty(identity.metadata.role.as_deref()).map(str::to_string))
        .unwrap_or_else(|| defaults.role.clone());

    let phone = non_empty(identity.phone.as_deref())
        .map(str::to_string)
        .or_else(|| existing.map(|m| m.phone.clone()))
        .unwrap_or_default();

    let photo_url = non_empty(identity.metadata.avatar_url.as_deref())
        .map(str::to_string)
        .or_else(|| existing.map(|m| m.photo_url.clone()))
        .unwrap_or_default();

    TeamMember {
        id: existing
            .map(|m| m.id.clone())
            .unwrap_or_else(|| identity.id.clone()),
        name,
        email,
        phone,
        role,
        assigned_clients: existing
            .map(|m| m.assigned_clients.clone())
            .unwrap_or_default(),
        hourly_rate: Some(
            existing
                .and_then(|m| m.hourly_rate)
                .unwrap_or(defaults.hourly_rate),
        ),
        photo_url,
        notes: existing.map(|m| m.notes.clone()).unwrap_or_default(),
    }
}
