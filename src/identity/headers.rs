//! Reading the authenticated identity from request headers.
//!
//! The identity provider sits in front of this service and forwards the
//! session's identity as headers. Values are read as UTF-8 so names like
//! "Åsa" survive.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};

use super::{AuthIdentity, ProfileMetadata};
use crate::errors::{AppError, AppErrorWithRevision};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";
pub const USER_PHONE_HEADER: &str = "x-user-phone";
pub const USER_FULL_NAME_HEADER: &str = "x-user-full-name";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const USER_AVATAR_HEADER: &str = "x-user-avatar-url";
pub const USER_ROLE_HEADER: &str = "x-user-role";

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl AuthIdentity {
    /// Build an identity from forwarded headers; `None` without a user id.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let id = header_value(headers, USER_ID_HEADER)?;

        Some(AuthIdentity {
            id,
            email: header_value(headers, USER_EMAIL_HEADER),
            phone: header_value(headers, USER_PHONE_HEADER),
            metadata: ProfileMetadata {
                full_name: header_value(headers, USER_FULL_NAME_HEADER),
                name: header_value(headers, USER_NAME_HEADER),
                avatar_url: header_value(headers, USER_AVATAR_HEADER),
                role: header_value(headers, USER_ROLE_HEADER),
            },
        })
    }
}

impl<S> FromRequestParts<S> for AuthIdentity
where
    S: Send + Sync,
{
    type Rejection = AppErrorWithRevision;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        AuthIdentity::from_headers(&parts.headers).ok_or_else(|| {
            AppError::Unauthorized("Missing authenticated identity".to_string()).into()
        })
    }
}
