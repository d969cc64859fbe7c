use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::errors::ApiError;

/// Header carrying the caller's numeric identifier. Issued and trusted by
/// an upstream gateway; nothing in this service verifies it.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the caller's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    fn from_header(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

/// Resolved caller identity, passed explicitly to handlers rather than
/// stashed in request extensions.
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub id: i64,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthenticated("missing identity header"))?;

        let id = raw_id
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::Unauthenticated("invalid identity header"))?;

        let role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(Role::from_header)
            .unwrap_or(Role::User);

        Ok(Caller { id, role })
    }
}

/// Path ids arrive as raw text; a malformed id is a client error distinct
/// from an authorization failure.
pub fn parse_account_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::InvalidTarget)
}

pub fn require_admin(caller: &Caller) -> Result<(), ApiError> {
    if caller.role.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

/// Owner of the target account, or any admin.
pub fn authorize_account_access(caller: &Caller, target_id: i64) -> Result<(), ApiError> {
    if caller.id == target_id || caller.role.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}
