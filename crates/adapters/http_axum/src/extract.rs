//! Request extractors.

use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;

use clinikit_domain::id::RoleId;

/// Header carrying the caller's role ids, comma separated.
pub const ROLES_HEADER: &str = "x-clinikit-roles";

/// Role ids of the caller.
///
/// `None` when the header is absent. Blank items are dropped, so an empty
/// header yields `Some` of an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleIds(pub Option<Vec<RoleId>>);

impl RoleIds {
    /// Borrow the ids in the shape permission checks expect.
    #[must_use]
    pub fn as_deref(&self) -> Option<&[RoleId]> {
        self.0.as_deref()
    }

    fn parse(raw: &str) -> Self {
        let ids = raw
            .split(',')
            .filter_map(|item| RoleId::new(item.trim()).ok())
            .collect();
        Self(Some(ids))
    }
}

impl<S> FromRequestParts<S> for RoleIds
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(ROLES_HEADER) else {
            return Ok(Self(None));
        };
        let raw = value.to_str().map_err(|_| {
            (
                StatusCode::BAD_REQUEST,
                "x-clinikit-roles must be visible ASCII",
            )
        })?;
        Ok(Self::parse(raw))
    }
}
