//! Caller identity.
//!
//! There is no token verification: the Player sends the user id in `X-User-Id` and the
//! Engine trusts it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sheetkeeper_domain::UserId;
use sheetkeeper_shared::USER_ID_HEADER;

use super::http::ApiError;

/// The authenticated caller. Rejects with 401 when the header is missing or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub UserId);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing X-User-Id header".to_string()))?;

        UserId::new(header)
            .map(CurrentUser)
            .map_err(|_| ApiError::Unauthorized("Invalid X-User-Id header".to_string()))
    }
}
