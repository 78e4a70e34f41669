use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;
use uuid::Uuid;

use super::{repo_types::User, services::read_cookie};
use crate::{error::ApiError, state::AppState};

/// Resolves the session cookie to its user.
///
/// No cookie is `Unauthorized`; a cookie that does not resolve (unknown,
/// rotated away, or not a UUID at all) is `UnknownSession`.
pub struct SessionUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookie_name = &state.config.session.cookie_name;
        let raw = read_cookie(&parts.headers, cookie_name).ok_or(ApiError::Unauthorized)?;

        let Ok(session_id) = Uuid::parse_str(raw) else {
            warn!("malformed session cookie");
            return Err(ApiError::UnknownSession);
        };

        match state.users.find_by_session(session_id).await? {
            Some(user) => Ok(SessionUser(user)),
            None => {
                warn!("unknown session");
                Err(ApiError::UnknownSession)
            }
        }
    }
}
