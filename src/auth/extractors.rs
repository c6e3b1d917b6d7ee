use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::auth::dto::JwtKeys;
use crate::auth::repo_types::User;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated request identity: the token subject resolved to a live user
/// row. Extraction rejects with 401 before any route logic runs.
pub struct AuthUser(pub User);

/// Strict `Bearer <token>` parse: case-sensitive prefix, single space.
fn bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ").filter(|t| !t.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthenticated)?;

        let token = bearer_token(header).ok_or(ApiError::Unauthenticated)?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            // The client sees the same 401 either way; only the log tells
            // expired from forged.
            warn!(error = %e, "token rejected");
            ApiError::Unauthenticated
        })?;

        let user = User::find_by_id(&state.db, claims.sub)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| {
                warn!(user_id = %claims.sub, "token subject no longer exists");
                ApiError::Unauthenticated
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exact_bearer_prefix() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_missing_prefix() {
        assert_eq!(bearer_token("abc.def.ghi"), None);
    }

    #[test]
    fn prefix_is_case_sensitive() {
        assert_eq!(bearer_token("bearer abc.def.ghi"), None);
        assert_eq!(bearer_token("BEARER abc.def.ghi"), None);
    }

    #[test]
    fn rejects_prefix_without_token() {
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer"), None);
    }

    #[test]
    fn rejects_basic_scheme() {
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
    }
}
