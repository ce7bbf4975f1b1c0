//! Request authentication: an injectable user resolver and the extractor built on it.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use axum_extra::extract::cookie::CookieJar;

use crate::errors::AppError;
use crate::models::user::UserId;
use crate::services::auth as auth_service;
use crate::AppState;

/// Resolves the authenticated user of a request, if any.
pub trait UserResolver: Send + Sync {
    fn resolve_user_id(&self, parts: &Parts) -> Option<UserId>;
}

/// Resolves users from an HS256 bearer token, falling back to a session cookie.
#[derive(Debug, Clone)]
pub struct JwtUserResolver {
    jwt_secret: String,
    cookie_name: String,
}

impl JwtUserResolver {
    pub fn new(jwt_secret: impl Into<String>, cookie_name: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            cookie_name: cookie_name.into(),
        }
    }

    fn token<'a>(&self, parts: &'a Parts) -> Option<std::borrow::Cow<'a, str>> {
        if let Some(value) = parts.headers.get(header::AUTHORIZATION) {
            // A present but malformed header is not retried against the cookie.
            return value
                .to_str()
                .ok()
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(std::borrow::Cow::Borrowed);
        }

        CookieJar::from_headers(&parts.headers)
            .get(&self.cookie_name)
            .map(|c| std::borrow::Cow::Owned(c.value().to_string()))
    }
}

impl UserResolver for JwtUserResolver {
    fn resolve_user_id(&self, parts: &Parts) -> Option<UserId> {
        let token = self.token(parts)?;
        match auth_service::user_id_from_token(&token, &self.jwt_secret) {
            Ok(user_id) => Some(user_id),
            Err(_) => {
                tracing::debug!("Rejected bearer token");
                None
            }
        }
    }
}

/// Authenticated user extracted through the configured [`UserResolver`].
///
/// Use as an Axum extractor in handlers that require authentication:
/// ```ignore
/// async fn handler(current_user: CurrentUser) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: UserId,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let id = state
            .auth
            .resolve_user_id(parts)
            .ok_or(AppError::Unauthorized)?;
        Ok(CurrentUser { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    const SECRET: &str = "resolver-secret";

    fn parts_with(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/api/matches/stats");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn resolver() -> JwtUserResolver {
        JwtUserResolver::new(SECRET, "auth-token")
    }

    #[test]
    fn resolves_bearer_token() {
        let user = UserId::new_v4();
        let token = auth_service::issue_access_token(user, SECRET, 60).unwrap();
        let parts = parts_with(&[("authorization", &format!("Bearer {token}"))]);
        assert_eq!(resolver().resolve_user_id(&parts), Some(user));
    }

    #[test]
    fn resolves_session_cookie() {
        let user = UserId::new_v4();
        let token = auth_service::issue_access_token(user, SECRET, 60).unwrap();
        let parts = parts_with(&[("cookie", &format!("theme=dark; auth-token={token}"))]);
        assert_eq!(resolver().resolve_user_id(&parts), Some(user));
    }

    #[test]
    fn missing_credentials_resolve_to_none() {
        assert_eq!(resolver().resolve_user_id(&parts_with(&[])), None);
    }

    #[test]
    fn non_bearer_scheme_rejected() {
        let user = UserId::new_v4();
        let token = auth_service::issue_access_token(user, SECRET, 60).unwrap();
        let parts = parts_with(&[
            ("authorization", &format!("Basic {token}")),
            ("cookie", &format!("auth-token={token}")),
        ]);
        assert_eq!(resolver().resolve_user_id(&parts), None);
    }

    #[test]
    fn forged_token_rejected() {
        let token = auth_service::issue_access_token(UserId::new_v4(), "other", 60).unwrap();
        let parts = parts_with(&[("authorization", &format!("Bearer {token}"))]);
        assert_eq!(resolver().resolve_user_id(&parts), None);
    }
}
