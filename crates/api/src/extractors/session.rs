//! Session extractor.
//!
//! Resolves the bearer token in the `Authorization` header to a [`Session`].
//! The extractor never rejects: a missing, malformed or invalid token yields
//! no session, and handlers decide what an anonymous request may do.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::{Session, SessionUser};
use shared::jwt::SessionTokenConfig;
use std::convert::Infallible;
use tracing::debug;

use crate::app::AppState;

/// The request's session, if a valid bearer token was presented.
#[derive(Debug, Clone, Default)]
pub struct OptionalSession(pub Option<Session>);

impl OptionalSession {
    pub fn session(&self) -> Option<&Session> {
        self.0.as_ref()
    }
}

/// Extracts the token from a `Bearer <token>` header value.
fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Verifies `token` and binds the subject as the session user.
///
/// A token whose subject is not an account ID still yields a session, just
/// one without a user ID.
fn resolve_session(tokens: &SessionTokenConfig, token: &str) -> Option<Session> {
    match tokens.verify(token) {
        Ok(claims) => Some(Session {
            user: Some(SessionUser {
                id: claims.user_id(),
            }),
        }),
        Err(e) => {
            debug!(error = %e, "Rejected session token");
            None
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for OptionalSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token);

        let session = match (token, state.session_tokens.as_deref()) {
            (Some(token), Some(tokens)) => resolve_session(tokens, token),
            _ => None,
        };

        Ok(OptionalSession(session))
    }
}
