//! Authentication and coach-permission gate.
//!
//! Two ordered layers: the session must identify a user, then that user's
//! account must be a coach account. The second layer is only consulted when
//! the first passes, so an anonymous request is always reported as
//! unauthenticated whatever account data accompanies it.

use thiserror::Error;
use uuid::Uuid;

use crate::models::{CoachAccount, Session};

/// The first gate layer that rejected a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Unauthorized")]
    Unauthenticated,

    #[error("Not a coach account")]
    NotCoach,
}

/// Layer 1: returns the session's account ID.
pub fn authenticated_user_id(session: Option<&Session>) -> Result<Uuid, AccessError> {
    match session {
        Some(Session {
            user: Some(user), ..
        }) => user.id.ok_or(AccessError::Unauthenticated),
        _ => Err(AccessError::Unauthenticated),
    }
}

/// Layers 1 and 2: returns the coach's account ID.
pub fn check_coach_permission(
    session: Option<&Session>,
    account: Option<&CoachAccount>,
) -> Result<Uuid, AccessError> {
    let user_id = authenticated_user_id(session)?;

    match account {
        Some(account) if account.is_coach => Ok(user_id),
        _ => Err(AccessError::NotCoach),
    }
}
