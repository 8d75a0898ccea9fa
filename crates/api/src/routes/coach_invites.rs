//! Invite token validation.

use axum::extract::{Path, State};
use axum::Json;
use domain::models::{CoachAccount, InviteStatus, InviteValidationResponse};
use domain::services::build_invite_validation;
use persistence::repositories::CoachInviteRepository;
use tracing::debug;

use crate::app::AppState;
use crate::error::ApiError;

/// Check that an invite token can still be accepted.
///
/// GET /api/v1/coach/invites/:token
pub async fn validate_invite(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<InviteValidationResponse>, ApiError> {
    let row = CoachInviteRepository::new(state.pool.clone())
        .find_by_token_with_coach(&token)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invalid invite".into()))?;

    let status: InviteStatus = row.invite_status.into();
    if status != InviteStatus::Pending {
        debug!(status = %status, "Invite no longer pending");
        return Err(ApiError::Validation("Invite already used or expired".into()));
    }

    let coach: CoachAccount = row.coach.into();
    Ok(Json(build_invite_validation(&coach, row.invite_email)))
}
