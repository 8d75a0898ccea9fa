//! Coach settings routes: branding and the invite slug.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use domain::models::{
    CoachAccount, CoachInvite, CoachSettingsResponse, Patch, SlugHolder,
    UpdateCoachSettingsRequest,
};
use domain::services::{
    authenticated_user_id, build_coach_settings, check_coach_permission,
    validate_settings_update, AccessError, SettingsError,
};
use persistence::repositories::{AccountRepository, CoachInviteRepository};
use shared::validation::normalize_slug;
use tracing::{info, warn};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::OptionalSession;
use crate::middleware::metrics::record_settings_rejected;

/// Token of the coach's existing public invite, without minting one.
async fn existing_public_invite_token(
    state: &AppState,
    coach_id: Uuid,
) -> Result<Option<String>, ApiError> {
    let invites: Vec<CoachInvite> = CoachInviteRepository::new(state.pool.clone())
        .list_for_coach(coach_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(invites
        .into_iter()
        .find(CoachInvite::is_public)
        .map(|invite| invite.invite_token))
}

async fn settings_response(
    state: &AppState,
    account: &CoachAccount,
) -> Result<CoachSettingsResponse, ApiError> {
    // A slug URL needs no invite lookup.
    let token = if account.invite_slug.is_some() {
        None
    } else {
        existing_public_invite_token(state, account.id).await?
    };

    Ok(build_coach_settings(
        account,
        token.as_deref(),
        &state.config.server.app_base_url,
    ))
}

/// Get the signed-in coach's settings.
///
/// GET /api/v1/coach/settings
pub async fn get_settings(
    State(state): State<AppState>,
    session: OptionalSession,
) -> Result<Json<CoachSettingsResponse>, ApiError> {
    let user_id = authenticated_user_id(session.session())?;

    let account: Option<CoachAccount> = AccountRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .map(Into::into);
    check_coach_permission(session.session(), account.as_ref())?;

    let Some(account) = account else {
        return Err(AccessError::NotCoach.into());
    };
    Ok(Json(settings_response(&state, &account).await?))
}

fn rejection_reason(err: &SettingsError) -> &'static str {
    match err {
        SettingsError::Access(_) => "access",
        SettingsError::InvalidSlug(_) => "invalid_slug",
        SettingsError::SlugTaken => "slug_taken",
        SettingsError::InvalidColor(_) => "invalid_color",
    }
}

/// Update branding fields and the invite slug.
///
/// PUT /api/v1/coach/settings
///
/// Omitted fields are left untouched; `null` clears a field. Checks run in
/// order (auth, coach permission, slug, color) and the first failure is
/// returned.
pub async fn update_settings(
    State(state): State<AppState>,
    session: OptionalSession,
    body: Result<Json<UpdateCoachSettingsRequest>, JsonRejection>,
) -> Result<Json<CoachSettingsResponse>, ApiError> {
    let user_id = authenticated_user_id(session.session())?;

    let accounts = AccountRepository::new(state.pool.clone());
    let account: Option<CoachAccount> = accounts.find_by_id(user_id).await?.map(Into::into);
    check_coach_permission(session.session(), account.as_ref())?;

    let Json(request) = body.map_err(|e| ApiError::Validation(e.body_text()))?;

    let holders: Vec<SlugHolder> = match &request.invite_slug {
        Patch::Set(raw) => accounts
            .find_slug_holders(&normalize_slug(raw))
            .await?
            .into_iter()
            .map(Into::into)
            .collect(),
        _ => Vec::new(),
    };

    let update =
        validate_settings_update(session.session(), account.as_ref(), &request, &holders)
            .map_err(|e| {
                warn!(user_id = %user_id, error = %e, "Coach settings update rejected");
                record_settings_rejected(rejection_reason(&e));
                ApiError::from(e)
            })?;

    let updated: CoachAccount = accounts
        .update_branding(user_id, &update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Account not found".into()))?
        .into();

    info!(
        user_id = %user_id,
        invite_slug = updated.invite_slug.as_deref().unwrap_or(""),
        "Coach settings updated"
    );

    Ok(Json(settings_response(&state, &updated).await?))
}
