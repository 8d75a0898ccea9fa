//! Public coach lookup by invite slug.

use axum::extract::{Query, State};
use axum::Json;
use domain::models::{
    select_public_invite, CoachAccount, CoachInvite, CoachLookupResponse, LookupSlugQuery,
    PublicInviteSelection,
};
use domain::services::build_coach_display;
use persistence::repositories::{AccountRepository, CoachInviteRepository};
use tracing::{debug, info};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::{record_public_invite_minted, record_slug_lookup};

/// The slug parameter as sent, or `None` when it is missing or blank.
fn requested_slug(query: &LookupSlugQuery) -> Option<&str> {
    query
        .slug
        .as_deref()
        .filter(|slug| !slug.trim().is_empty())
}

/// Resolve a coach's public identity and invite token from their slug.
///
/// GET /api/v1/coach/lookup-slug?slug=
///
/// No authentication. The slug is matched case-insensitively. When the coach
/// has no public invite yet one is created, so every resolved coach can be
/// joined.
pub async fn lookup_slug(
    State(state): State<AppState>,
    Query(query): Query<LookupSlugQuery>,
) -> Result<Json<CoachLookupResponse>, ApiError> {
    let slug =
        requested_slug(&query).ok_or_else(|| ApiError::Validation("Slug required".into()))?;

    let coach: CoachAccount = match AccountRepository::new(state.pool.clone())
        .find_coach_by_slug(slug)
        .await?
    {
        Some(entity) => entity.into(),
        None => {
            debug!(slug = %slug, "No coach for slug");
            record_slug_lookup("not_found");
            return Err(ApiError::NotFound("Coach not found".into()));
        }
    };
    record_slug_lookup("found");

    let invites_repo = CoachInviteRepository::new(state.pool.clone());
    let invites: Vec<CoachInvite> = invites_repo
        .list_for_coach(coach.id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let invite_token = match select_public_invite(coach.id, &invites) {
        PublicInviteSelection::Existing(invite) => invite.invite_token.clone(),
        PublicInviteSelection::Mint { token } => {
            // A concurrent request may have stored one first; use whichever won.
            let stored: CoachInvite = invites_repo
                .create_public_invite(coach.id, &token)
                .await?
                .into();
            if stored.invite_token == token {
                info!(coach_id = %coach.id, "Public invite created");
                record_public_invite_minted();
            }
            stored.invite_token
        }
    };

    Ok(Json(CoachLookupResponse {
        coach: build_coach_display(&coach),
        invite_token,
    }))
}
