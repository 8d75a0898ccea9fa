//! Coach settings update pipeline.
//!
//! Checks run in a fixed order and the first failure is returned:
//! authentication, coach permission, slug length, slug uniqueness, brand
//! color. Nothing is aggregated.

use shared::validation::{validate_brand_color, validate_invite_slug};
use thiserror::Error;
use tracing::debug;
use validator::ValidationError;

use super::access::{check_coach_permission, AccessError};
use super::slug::{check_slug_uniqueness, SLUG_TAKEN_MESSAGE};
use crate::models::{
    CoachAccount, CoachBrandingUpdate, Patch, Session, SlugHolder, UpdateCoachSettingsRequest,
};

/// Why a settings update was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("{0}")]
    InvalidSlug(String),

    #[error("{}", SLUG_TAKEN_MESSAGE)]
    SlugTaken,

    #[error("{0}")]
    InvalidColor(String),
}

fn message_of(err: ValidationError) -> String {
    err.message
        .map(|m| m.to_string())
        .unwrap_or_else(|| err.code.to_string())
}

/// Validates a settings update for the account behind `session`.
///
/// `existing_slugs` must contain every other account currently holding the
/// requested slug (it may contain more). On success the returned update
/// carries the normalized slug.
pub fn validate_settings_update(
    session: Option<&Session>,
    account: Option<&CoachAccount>,
    request: &UpdateCoachSettingsRequest,
    existing_slugs: &[SlugHolder],
) -> Result<CoachBrandingUpdate, SettingsError> {
    let coach_id = check_coach_permission(session, account)?;

    let invite_slug = match &request.invite_slug {
        Patch::Set(raw) => {
            validate_invite_slug(raw).map_err(|e| SettingsError::InvalidSlug(message_of(e)))?;

            let check = check_slug_uniqueness(raw, coach_id, existing_slugs);
            if !check.valid {
                debug!(coach_id = %coach_id, slug = %check.normalized_slug, "Invite slug taken");
                return Err(SettingsError::SlugTaken);
            }
            Patch::Set(check.normalized_slug)
        }
        Patch::Clear => Patch::Clear,
        Patch::Unchanged => Patch::Unchanged,
    };

    if let Some(color) = request.brand_color.as_set() {
        validate_brand_color(color).map_err(|e| SettingsError::InvalidColor(message_of(e)))?;
    }

    Ok(CoachBrandingUpdate {
        brand_name: request.brand_name.clone(),
        brand_color: request.brand_color.clone(),
        brand_logo: request.brand_logo.clone(),
        invite_slug,
    })
}
